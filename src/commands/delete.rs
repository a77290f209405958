use anyhow::Result;
use carecal_core::DeletionScope;
use dialoguer::{Confirm, Select};
use owo_colors::OwoColorize;

use super::Session;
use crate::render::{event_line, pluralize};

pub fn run(id_arg: &str, series: bool, force: bool) -> Result<()> {
    let mut session = Session::load()?;
    let id = session.event_id(id_arg)?;

    let Some(scope) = session.store.deletion_scope(&id) else {
        anyhow::bail!("Event '{}' not found", id_arg);
    };

    if let Some(event) = session.store.get(&id) {
        println!("{}", event_line(event, &session.profiles));
    }

    let snapshot = match scope {
        DeletionScope::Single => {
            if series {
                anyhow::bail!("--series only applies to medication reminders");
            }
            if !force && !confirm("Delete this event?")? {
                return Ok(());
            }
            session.store.remove(&id)
        }
        DeletionScope::Occurrence {
            parent_id,
            lineage_size,
        } => {
            let whole_series = if series || force {
                series
            } else {
                let all = format!(
                    "All {} {} in this schedule",
                    lineage_size,
                    pluralize("reminder", lineage_size)
                );
                let choice = Select::new()
                    .with_prompt("Delete which reminders?")
                    .items(&["Only this one", all.as_str()])
                    .default(0)
                    .interact()?;
                choice == 1
            };

            let prompt = if whole_series {
                format!(
                    "Delete {} {}?",
                    lineage_size,
                    pluralize("reminder", lineage_size)
                )
            } else {
                "Delete this reminder?".to_string()
            };
            if !force && !confirm(&prompt)? {
                return Ok(());
            }

            if whole_series {
                session.store.remove_group(&parent_id)
            } else {
                session.store.remove(&id)
            }
        }
    };

    session.save_events(&snapshot)?;
    println!("{}", "  Deleted".red());

    Ok(())
}

fn confirm(prompt: &str) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()?)
}
