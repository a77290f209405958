use anyhow::Result;
use carecal_core::{NewProfile, Relationship};
use dialoguer::Confirm;
use owo_colors::OwoColorize;

use super::Session;
use crate::render::{pluralize, Render};
use crate::utils::parse::parse_date;

pub fn list() -> Result<()> {
    let session = Session::load()?;

    if session.profiles.is_empty() {
        println!("{}", "No care profiles yet.".dimmed());
        println!("Add one with: carecal profiles add <name>");
        return Ok(());
    }

    for profile in session.profiles.profiles() {
        let count = session
            .store
            .snapshot()
            .iter()
            .filter(|e| e.profile_id.as_ref() == Some(&profile.id))
            .count();
        println!("  {}", profile.render());
        println!(
            "     {}",
            format!("{} {}", count, pluralize("event", count)).dimmed()
        );
    }

    Ok(())
}

pub fn add(
    name: String,
    relationship: Option<Relationship>,
    birth_date: Option<&str>,
    notes: Option<String>,
) -> Result<()> {
    let mut session = Session::load()?;

    if session.profiles.find(&name).is_some() {
        anyhow::bail!("A profile named '{}' already exists", name.trim());
    }

    let birth_date = birth_date.map(parse_date).transpose()?;

    let added = session
        .profiles
        .add(NewProfile {
            name,
            relationship,
            birth_date,
            notes,
        })?
        .name
        .clone();
    session.save_profiles()?;

    println!("{}", format!("  Added profile: {}", added).green());
    Ok(())
}

pub fn remove(key: &str, force: bool) -> Result<()> {
    let mut session = Session::load()?;

    let Some(profile) = session.profiles.find(key).cloned() else {
        anyhow::bail!("Profile '{}' not found", key);
    };

    let assigned = session
        .store
        .snapshot()
        .iter()
        .filter(|e| e.profile_id.as_ref() == Some(&profile.id))
        .count();

    if !force {
        println!("  {}", profile.render());
        if assigned > 0 {
            println!(
                "  {} {} will keep showing this profile's id",
                assigned,
                pluralize("event", assigned)
            );
        }
        let confirmed = Confirm::new()
            .with_prompt(format!("Remove {}?", profile.name))
            .default(false)
            .interact()?;
        if !confirmed {
            return Ok(());
        }
    }

    session.profiles.remove(&profile.id);
    session.save_profiles()?;

    println!("{}", format!("  Removed profile: {}", profile.name).red());
    Ok(())
}
