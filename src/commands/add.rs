use anyhow::Result;
use carecal_core::{EventDraft, EventKind};
use owo_colors::OwoColorize;

use super::Session;
use crate::utils::parse::{parse_date, parse_time};

pub struct AddArgs {
    pub title: String,
    pub date: String,
    pub time: String,
    pub kind: EventKind,
    pub location: Option<String>,
    pub description: Option<String>,
    pub profile: Option<String>,
}

pub fn run(args: AddArgs) -> Result<()> {
    let mut session = Session::load()?;

    let profile_id = match args.profile.as_deref() {
        Some(p) => session.profile_id(p)?,
        None => None,
    };

    let draft = EventDraft {
        title: args.title,
        date: Some(parse_date(&args.date)?),
        time: Some(parse_time(&args.time)?),
        location: args.location,
        description: args.description,
        kind: args.kind,
        profile_id,
    };

    let snapshot = session.store.save(draft.into(), None, &session.profiles)?;
    session.save_events(&snapshot)?;

    if let Some(event) = snapshot.last() {
        println!(
            "{}",
            format!("  Added: {} on {} at {}", event.title, event.date, event.time).green()
        );
    }

    Ok(())
}
