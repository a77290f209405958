use anyhow::Result;
use carecal_core::query;
use owo_colors::OwoColorize;

use super::Session;
use crate::render::{none_scheduled, print_by_day};
use crate::utils::today;

pub fn run(limit: Option<usize>, profile: Option<&str>, json: bool) -> Result<()> {
    let session = Session::load()?;
    let filter = session.filter(profile)?;
    let limit = limit.unwrap_or(session.carecal.config().upcoming_limit);

    let today = today();
    let snapshot = session.store.snapshot();
    let events = query::upcoming(&snapshot, today, &filter, limit);

    if json {
        println!("{}", serde_json::to_string_pretty(&events)?);
        return Ok(());
    }

    if events.is_empty() {
        let label = session.profiles.filter_label(&filter);
        println!("{}", none_scheduled("upcoming events", label.as_deref()).dimmed());
        return Ok(());
    }

    print_by_day(&events, &session.profiles, today);

    Ok(())
}
