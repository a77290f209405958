use anyhow::Result;
use carecal_core::query;
use owo_colors::OwoColorize;

use super::Session;
use crate::render::{date_label, event_line, none_scheduled};
use crate::utils::parse::parse_date;
use crate::utils::today;

pub fn run(date: Option<&str>, profile: Option<&str>, json: bool) -> Result<()> {
    let session = Session::load()?;
    let filter = session.filter(profile)?;

    let day = match date {
        Some(d) => parse_date(d)?,
        None => today(),
    };

    let snapshot = session.store.snapshot();
    let events = query::events_on_date(&snapshot, day, &filter);

    if json {
        println!("{}", serde_json::to_string_pretty(&events)?);
        return Ok(());
    }

    println!("{}", date_label(day, today()).bold());

    if events.is_empty() {
        let label = session.profiles.filter_label(&filter);
        println!("  {}", none_scheduled("events", label.as_deref()).dimmed());
        return Ok(());
    }

    for event in events {
        println!("{}", event_line(event, &session.profiles));
    }

    Ok(())
}
