use anyhow::Result;
use carecal_core::{Frequency, MedicationTemplate};
use owo_colors::OwoColorize;

use super::Session;
use crate::render::pluralize;
use crate::utils::parse::{parse_date, parse_days, split_times};
use crate::utils::today;

pub struct MedicationArgs {
    pub title: String,
    pub start: Option<String>,
    pub duration: String,
    pub times: String,
    pub frequency: Frequency,
    pub location: Option<String>,
    pub description: Option<String>,
    pub profile: Option<String>,
}

pub fn run(args: MedicationArgs) -> Result<()> {
    let mut session = Session::load()?;

    let profile_id = match args.profile.as_deref() {
        Some(p) => session.profile_id(p)?,
        None => None,
    };

    let start_date = match args.start.as_deref() {
        Some(s) => parse_date(s)?,
        None => today(),
    };

    let template = MedicationTemplate {
        title: args.title,
        start_date: Some(start_date),
        frequency: args.frequency,
        duration_days: parse_days(&args.duration)?,
        times: split_times(&args.times),
        location: args.location,
        description: args.description,
        profile_id,
    };

    let before = session.store.len();
    let snapshot = session.store.save(template.into(), None, &session.profiles)?;
    session.save_events(&snapshot)?;

    let added = snapshot.len() - before;
    if let Some(last) = snapshot.last() {
        println!(
            "{}",
            format!(
                "  Added: {} ({} {}, {} to {})",
                last.title,
                added,
                pluralize("reminder", added),
                start_date,
                last.date
            )
            .green()
        );
    }

    Ok(())
}
