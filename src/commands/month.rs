use anyhow::Result;
use carecal_core::query;
use chrono::{Datelike, NaiveDate};
use owo_colors::OwoColorize;

use super::Session;
use crate::render::{none_scheduled, pluralize};
use crate::utils::parse::parse_month;
use crate::utils::today;

pub fn run(month: Option<&str>, profile: Option<&str>) -> Result<()> {
    let session = Session::load()?;
    let filter = session.filter(profile)?;

    let (year, month) = match month {
        Some(m) => parse_month(m)?,
        None => {
            let now = today();
            (now.year(), now.month())
        }
    };

    let snapshot = session.store.snapshot();
    let counts = query::event_counts_by_day(&snapshot, year, month, &filter);

    let heading = NaiveDate::from_ymd_opt(year, month, 1)
        .map(|d| d.format("%B %Y").to_string())
        .unwrap_or_else(|| format!("{year}-{month:02}"));
    println!("{}", heading.bold());

    if counts.is_empty() {
        let label = session.profiles.filter_label(&filter);
        println!("  {}", none_scheduled("events", label.as_deref()).dimmed());
        return Ok(());
    }

    let today = today();
    for (day, count) in counts {
        let line = format!(
            "  {:<12} {} {}",
            day.format("%a %-d").to_string(),
            count,
            pluralize("event", count)
        );
        if day == today {
            println!("{}", line.green());
        } else {
            println!("{}", line);
        }
    }

    Ok(())
}
