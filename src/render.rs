//! Terminal rendering for carecal types.
//!
//! Extension traits that add colored output to carecal-core types using owo_colors.

use carecal_core::{CareProfile, Event, EventKind, Origin, ProfileDirectory};
use chrono::NaiveDate;
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for EventKind {
    fn render(&self) -> String {
        match self {
            EventKind::Appointment => self.as_str().blue().to_string(),
            EventKind::Medical => self.as_str().red().to_string(),
            EventKind::Medication => self.as_str().green().to_string(),
        }
    }
}

impl Render for CareProfile {
    fn render(&self) -> String {
        let mut line = self.name.bold().to_string();
        if let Some(rel) = &self.relationship {
            line.push_str(&format!(" ({})", rel));
        }
        line.push_str(&format!("  {}", self.id.as_str().dimmed()));

        if let Some(birth) = &self.birth_date {
            line.push_str(&format!("\n     born {}", birth.format("%B %-d, %Y")));
        }
        if let Some(notes) = &self.notes {
            line.push_str(&format!("\n     {}", notes.dimmed()));
        }
        line
    }
}

/// One event as a single line, labelled with the profile it belongs to.
pub fn event_line(event: &Event, profiles: &ProfileDirectory) -> String {
    let mut line = format!(
        "  {} {} {}",
        event.time.to_string().bold(),
        event.title,
        format!("[{}]", profiles.label(event.profile_id.as_ref())).dimmed(),
    );

    line.push_str(&format!(" {}", event.kind.render()));
    if event.is_recurring() {
        line.push_str(&format!(" {}", "↻".cyan()));
    }
    if let Some(location) = &event.location {
        line.push_str(&format!(" @ {}", location));
    }
    line.push_str(&format!("  {}", short_id(event).dimmed()));
    line
}

/// Short handle printed next to each event; commands accept it in place of the id.
///
/// Occurrences of one schedule share the lineage prefix, so they are told apart by
/// their day and time index.
pub fn short_id(event: &Event) -> String {
    match &event.origin {
        Origin::Single => event.id.as_str().chars().take(12).collect(),
        Origin::Occurrence {
            parent_id,
            day_index,
            time_index,
            ..
        } => {
            let lineage: String = parent_id.as_str().chars().take(8).collect();
            format!("{}-{}-{}", lineage, day_index, time_index)
        }
    }
}

/// Print events grouped under a heading per day, in the order given.
pub fn print_by_day(events: &[&Event], profiles: &ProfileDirectory, today: NaiveDate) {
    let mut current_date: Option<NaiveDate> = None;

    for event in events {
        if current_date != Some(event.date) {
            if current_date.is_some() {
                println!();
            }
            println!("{}", date_label(event.date, today).bold());
            current_date = Some(event.date);
        }
        println!("{}", event_line(event, profiles));
    }
}

/// Format a date as a human-readable label (e.g. "Today", "Tomorrow", "Wed Feb 25")
pub fn date_label(date: NaiveDate, today: NaiveDate) -> String {
    match (date - today).num_days() {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        -1 => "Yesterday".to_string(),
        _ => date.format("%a %b %-d, %Y").to_string(),
    }
}

/// The "nothing here" line, naming the filtered profile when there is one.
pub fn none_scheduled(what: &str, profile_label: Option<&str>) -> String {
    match profile_label {
        Some(name) => format!("No {} scheduled for {}", what, name),
        None => format!("No {} scheduled", what),
    }
}

/// Simple pluralization helper
pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}
