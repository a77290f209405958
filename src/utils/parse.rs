//! Parsing of command-line date, time and duration arguments.

use anyhow::{Context, Result};
use carecal_core::TimeOfDay;
use chrono::{Datelike, NaiveDate};

const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

/// Parse a day: ISO "YYYY-MM-DD" first, then natural language ("tomorrow",
/// "next friday", "march 20").
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let input = input.trim();

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(date);
    }

    let dt = fuzzydate::parse(&input.to_lowercase())
        .map_err(|_| anyhow::anyhow!("Could not parse date: \"{}\"", input))?;
    Ok(dt.date())
}

pub fn parse_time(input: &str) -> Result<TimeOfDay> {
    Ok(input.parse::<TimeOfDay>()?)
}

/// Split a comma separated list of reminder times, keeping blanks for the core
/// to skip.
pub fn split_times(input: &str) -> Vec<String> {
    input.split(',').map(|t| t.trim().to_string()).collect()
}

/// Parse a schedule length: a plain number of days ("14") or a whole number of
/// days written as a duration ("2weeks", "10days").
pub fn parse_days(input: &str) -> Result<u32> {
    let input = input.trim();

    if let Ok(days) = input.parse::<u32>() {
        return Ok(days);
    }

    let duration = humantime::parse_duration(input)
        .with_context(|| format!("Could not parse duration: \"{}\"", input))?;
    let secs = duration.as_secs();

    if secs % SECONDS_PER_DAY != 0 || duration.subsec_nanos() != 0 {
        anyhow::bail!("Duration \"{}\" is not a whole number of days", input);
    }

    u32::try_from(secs / SECONDS_PER_DAY).context("Duration too large")
}

/// Parse "YYYY-MM" into (year, month).
pub fn parse_month(input: &str) -> Result<(i32, u32)> {
    let date = NaiveDate::parse_from_str(&format!("{}-01", input.trim()), "%Y-%m-%d")
        .map_err(|_| anyhow::anyhow!("Invalid month \"{}\". Expected YYYY-MM", input))?;
    Ok((date.year(), date.month()))
}
