//! Input checks shared by single events and medication schedules.

use crate::constants::{MAX_DURATION_DAYS, MAX_TIMES_PER_DAY};
use crate::error::ValidationError;
use crate::event::TimeOfDay;

pub fn title(title: &str) -> Result<String, ValidationError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(ValidationError::MissingTitle);
    }
    Ok(title.to_string())
}

pub fn duration_days(days: u32) -> Result<u32, ValidationError> {
    if days == 0 || days > MAX_DURATION_DAYS {
        return Err(ValidationError::DurationOutOfRange {
            max: MAX_DURATION_DAYS,
            got: days,
        });
    }
    Ok(days)
}

/// Parse a schedule's reminder times, keeping their order.
///
/// Blank entries are dropped. Duplicates are kept: each entry produces its own
/// occurrence.
pub fn reminder_times(times: &[String]) -> Result<Vec<TimeOfDay>, ValidationError> {
    let parsed = times
        .iter()
        .filter(|t| !t.trim().is_empty())
        .map(|t| t.parse::<TimeOfDay>())
        .collect::<Result<Vec<_>, _>>()?;

    if parsed.is_empty() {
        return Err(ValidationError::NoTimes);
    }
    if parsed.len() > MAX_TIMES_PER_DAY {
        return Err(ValidationError::TooManyTimes {
            max: MAX_TIMES_PER_DAY,
            got: parsed.len(),
        });
    }

    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn times(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn title_is_trimmed_and_required() {
        assert_eq!(title("  Dentist ").unwrap(), "Dentist");
        assert_eq!(title(" \t"), Err(ValidationError::MissingTitle));
    }

    #[test]
    fn duration_bounds() {
        assert!(duration_days(1).is_ok());
        assert!(duration_days(365).is_ok());
        assert_eq!(
            duration_days(0),
            Err(ValidationError::DurationOutOfRange { max: 365, got: 0 })
        );
        assert!(duration_days(366).is_err());
    }

    #[test]
    fn blank_times_are_dropped() {
        let parsed = reminder_times(&times(&["08:00", "", "  ", "20:00"])).unwrap();
        let rendered: Vec<_> = parsed.iter().map(|t| t.to_string()).collect();
        assert_eq!(rendered, ["08:00", "20:00"]);
    }

    #[test]
    fn all_blank_times_is_an_error() {
        assert_eq!(reminder_times(&times(&["", " "])), Err(ValidationError::NoTimes));
        assert_eq!(reminder_times(&[]), Err(ValidationError::NoTimes));
    }

    #[test]
    fn duplicates_are_kept() {
        let parsed = reminder_times(&times(&["08:00", "08:00"])).unwrap();
        assert_eq!(parsed.len(), 2);
    }

    #[test]
    fn more_than_four_times_is_an_error() {
        let result = reminder_times(&times(&["06:00", "10:00", "14:00", "18:00", "22:00"]));
        assert_eq!(result, Err(ValidationError::TooManyTimes { max: 4, got: 5 }));
    }

    #[test]
    fn malformed_time_is_reported() {
        assert_eq!(
            reminder_times(&times(&["08:00", "8pm"])),
            Err(ValidationError::InvalidTime("8pm".to_string()))
        );
    }
}
