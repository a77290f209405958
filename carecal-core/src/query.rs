//! Read-only queries over an event snapshot.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use crate::event::Event;
use crate::profile::ProfileFilter;

/// Events on exactly `day` that pass the profile filter, in store order.
pub fn events_on_date<'a>(
    events: &'a [Event],
    day: NaiveDate,
    filter: &ProfileFilter,
) -> Vec<&'a Event> {
    events
        .iter()
        .filter(|e| e.date == day)
        .filter(|e| filter.matches(e.profile_id.as_ref()))
        .collect()
}

/// The next `limit` events from `today` onwards, earliest first.
///
/// Inclusion is decided by day only, so events earlier today still count. Events
/// at the same date and time keep their store order.
pub fn upcoming<'a>(
    events: &'a [Event],
    today: NaiveDate,
    filter: &ProfileFilter,
    limit: usize,
) -> Vec<&'a Event> {
    let mut matching: Vec<&Event> = events
        .iter()
        .filter(|e| e.date >= today)
        .filter(|e| filter.matches(e.profile_id.as_ref()))
        .collect();

    matching.sort_by_key(|e| e.starts_at());
    matching.truncate(limit);
    matching
}

/// Number of matching events on each day of a month that has any.
///
/// Returns an empty map for an invalid month.
pub fn event_counts_by_day(
    events: &[Event],
    year: i32,
    month: u32,
    filter: &ProfileFilter,
) -> BTreeMap<NaiveDate, usize> {
    let mut counts = BTreeMap::new();

    for event in events
        .iter()
        .filter(|e| e.date.year() == year && e.date.month() == month)
        .filter(|e| filter.matches(e.profile_id.as_ref()))
    {
        *counts.entry(event.date).or_insert(0) += 1;
    }

    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_UPCOMING_LIMIT;
    use crate::event::{EventId, EventKind, Origin};
    use crate::profile::ProfileId;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn event(id: &str, day: NaiveDate, time: &str, profile: Option<&str>) -> Event {
        Event {
            id: EventId::from(id),
            title: format!("Event {id}"),
            date: day,
            time: time.parse().unwrap(),
            location: None,
            description: None,
            kind: EventKind::Appointment,
            profile_id: profile.map(ProfileId::from),
            origin: Origin::Single,
        }
    }

    fn ids(events: &[&Event]) -> Vec<String> {
        events.iter().map(|e| e.id.to_string()).collect()
    }

    fn profile(id: &str) -> ProfileFilter {
        ProfileFilter::Profile(ProfileId::from(id))
    }

    fn sample() -> Vec<Event> {
        vec![
            event("a", date(2024, 1, 1), "10:00", Some("1")),
            event("b", date(2024, 1, 2), "09:00", Some("2")),
            event("c", date(2024, 1, 1), "08:00", None),
            event("d", date(2023, 12, 31), "23:00", Some("1")),
            event("e", date(2024, 1, 1), "07:00", Some("2")),
        ]
    }

    #[test]
    fn on_date_keeps_store_order() {
        let events = sample();
        let found = events_on_date(&events, date(2024, 1, 1), &ProfileFilter::All);
        assert_eq!(ids(&found), ["a", "c", "e"]);
    }

    #[test]
    fn on_date_with_profile_is_subset_of_all() {
        let events = sample();
        let all = events_on_date(&events, date(2024, 1, 1), &ProfileFilter::All);

        for p in ["1", "2", "3"] {
            let filtered = events_on_date(&events, date(2024, 1, 1), &profile(p));
            assert!(filtered.iter().all(|e| all.iter().any(|a| a.id == e.id)));
            assert!(filtered.iter().all(|e| e.profile_id == Some(ProfileId::from(p))));
        }
        assert_eq!(ids(&events_on_date(&events, date(2024, 1, 1), &profile("2"))), ["e"]);
    }

    #[test]
    fn on_date_with_no_matches_is_empty() {
        let events = sample();
        assert!(events_on_date(&events, date(2025, 6, 1), &ProfileFilter::All).is_empty());
    }

    #[test]
    fn upcoming_orders_same_day_by_time() {
        let events = vec![
            event("ten", date(2024, 1, 1), "10:00", Some("1")),
            event("eight", date(2024, 1, 1), "08:00", Some("1")),
        ];

        let next = upcoming(&events, date(2024, 1, 1), &ProfileFilter::All, DEFAULT_UPCOMING_LIMIT);
        assert_eq!(ids(&next), ["eight", "ten"]);
    }

    #[test]
    fn upcoming_skips_past_days_but_keeps_today() {
        let events = sample();
        let next = upcoming(&events, date(2024, 1, 1), &ProfileFilter::All, 10);
        assert_eq!(ids(&next), ["e", "c", "a", "b"]);
    }

    #[test]
    fn upcoming_applies_profile_filter() {
        let events = sample();
        let next = upcoming(&events, date(2024, 1, 1), &profile("1"), 10);
        assert_eq!(ids(&next), ["a"]);
    }

    #[test]
    fn upcoming_respects_limit_and_order() {
        let mut events = Vec::new();
        for day in 1..=20 {
            for (i, t) in ["21:00", "06:30"].iter().enumerate() {
                events.push(event(&format!("{day}-{i}"), date(2024, 3, day), t, None));
            }
        }

        for limit in [0, 1, 5, 10, 100] {
            let next = upcoming(&events, date(2024, 3, 5), &ProfileFilter::All, limit);
            assert!(next.len() <= limit);
            assert!(next.windows(2).all(|w| w[0].starts_at() <= w[1].starts_at()));
        }

        let next = upcoming(&events, date(2024, 3, 5), &ProfileFilter::All, 3);
        assert_eq!(ids(&next), ["5-1", "5-0", "6-1"]);
    }

    #[test]
    fn upcoming_with_nothing_ahead_is_empty() {
        let events = sample();
        assert!(upcoming(&events, date(2030, 1, 1), &ProfileFilter::All, 10).is_empty());
    }

    #[test]
    fn counts_by_day_within_month() {
        let events = sample();
        let counts = event_counts_by_day(&events, 2024, 1, &ProfileFilter::All);

        assert_eq!(counts.len(), 2);
        assert_eq!(counts[&date(2024, 1, 1)], 3);
        assert_eq!(counts[&date(2024, 1, 2)], 1);

        let for_one = event_counts_by_day(&events, 2024, 1, &profile("1"));
        assert_eq!(for_one.get(&date(2024, 1, 1)), Some(&1));
        assert!(event_counts_by_day(&events, 2024, 13, &ProfileFilter::All).is_empty());
    }
}
