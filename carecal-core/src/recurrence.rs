//! Medication schedule expansion.
//!
//! Expands a [`MedicationTemplate`] into one concrete occurrence per
//! (day, reminder time), and collapses a lineage of occurrences back into the
//! template that produced it.

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};

use crate::error::ValidationError;
use crate::event::{Event, EventId, EventKind, Frequency, LineageId, MedicationTemplate, Origin};
use crate::utils::non_blank;
use crate::validate;

/// Id of the occurrence on `day_index` at the `time_index`-th reminder time.
///
/// Deterministic, so expanding the same template under the same lineage twice
/// yields identical events.
pub fn occurrence_id(lineage_id: &LineageId, day_index: u32, time_index: usize) -> EventId {
    EventId(format!("{}-{}-{}", lineage_id, day_index, time_index))
}

/// Expand a medication template into its occurrences.
///
/// Days are walked from the start date one calendar day at a time (the template's
/// frequency does not change the stride), and within a day reminder times are
/// emitted in the order given. The result has `duration_days * times` events.
pub fn expand(
    template: &MedicationTemplate,
    lineage_id: &LineageId,
) -> Result<Vec<Event>, ValidationError> {
    let title = validate::title(&template.title)?;
    let start = template.start_date.ok_or(ValidationError::MissingDate)?;
    let duration = validate::duration_days(template.duration_days)?;
    let times = validate::reminder_times(&template.times)?;

    let location = non_blank(template.location.clone());
    let description = non_blank(template.description.clone());

    let mut events = Vec::with_capacity(duration as usize * times.len());

    for day_index in 0..duration {
        let date = start
            .checked_add_days(Days::new(day_index as u64))
            .ok_or(ValidationError::DateOutOfRange)?;

        for (time_index, time) in times.iter().enumerate() {
            events.push(Event {
                id: occurrence_id(lineage_id, day_index, time_index),
                title: title.clone(),
                date,
                time: *time,
                location: location.clone(),
                description: description.clone(),
                kind: EventKind::Medication,
                profile_id: template.profile_id.clone(),
                origin: Origin::Occurrence {
                    parent_id: lineage_id.clone(),
                    day_index,
                    time_index,
                    frequency: template.frequency,
                },
            });
        }
    }

    Ok(events)
}

/// Rebuild the template behind a lineage from its remaining occurrences.
///
/// Works even after single occurrences were deleted: the start date and duration
/// come from the recorded day indices, the reminder times from the time indices.
/// Returns None if the slice holds no occurrences.
pub fn collapse<'a, I>(occurrences: I) -> Option<MedicationTemplate>
where
    I: IntoIterator<Item = &'a Event>,
{
    let mut first: Option<&Event> = None;
    let mut start: Option<NaiveDate> = None;
    let mut last_day = 0u32;
    let mut times = BTreeMap::new();
    let mut frequency = Frequency::default();

    for event in occurrences {
        let Origin::Occurrence {
            day_index,
            time_index,
            frequency: occurrence_frequency,
            ..
        } = &event.origin
        else {
            continue;
        };

        let day_start = event.date.checked_sub_days(Days::new(*day_index as u64))?;
        start = Some(start.map_or(day_start, |s| s.min(day_start)));
        last_day = last_day.max(*day_index);
        times.entry(*time_index).or_insert(event.time);
        if first.is_none() {
            frequency = *occurrence_frequency;
            first = Some(event);
        }
    }

    let first = first?;

    Some(MedicationTemplate {
        title: first.title.clone(),
        start_date: start,
        frequency,
        duration_days: last_day + 1,
        times: times.values().map(|t| t.to_string()).collect(),
        location: first.location.clone(),
        description: first.description.clone(),
        profile_id: first.profile_id.clone(),
    })
}
