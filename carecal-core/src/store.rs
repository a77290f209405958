//! In-memory event store with copy-on-write snapshots.
//!
//! The store owns the event collection. Every mutation builds a new collection and
//! swaps it in whole, so a [`Snapshot`] taken earlier never changes underneath its
//! holder, and a lineage edit (delete old occurrences, insert new ones) is seen as
//! a single transition.

use std::collections::HashSet;
use std::ops::Deref;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::ValidationError;
use crate::event::{Event, EventDraft, EventId, EventInput, LineageId, MedicationTemplate, Origin};
use crate::profile::ProfileDirectory;
use crate::recurrence;
use crate::utils::non_blank;
use crate::validate;

/// Immutable view of the store's events, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot(Arc<Vec<Event>>);

impl Snapshot {
    pub fn events(&self) -> &[Event] {
        &self.0
    }

    pub fn to_vec(&self) -> Vec<Event> {
        self.0.as_ref().clone()
    }

    /// Whether two snapshots are the very same collection (not just equal).
    pub fn ptr_eq(&self, other: &Snapshot) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Deref for Snapshot {
    type Target = [Event];

    fn deref(&self) -> &[Event] {
        &self.0
    }
}

impl From<Vec<Event>> for Snapshot {
    fn from(events: Vec<Event>) -> Self {
        Snapshot(Arc::new(events))
    }
}

/// What deleting a given event could affect, so the host can ask the right question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeletionScope {
    /// A one-off event; only it can be deleted.
    Single,
    /// One occurrence of a medication schedule with `lineage_size` occurrences left.
    Occurrence {
        parent_id: LineageId,
        lineage_size: usize,
    },
}

#[derive(Debug, Clone, Default)]
pub struct EventStore {
    snapshot: Snapshot,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from previously saved events.
    ///
    /// Later events with an id already seen are dropped, so the store never holds
    /// two events with the same id.
    pub fn from_events(events: Vec<Event>) -> Self {
        let mut seen = HashSet::new();
        let total = events.len();
        let events: Vec<Event> = events
            .into_iter()
            .filter(|e| seen.insert(e.id.clone()))
            .collect();

        if events.len() != total {
            warn!(dropped = total - events.len(), "Dropped events with duplicate ids");
        }

        EventStore {
            snapshot: Snapshot::from(events),
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        self.snapshot.clone()
    }

    pub fn len(&self) -> usize {
        self.snapshot.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot.is_empty()
    }

    pub fn get(&self, id: &EventId) -> Option<&Event> {
        self.snapshot.iter().find(|e| &e.id == id)
    }

    /// All occurrences of one medication schedule, in store order.
    pub fn lineage(&self, parent_id: &LineageId) -> Vec<&Event> {
        self.snapshot
            .iter()
            .filter(|e| e.parent_id() == Some(parent_id))
            .collect()
    }

    /// The template that produced a lineage, for pre-filling an edit.
    pub fn template_for(&self, parent_id: &LineageId) -> Option<MedicationTemplate> {
        recurrence::collapse(self.lineage(parent_id))
    }

    pub fn deletion_scope(&self, id: &EventId) -> Option<DeletionScope> {
        let event = self.get(id)?;
        Some(match event.parent_id() {
            None => DeletionScope::Single,
            Some(parent_id) => DeletionScope::Occurrence {
                parent_id: parent_id.clone(),
                lineage_size: self.lineage(parent_id).len(),
            },
        })
    }

    /// Create or replace events from caller input.
    ///
    /// - A single draft with `editing` replaces that event in place, keeping its id
    ///   and position; without `editing` it is appended under a fresh id.
    /// - A medication template is expanded. With `editing` pointing at an occurrence,
    ///   the whole lineage is replaced under the same lineage id; pointing at a single
    ///   event, that event is replaced by a new lineage. Otherwise the occurrences are
    ///   appended under a fresh lineage id.
    ///
    /// On error the store is left unchanged.
    pub fn save(
        &mut self,
        input: EventInput,
        editing: Option<&EventId>,
        profiles: &ProfileDirectory,
    ) -> Result<Snapshot, ValidationError> {
        let result = self.build(input, editing, profiles);

        match result {
            Ok(events) => {
                self.snapshot = Snapshot::from(events);
                Ok(self.snapshot())
            }
            Err(e) => {
                warn!(error = %e, "Rejected event save");
                Err(e)
            }
        }
    }

    /// Remove exactly one event. Unknown ids leave the store unchanged.
    pub fn remove(&mut self, id: &EventId) -> Snapshot {
        if self.get(id).is_none() {
            debug!(%id, "Remove of unknown event ignored");
            return self.snapshot();
        }

        let events = self
            .snapshot
            .iter()
            .filter(|e| &e.id != id)
            .cloned()
            .collect::<Vec<_>>();

        debug!(%id, "Removed event");
        self.snapshot = Snapshot::from(events);
        self.snapshot()
    }

    /// Remove every occurrence of a medication schedule.
    pub fn remove_group(&mut self, parent_id: &LineageId) -> Snapshot {
        let before = self.len();
        let events = self
            .snapshot
            .iter()
            .filter(|e| e.parent_id() != Some(parent_id))
            .cloned()
            .collect::<Vec<_>>();

        if events.len() == before {
            debug!(%parent_id, "Remove of unknown lineage ignored");
            return self.snapshot();
        }

        debug!(%parent_id, removed = before - events.len(), "Removed lineage");
        self.snapshot = Snapshot::from(events);
        self.snapshot()
    }

    /// Compute the next collection for a save without touching the store.
    fn build(
        &self,
        input: EventInput,
        editing: Option<&EventId>,
        profiles: &ProfileDirectory,
    ) -> Result<Vec<Event>, ValidationError> {
        let existing = match editing {
            Some(id) => Some(
                self.get(id)
                    .ok_or_else(|| ValidationError::UnknownEvent(id.to_string()))?,
            ),
            None => None,
        };

        // An edit that keeps the event's current profile is allowed even if that
        // profile has since been removed from the directory.
        if input.profile_id() != existing.and_then(|e| e.profile_id.as_ref()) {
            profiles.validate(input.profile_id())?;
        }

        match input {
            EventInput::Single(draft) => {
                let id = existing.map_or_else(EventId::generate, |e| e.id.clone());
                let event = single_event(id, draft)?;

                let events = match existing {
                    Some(old) => self
                        .snapshot
                        .iter()
                        .map(|e| if e.id == old.id { event.clone() } else { e.clone() })
                        .collect(),
                    None => {
                        let mut events = self.to_vec_with_capacity(1);
                        events.push(event.clone());
                        events
                    }
                };

                debug!(id = %event.id, replaced = existing.is_some(), "Saved event");
                Ok(events)
            }
            EventInput::Recurring(template) => {
                let lineage_id = existing
                    .and_then(|e| e.parent_id().cloned())
                    .unwrap_or_else(LineageId::generate);
                let occurrences = recurrence::expand(&template, &lineage_id)?;

                // Drop the old generation (or the single event being converted)
                let mut events: Vec<Event> = self
                    .snapshot
                    .iter()
                    .filter(|e| match existing {
                        Some(old) if old.is_recurring() => e.parent_id() != Some(&lineage_id),
                        Some(old) => e.id != old.id,
                        None => true,
                    })
                    .cloned()
                    .collect();
                let removed = self.len() - events.len();

                // A detached occurrence keeps its derived id, so the new generation
                // leaves that slot to it.
                let occurrences: Vec<Event> = {
                    let kept: HashSet<&EventId> = events.iter().map(|e| &e.id).collect();
                    occurrences
                        .into_iter()
                        .filter(|o| !kept.contains(&o.id))
                        .collect()
                };
                let count = occurrences.len();
                events.extend(occurrences);

                debug!(%lineage_id, count, removed, "Saved medication schedule");
                Ok(events)
            }
        }
    }

    fn to_vec_with_capacity(&self, extra: usize) -> Vec<Event> {
        let mut events = Vec::with_capacity(self.len() + extra);
        events.extend(self.snapshot.iter().cloned());
        events
    }
}

fn single_event(id: EventId, draft: EventDraft) -> Result<Event, ValidationError> {
    let title = validate::title(&draft.title)?;
    let date = draft.date.ok_or(ValidationError::MissingDate)?;
    let time = draft.time.ok_or(ValidationError::MissingTime)?;

    Ok(Event {
        id,
        title,
        date,
        time,
        location: non_blank(draft.location),
        description: non_blank(draft.description),
        kind: draft.kind,
        profile_id: draft.profile_id,
        origin: Origin::Single,
    })
}
