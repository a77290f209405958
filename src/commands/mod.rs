pub mod add;
pub mod config;
pub mod day;
pub mod delete;
pub mod edit;
pub mod medication;
pub mod month;
pub mod profiles;
pub mod upcoming;

use anyhow::Result;
use carecal_core::carecal::Carecal;
use carecal_core::{EventId, EventStore, ProfileDirectory, ProfileFilter, ProfileId, Snapshot};
use tracing::debug;

use crate::render::short_id;

/// Everything a command needs, loaded once per run.
pub struct Session {
    pub carecal: Carecal,
    pub store: EventStore,
    pub profiles: ProfileDirectory,
}

impl Session {
    pub fn load() -> Result<Self> {
        let carecal = Carecal::load()?;
        let store = carecal.load_store()?;
        let profiles = carecal.load_profiles()?;
        debug!(
            events = store.len(),
            profiles = profiles.profiles().len(),
            data_dir = %carecal.data_path().display(),
            "Loaded session"
        );

        Ok(Session {
            carecal,
            store,
            profiles,
        })
    }

    pub fn save_events(&self, snapshot: &Snapshot) -> Result<()> {
        self.carecal.save_snapshot(snapshot)?;
        Ok(())
    }

    pub fn save_profiles(&self) -> Result<()> {
        self.carecal.save_profiles(&self.profiles)?;
        Ok(())
    }

    pub fn filter(&self, profile_arg: Option<&str>) -> Result<ProfileFilter> {
        Ok(self.carecal.resolve_filter(profile_arg, &self.profiles)?)
    }

    /// Resolve a `--profile` argument for a new or edited event.
    ///
    /// "none" and "unassigned" mean no profile.
    pub fn profile_id(&self, arg: &str) -> Result<Option<ProfileId>> {
        let arg = arg.trim();
        if arg.eq_ignore_ascii_case("none") || arg.eq_ignore_ascii_case("unassigned") {
            return Ok(None);
        }

        match self.profiles.find(arg) {
            Some(profile) => Ok(Some(profile.id.clone())),
            None => {
                let available: Vec<_> = self.profiles.profiles().iter().map(|p| p.name.as_str()).collect();
                if available.is_empty() {
                    anyhow::bail!(
                        "Profile '{}' not found. Add one first with:\n  carecal profiles add <name>",
                        arg
                    );
                }
                anyhow::bail!("Profile '{}' not found. Available: {}", arg, available.join(", "))
            }
        }
    }

    /// Find an event by id, by the short id printed in listings, or by a unique
    /// id prefix.
    pub fn event_id(&self, arg: &str) -> Result<EventId> {
        let arg = arg.trim();
        let exact = EventId::from(arg);
        if self.store.get(&exact).is_some() {
            return Ok(exact);
        }

        let snapshot = self.store.snapshot();
        let by_short_id: Vec<_> = snapshot.iter().filter(|e| short_id(e) == arg).collect();
        if let [event] = by_short_id.as_slice() {
            return Ok(event.id.clone());
        }

        let matches: Vec<_> = snapshot
            .iter()
            .filter(|e| e.id.as_str().starts_with(arg))
            .map(|e| e.id.clone())
            .collect();

        match matches.as_slice() {
            [id] => Ok(id.clone()),
            [] => anyhow::bail!("Event '{}' not found", arg),
            _ => anyhow::bail!("Event id '{}' is ambiguous ({} matches)", arg, matches.len()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carecal_core::carecal_config::CarecalConfig;
    use carecal_core::{EventDraft, MedicationTemplate};
    use chrono::NaiveDate;

    fn session() -> Session {
        Session {
            carecal: Carecal::with_config(CarecalConfig::default()),
            store: EventStore::new(),
            profiles: ProfileDirectory::default(),
        }
    }

    fn medication() -> MedicationTemplate {
        MedicationTemplate {
            title: "Amoxicillin".to_string(),
            start_date: NaiveDate::from_ymd_opt(2024, 3, 1),
            duration_days: 3,
            times: vec!["08:00".to_string(), "20:00".to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn printed_short_ids_resolve_to_their_event() {
        let mut session = session();
        session
            .store
            .save(
                EventDraft {
                    title: "Dentist".to_string(),
                    date: NaiveDate::from_ymd_opt(2024, 3, 2),
                    time: Some("10:00".parse().unwrap()),
                    ..Default::default()
                }
                .into(),
                None,
                &session.profiles,
            )
            .unwrap();
        session.store.save(medication().into(), None, &session.profiles).unwrap();

        let snapshot = session.store.snapshot();
        assert_eq!(snapshot.len(), 7);
        for event in snapshot.iter() {
            assert_eq!(session.event_id(&short_id(event)).unwrap(), event.id);
        }
    }

    #[test]
    fn detached_occurrence_resolves_by_its_short_id() {
        let mut session = session();
        let snapshot = session.store.save(medication().into(), None, &session.profiles).unwrap();
        let detached = snapshot[2].id.clone();

        let mut draft = EventDraft::from_event(&snapshot[2]);
        draft.title = "Amoxicillin (with food)".to_string();
        let snapshot = session.store.save(draft.into(), Some(&detached), &session.profiles).unwrap();

        for event in snapshot.iter() {
            assert_eq!(session.event_id(&short_id(event)).unwrap(), event.id);
        }
    }

    #[test]
    fn full_ids_and_prefixes_still_work() {
        let mut session = session();
        let snapshot = session.store.save(medication().into(), None, &session.profiles).unwrap();
        let id = snapshot[5].id.clone();

        assert_eq!(session.event_id(id.as_str()).unwrap(), id);
        assert!(session.event_id("no-such-event").is_err());

        // The lineage prefix alone is shared by every occurrence
        let lineage_prefix: String = id.as_str().chars().take(8).collect();
        assert!(session.event_id(&lineage_prefix).is_err());
    }
}
