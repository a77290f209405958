//! Carecal data directory: configuration plus the saved events and profiles.
//!
//! The scheduling engine itself is purely in-memory. This is the host side that
//! keeps a snapshot around between runs: `events.json` holds the events in store
//! order, `profiles.toml` the care profile roster. Missing files mean "nothing yet".

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use tracing::debug;

use crate::carecal_config::CarecalConfig;
use crate::error::{CareCalError, CareCalResult};
use crate::event::Event;
use crate::profile::{ProfileDirectory, ProfileFilter};
use crate::store::{EventStore, Snapshot};

const EVENTS_FILE: &str = "events.json";
const PROFILES_FILE: &str = "profiles.toml";

#[derive(Clone)]
pub struct Carecal {
    config: CarecalConfig,
}

impl Carecal {
    pub fn load() -> CareCalResult<Self> {
        let config_path = CarecalConfig::config_path()?;

        if !config_path.exists() {
            CarecalConfig::create_default_config(&config_path)?;
        }

        let config: CarecalConfig = Config::builder()
            .add_source(File::from(config_path).required(false))
            .add_source(Environment::with_prefix("CARECAL").try_parsing(true))
            .build()
            .map_err(|e| CareCalError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| CareCalError::Config(e.to_string()))?;

        Ok(Carecal { config })
    }

    pub fn with_config(config: CarecalConfig) -> Self {
        Carecal { config }
    }

    pub fn config(&self) -> &CarecalConfig {
        &self.config
    }

    pub fn data_path(&self) -> PathBuf {
        let full_path_str =
            shellexpand::tilde(&self.config.data_dir.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    pub fn events_path(&self) -> PathBuf {
        self.data_path().join(EVENTS_FILE)
    }

    pub fn profiles_path(&self) -> PathBuf {
        self.data_path().join(PROFILES_FILE)
    }

    pub fn load_store(&self) -> CareCalResult<EventStore> {
        let path = self.events_path();
        if !path.exists() {
            return Ok(EventStore::new());
        }

        let content = std::fs::read_to_string(&path)?;
        let events: Vec<Event> = serde_json::from_str(&content).map_err(|e| {
            CareCalError::Serialization(format!("{}: {}", path.display(), e))
        })?;

        debug!(count = events.len(), path = %path.display(), "Loaded events");
        Ok(EventStore::from_events(events))
    }

    pub fn save_snapshot(&self, snapshot: &Snapshot) -> CareCalResult<()> {
        let path = self.events_path();
        let content = serde_json::to_string_pretty(snapshot.events())
            .map_err(|e| CareCalError::Serialization(e.to_string()))?;

        write_file(&path, &content)?;
        debug!(count = snapshot.len(), path = %path.display(), "Saved events");
        Ok(())
    }

    pub fn load_profiles(&self) -> CareCalResult<ProfileDirectory> {
        let path = self.profiles_path();
        if !path.exists() {
            return Ok(ProfileDirectory::default());
        }

        let content = std::fs::read_to_string(&path)?;
        toml::from_str(&content)
            .map_err(|e| CareCalError::Serialization(format!("{}: {}", path.display(), e)))
    }

    pub fn save_profiles(&self, profiles: &ProfileDirectory) -> CareCalResult<()> {
        let content = toml::to_string_pretty(profiles)
            .map_err(|e| CareCalError::Serialization(e.to_string()))?;
        write_file(&self.profiles_path(), &content)
    }

    /// Resolve a `--profile` argument (or the configured default) to a filter.
    ///
    /// Accepts "all", a profile id, or a profile name.
    pub fn resolve_filter(
        &self,
        arg: Option<&str>,
        profiles: &ProfileDirectory,
    ) -> CareCalResult<ProfileFilter> {
        let Some(key) = arg.or(self.config.default_profile.as_deref()) else {
            return Ok(ProfileFilter::All);
        };

        match key.parse::<ProfileFilter>() {
            Ok(ProfileFilter::All) => Ok(ProfileFilter::All),
            _ => profiles
                .find(key)
                .map(|p| ProfileFilter::Profile(p.id.clone()))
                .ok_or_else(|| CareCalError::ProfileNotFound(key.to_string())),
        }
    }
}

fn write_file(path: &Path, content: &str) -> CareCalResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{EventDraft, MedicationTemplate};
    use crate::profile::NewProfile;
    use chrono::NaiveDate;

    fn carecal_in(dir: &Path) -> Carecal {
        Carecal::with_config(CarecalConfig {
            data_dir: dir.join("data"),
            ..Default::default()
        })
    }

    #[test]
    fn missing_files_mean_empty_store_and_roster() {
        let dir = tempfile::tempdir().unwrap();
        let carecal = carecal_in(dir.path());

        assert!(carecal.load_store().unwrap().is_empty());
        assert!(carecal.load_profiles().unwrap().is_empty());
    }

    #[test]
    fn events_and_profiles_survive_a_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let carecal = carecal_in(dir.path());

        let mut profiles = ProfileDirectory::default();
        let mom = profiles
            .add(NewProfile {
                name: "Mom".to_string(),
                birth_date: NaiveDate::from_ymd_opt(1948, 5, 2),
                ..Default::default()
            })
            .unwrap()
            .id
            .clone();

        let mut store = EventStore::new();
        store
            .save(
                EventDraft {
                    title: "Eye exam".to_string(),
                    date: NaiveDate::from_ymd_opt(2024, 4, 9),
                    time: Some("14:15".parse().unwrap()),
                    profile_id: Some(mom.clone()),
                    ..Default::default()
                }
                .into(),
                None,
                &profiles,
            )
            .unwrap();
        let snapshot = store
            .save(
                MedicationTemplate {
                    title: "Warfarin".to_string(),
                    start_date: NaiveDate::from_ymd_opt(2024, 4, 1),
                    duration_days: 2,
                    times: vec!["08:00".to_string(), "20:00".to_string()],
                    profile_id: Some(mom),
                    ..Default::default()
                }
                .into(),
                None,
                &profiles,
            )
            .unwrap();

        carecal.save_snapshot(&snapshot).unwrap();
        carecal.save_profiles(&profiles).unwrap();

        assert_eq!(carecal.load_store().unwrap().snapshot(), snapshot);
        assert_eq!(carecal.load_profiles().unwrap(), profiles);
    }

    #[test]
    fn corrupt_events_file_is_a_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let carecal = carecal_in(dir.path());
        write_file(&carecal.events_path(), "{ not json").unwrap();

        assert!(matches!(carecal.load_store(), Err(CareCalError::Serialization(_))));
    }

    #[test]
    fn resolve_filter_by_name_id_or_all() {
        let dir = tempfile::tempdir().unwrap();
        let carecal = carecal_in(dir.path());
        let mut profiles = ProfileDirectory::default();
        let dad = profiles
            .add(NewProfile {
                name: "Dad".to_string(),
                ..Default::default()
            })
            .unwrap()
            .id
            .clone();

        assert_eq!(carecal.resolve_filter(None, &profiles).unwrap(), ProfileFilter::All);
        assert_eq!(carecal.resolve_filter(Some("all"), &profiles).unwrap(), ProfileFilter::All);
        assert_eq!(
            carecal.resolve_filter(Some("dad"), &profiles).unwrap(),
            ProfileFilter::Profile(dad.clone())
        );
        assert_eq!(
            carecal.resolve_filter(Some(dad.as_str()), &profiles).unwrap(),
            ProfileFilter::Profile(dad)
        );
        assert!(matches!(
            carecal.resolve_filter(Some("Aunt Sue"), &profiles),
            Err(CareCalError::ProfileNotFound(_))
        ));
    }

    #[test]
    fn resolve_filter_falls_back_to_configured_default() {
        let mut profiles = ProfileDirectory::default();
        let mom = profiles
            .add(NewProfile {
                name: "Mom".to_string(),
                ..Default::default()
            })
            .unwrap()
            .id
            .clone();

        let carecal = Carecal::with_config(CarecalConfig {
            default_profile: Some("Mom".to_string()),
            ..Default::default()
        });

        assert_eq!(
            carecal.resolve_filter(None, &profiles).unwrap(),
            ProfileFilter::Profile(mom)
        );
        assert_eq!(carecal.resolve_filter(Some("all"), &profiles).unwrap(), ProfileFilter::All);
    }
}
