//! Care recipients ("profiles") that events can be assigned to.
//!
//! The scheduling engine only reads the directory: to turn a profile id into a
//! display label, and to check that an event's profile id is known.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::utils::non_blank;

/// Label shown for events that are not assigned to anyone.
pub const UNASSIGNED_LABEL: &str = "Unassigned";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileId(pub String);

impl ProfileId {
    pub fn generate() -> Self {
        ProfileId(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProfileId {
    fn from(s: &str) -> Self {
        ProfileId(s.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relationship {
    Parent,
    Grandparent,
    Spouse,
    Relative,
    Friend,
    Client,
    Other,
}

impl Relationship {
    pub const ALL: [Relationship; 7] = [
        Relationship::Parent,
        Relationship::Grandparent,
        Relationship::Spouse,
        Relationship::Relative,
        Relationship::Friend,
        Relationship::Client,
        Relationship::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Relationship::Parent => "parent",
            Relationship::Grandparent => "grandparent",
            Relationship::Spouse => "spouse",
            Relationship::Relative => "relative",
            Relationship::Friend => "friend",
            Relationship::Client => "client",
            Relationship::Other => "other",
        }
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Relationship {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Relationship::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                let names: Vec<_> = Relationship::ALL.iter().map(|r| r.as_str()).collect();
                format!("Unknown relationship '{s}'. Expected one of: {}", names.join(", "))
            })
    }
}

/// A person being cared for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareProfile {
    pub id: ProfileId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationship: Option<Relationship>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Fields for a profile that hasn't been added yet.
#[derive(Debug, Clone, Default)]
pub struct NewProfile {
    pub name: String,
    pub relationship: Option<Relationship>,
    pub birth_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// Which events a query should include.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ProfileFilter {
    /// No restriction (the "all" sentinel)
    #[default]
    All,
    Profile(ProfileId),
}

impl ProfileFilter {
    pub fn matches(&self, profile_id: Option<&ProfileId>) -> bool {
        match self {
            ProfileFilter::All => true,
            ProfileFilter::Profile(wanted) => profile_id == Some(wanted),
        }
    }
}

impl FromStr for ProfileFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            Ok(ProfileFilter::All)
        } else {
            Ok(ProfileFilter::Profile(ProfileId::from(s)))
        }
    }
}

impl fmt::Display for ProfileFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileFilter::All => write!(f, "all"),
            ProfileFilter::Profile(id) => write!(f, "{id}"),
        }
    }
}

/// Ordered roster of care profiles.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileDirectory {
    #[serde(default, rename = "profile")]
    profiles: Vec<CareProfile>,
}

impl ProfileDirectory {
    pub fn new(profiles: Vec<CareProfile>) -> Self {
        ProfileDirectory { profiles }
    }

    pub fn profiles(&self) -> &[CareProfile] {
        &self.profiles
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn get(&self, id: &ProfileId) -> Option<&CareProfile> {
        self.profiles.iter().find(|p| &p.id == id)
    }

    pub fn contains(&self, id: &ProfileId) -> bool {
        self.get(id).is_some()
    }

    /// Resolve a profile id to something a person can read.
    ///
    /// Unassigned events get [`UNASSIGNED_LABEL`]; ids that are no longer in the
    /// roster fall back to the raw id.
    pub fn label(&self, id: Option<&ProfileId>) -> String {
        match id {
            None => UNASSIGNED_LABEL.to_string(),
            Some(id) => self
                .get(id)
                .map(|p| p.name.clone())
                .unwrap_or_else(|| id.to_string()),
        }
    }

    /// Display name for a filter, or None for "all".
    pub fn filter_label(&self, filter: &ProfileFilter) -> Option<String> {
        match filter {
            ProfileFilter::All => None,
            ProfileFilter::Profile(id) => Some(self.label(Some(id))),
        }
    }

    /// Find a profile by id, or by case-insensitive name.
    pub fn find(&self, key: &str) -> Option<&CareProfile> {
        let key = key.trim();
        self.profiles
            .iter()
            .find(|p| p.id.as_str() == key)
            .or_else(|| self.profiles.iter().find(|p| p.name.eq_ignore_ascii_case(key)))
    }

    /// Check that an event's profile reference points at a known profile.
    pub fn validate(&self, id: Option<&ProfileId>) -> Result<(), ValidationError> {
        match id {
            Some(id) if !self.contains(id) => Err(ValidationError::UnknownProfile(id.to_string())),
            _ => Ok(()),
        }
    }

    pub fn add(&mut self, new: NewProfile) -> Result<&CareProfile, ValidationError> {
        let name = non_blank(Some(new.name)).ok_or(ValidationError::MissingName)?;

        self.profiles.push(CareProfile {
            id: ProfileId::generate(),
            name,
            relationship: new.relationship,
            birth_date: new.birth_date,
            notes: non_blank(new.notes),
            created_at: Utc::now(),
        });

        let added = self.profiles.len() - 1;
        Ok(&self.profiles[added])
    }

    /// Remove a profile. Events assigned to it are left alone.
    pub fn remove(&mut self, id: &ProfileId) -> Option<CareProfile> {
        let index = self.profiles.iter().position(|p| &p.id == id)?;
        Some(self.profiles.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory() -> ProfileDirectory {
        let mut dir = ProfileDirectory::default();
        dir.add(NewProfile {
            name: "Grandma Rose".to_string(),
            relationship: Some(Relationship::Grandparent),
            ..Default::default()
        })
        .unwrap();
        dir
    }

    #[test]
    fn label_resolves_known_unknown_and_unassigned() {
        let dir = directory();
        let id = dir.profiles()[0].id.clone();

        assert_eq!(dir.label(Some(&id)), "Grandma Rose");
        assert_eq!(dir.label(None), UNASSIGNED_LABEL);
        assert_eq!(dir.label(Some(&ProfileId::from("gone"))), "gone");
    }

    #[test]
    fn validate_accepts_unassigned_and_known_ids() {
        let dir = directory();
        let id = dir.profiles()[0].id.clone();

        assert!(dir.validate(None).is_ok());
        assert!(dir.validate(Some(&id)).is_ok());
        assert_eq!(
            dir.validate(Some(&ProfileId::from("42"))),
            Err(ValidationError::UnknownProfile("42".to_string()))
        );
    }

    #[test]
    fn add_rejects_blank_name() {
        let mut dir = ProfileDirectory::default();
        let result = dir.add(NewProfile {
            name: "   ".to_string(),
            ..Default::default()
        });
        assert!(result.is_err());
        assert!(dir.is_empty());
    }

    #[test]
    fn find_by_id_or_name() {
        let dir = directory();
        let id = dir.profiles()[0].id.clone();

        assert_eq!(dir.find(id.as_str()).map(|p| p.name.as_str()), Some("Grandma Rose"));
        assert_eq!(dir.find("grandma rose").map(|p| &p.id), Some(&id));
        assert!(dir.find("Grandpa Joe").is_none());
    }

    #[test]
    fn remove_keeps_order_of_the_rest() {
        let mut dir = directory();
        dir.add(NewProfile {
            name: "Uncle Tom".to_string(),
            ..Default::default()
        })
        .unwrap();
        dir.add(NewProfile {
            name: "Aunt May".to_string(),
            ..Default::default()
        })
        .unwrap();

        let tom = dir.find("Uncle Tom").unwrap().id.clone();
        let removed = dir.remove(&tom).unwrap();

        assert_eq!(removed.name, "Uncle Tom");
        let names: Vec<_> = dir.profiles().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Grandma Rose", "Aunt May"]);
        assert!(dir.remove(&tom).is_none());
    }

    #[test]
    fn filter_parses_all_sentinel() {
        assert_eq!("all".parse::<ProfileFilter>().unwrap(), ProfileFilter::All);
        assert_eq!("ALL".parse::<ProfileFilter>().unwrap(), ProfileFilter::All);
        assert_eq!(
            "17".parse::<ProfileFilter>().unwrap(),
            ProfileFilter::Profile(ProfileId::from("17"))
        );
    }

    #[test]
    fn filter_matches_by_identity() {
        let filter = ProfileFilter::Profile(ProfileId::from("1"));
        assert!(filter.matches(Some(&ProfileId::from("1"))));
        assert!(!filter.matches(Some(&ProfileId::from("2"))));
        assert!(!filter.matches(None));
        assert!(ProfileFilter::All.matches(None));
    }
}
