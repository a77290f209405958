//! Core types for carecal, a care-coordination calendar.
//!
//! This crate provides the event scheduling engine used by carecal-cli:
//! - `Event` and input types for appointments and medication schedules
//! - `store` for the copy-on-write event store
//! - `recurrence` for expanding medication schedules into occurrences
//! - `query` for "what's on day D" and "what's coming up" lookups
//! - `profile` for the care recipients events are assigned to

pub mod carecal;
pub mod carecal_config;
pub mod constants;
pub mod error;
pub mod event;
pub mod profile;
pub mod query;
pub mod recurrence;
pub mod store;
mod utils;
mod validate;

// Re-export the main types at crate root for convenience
pub use error::{CareCalError, CareCalResult, ValidationError};
pub use event::*;
pub use profile::{CareProfile, NewProfile, ProfileDirectory, ProfileFilter, ProfileId, Relationship};
pub use store::{DeletionScope, EventStore, Snapshot};
