//! Domain model for user profiles.

mod profile;

pub use profile::{PersistedProfileData, ProfileDomainError, UserProfile};
