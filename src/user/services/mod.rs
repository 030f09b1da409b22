//! Application services for profile upkeep.

mod profile;

pub use profile::{
    ProfileService, ProfileServiceError, ProfileServiceResult, UpdateProfile,
};
