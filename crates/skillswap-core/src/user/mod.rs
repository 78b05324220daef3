//! User domain module.
//!
//! # Module Structure
//!
//! - `model`: viewer, user profile, auth payloads and profile updates
//!
//! # Usage
//!
//! ```ignore
//! use skillswap_core::user::{UserProfile, Viewer, ProfileUpdate};
//! ```

mod model;

// Re-export public API
pub use model::{
    ALLOWED_IMAGE_EXTENSIONS, AuthIdentity, Credentials, MAX_PROFILE_IMAGE_BYTES, MAX_SKILLS,
    ProfileImage, ProfileUpdate, SignupRequest, UserProfile, Viewer, normalize_skills,
};
