//! Profile extraction from captured social-platform HTML.
//!
//! Everything here is synchronous and pure: callers hand over a URL and the
//! page markup, and get back a [`ProfileRecord`]. No network access happens.

pub mod coordinator;
pub mod count;
pub mod detect;
pub mod error;

mod fill;
mod html;
mod instagram;
mod linkedin;

pub use coordinator::{extract_profile, extract_profile_at, validate_request};
pub use count::{parse_count, CountStyle};
pub use detect::{detect_platform, is_supported, profile_handle, supported_platforms};
pub use error::ExtractError;
pub use spdb_core::{InstagramProfile, LinkedInProfile, Platform, ProfileRecord};
