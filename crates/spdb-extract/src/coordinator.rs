//! Request validation and dispatch to the per-platform cascades.

use std::panic::{self, AssertUnwindSafe};

use chrono::{DateTime, Utc};
use scraper::Html;
use spdb_core::{InstagramProfile, LinkedInProfile, Platform, ProfileRecord};

use crate::detect::{detect_platform, profile_handle, supported_platforms};
use crate::error::ExtractError;
use crate::html::Page;
use crate::{instagram, linkedin};

pub const URL_REQUIRED: &str = "URL is required and must be a string";
pub const HTML_REQUIRED: &str = "HTML is required and must be a string";
pub const HTML_TOO_SHORT: &str = "HTML seems too short to be a valid page";

/// Checks a capture request and returns the detected platform.
///
/// Every problem is collected rather than stopping at the first, so clients
/// can fix a request in one round trip. `None` stands for a field that was
/// absent or not a string.
///
/// # Errors
///
/// Returns [`ExtractError::Validation`] listing each problem found.
pub fn validate_request(
    url: Option<&str>,
    html: Option<&str>,
    min_html_len: usize,
) -> Result<Platform, ExtractError> {
    let url = url.filter(|u| !u.trim().is_empty());
    let html = html.filter(|h| !h.is_empty());

    let mut errors = Vec::new();
    if url.is_none() {
        errors.push(URL_REQUIRED.to_string());
    }
    match html {
        None => errors.push(HTML_REQUIRED.to_string()),
        Some(h) if h.chars().take(min_html_len).count() < min_html_len => {
            errors.push(HTML_TOO_SHORT.to_string());
        }
        Some(_) => {}
    }

    let platform = url.and_then(detect_platform);
    if url.is_some() && platform.is_none() {
        errors.push(unsupported_url_message());
    }

    match platform {
        Some(platform) if errors.is_empty() => Ok(platform),
        _ => Err(ExtractError::Validation(errors)),
    }
}

fn unsupported_url_message() -> String {
    let names: Vec<&str> = supported_platforms()
        .iter()
        .copied()
        .map(Platform::as_str)
        .collect();
    format!("Unsupported URL. Supported platforms: {}", names.join(", "))
}

/// Extracts a profile from captured HTML, stamped with the current time.
///
/// # Errors
///
/// Returns [`ExtractError::UnsupportedPlatform`] if `url` is not a supported
/// profile URL. Finding no data in the page is not an error.
pub fn extract_profile(url: &str, html: &str) -> Result<ProfileRecord, ExtractError> {
    extract_profile_at(url, html, Utc::now())
}

/// Deterministic variant of [`extract_profile`]: the same `html` and
/// `scraped_at` always produce the same record.
///
/// # Errors
///
/// Returns [`ExtractError::UnsupportedPlatform`] if `url` is not a supported
/// profile URL.
pub fn extract_profile_at(
    url: &str,
    html: &str,
    scraped_at: DateTime<Utc>,
) -> Result<ProfileRecord, ExtractError> {
    let platform = detect_platform(url).ok_or_else(|| ExtractError::UnsupportedPlatform {
        url: url.to_string(),
    })?;

    let doc = Html::parse_document(html);
    let page = Page { doc: &doc, raw: html };

    let record = match platform {
        Platform::LinkedIn => {
            let mut profile = LinkedInProfile::empty(url, scraped_at);
            run_guarded(platform, || linkedin::extract(&page, &mut profile));
            ProfileRecord::LinkedIn(profile)
        }
        Platform::Instagram => {
            let username = profile_handle(url, platform).unwrap_or_default();
            let mut profile = InstagramProfile::empty(url, username, scraped_at);
            run_guarded(platform, || instagram::extract(&page, &mut profile));
            ProfileRecord::Instagram(profile)
        }
    };

    let empty = match &record {
        ProfileRecord::LinkedIn(p) => p.is_empty(),
        ProfileRecord::Instagram(p) => p.is_empty(),
    };
    tracing::info!(
        platform = %platform,
        profile = record.label(),
        html_len = html.len(),
        empty,
        "profile extracted"
    );

    Ok(record)
}

/// Runs one cascade, containing any panic so the fields filled before it
/// are still returned.
fn run_guarded(platform: Platform, cascade: impl FnOnce()) {
    if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(cascade)) {
        let reason = payload
            .downcast_ref::<&str>()
            .map(|s| (*s).to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        tracing::warn!(
            platform = %platform,
            reason = %reason,
            "extraction cascade panicked; returning partial profile"
        );
    }
}

#[cfg(test)]
#[path = "coordinator_test.rs"]
mod tests;
