//! Instagram profile cascade.
//!
//! Strategies run in a fixed order, most trustworthy first:
//!
//! 1. embedded page data (`_sharedData`, JSON script blocks, inline patterns)
//! 2. social-preview `<meta>` tags
//! 3. header / bio structure
//! 4. counts and privacy marker from the main content text
//!
//! Every strategy only fills fields that are still missing, so a value found
//! by an earlier strategy is never replaced by a later, noisier one.

mod dom;
mod embedded;
mod meta;

use std::sync::LazyLock;

use regex::Regex;
use spdb_core::InstagramProfile;

use crate::count::COUNT_TOKEN;
use crate::fill::{fill_count, fill_flag, fill_text};
use crate::html::Page;

static FOLLOWERS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)({COUNT_TOKEN})\s*followers?")).expect("valid regex")
});

static FOLLOWING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)({COUNT_TOKEN})\s*following")).expect("valid regex")
});

static POSTS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"(?i)({COUNT_TOKEN})\s*posts?")).expect("valid regex"));

/// Values one strategy managed to read. `None` / `false` means "not found".
#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct Found {
    display_name: Option<String>,
    bio: Option<String>,
    follower_count: Option<u64>,
    following_count: Option<u64>,
    post_count: Option<u64>,
    is_verified: bool,
    is_private: bool,
}

impl Found {
    /// Copies found values into the missing fields of `profile`, returning
    /// how many fields were filled.
    fn apply(self, profile: &mut InstagramProfile) -> usize {
        [
            fill_text(&mut profile.display_name, self.display_name),
            fill_text(&mut profile.bio, self.bio),
            fill_count(&mut profile.follower_count, self.follower_count),
            fill_count(&mut profile.following_count, self.following_count),
            fill_count(&mut profile.post_count, self.post_count),
            fill_flag(&mut profile.is_verified, self.is_verified),
            fill_flag(&mut profile.is_private, self.is_private),
        ]
        .into_iter()
        .filter(|&filled| filled)
        .count()
    }
}

/// Runs the cascade against `page`, filling `profile` in place.
///
/// `profile.username` must already hold the handle from the URL; it selects
/// the right user object inside embedded data and keeps the handle itself
/// from being mistaken for a display name.
pub(crate) fn extract(page: &Page<'_>, profile: &mut InstagramProfile) {
    let username = profile.username.clone();

    match embedded::extract(page.raw, &username) {
        Some(found) => record("embedded", found.apply(profile)),
        None => tracing::debug!(username, "no embedded profile data"),
    }

    record("meta", meta::extract(page.doc).apply(profile));

    let header = dom::extract_header(page.doc, &username, &profile.display_name);
    record("header", header.apply(profile));

    record("main-content", dom::extract_main_content(page.doc).apply(profile));
}

fn record(strategy: &'static str, filled: usize) {
    tracing::debug!(strategy, filled, "instagram strategy finished");
}
