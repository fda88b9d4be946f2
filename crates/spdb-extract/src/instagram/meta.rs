//! Strategy 2: Open Graph and description `<meta>` tags.
//!
//! Instagram serves these even to logged-out visitors:
//!
//! - `og:title`: `"Dhruv Rathee (@dhruvrathee) • Instagram photos and videos"`
//! - `og:description`: `"16M Followers, 405 Following, 870 Posts - <bio or boilerplate>"`

use std::sync::LazyLock;

use regex::Regex;
use scraper::Html;

use super::{Found, FOLLOWERS_RE, FOLLOWING_RE, POSTS_RE};
use crate::count::{capture_count, CountStyle};
use crate::html::meta_content;

static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([^(]+?)\s*\(@[^)]+\)").expect("valid regex"));

static TITLE_SITE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([^•]+?)\s*•").expect("valid regex"));

static BIO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)Posts\s*-\s*(.+)$").expect("valid regex"));

/// Newer descriptions wrap the bio: `Name (@handle) on Instagram: "bio"`.
static QUOTED_BIO_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)on Instagram:\s*["“](.*)["”]\s*$"#).expect("valid regex")
});

/// Instagram's default description tail when the account has no bio.
const BOILERPLATE_PREFIX: &str = "see instagram photos and videos from";

pub(super) fn extract(doc: &Html) -> Found {
    let title = meta_content(doc, "property", "og:title").unwrap_or_default();
    let description = meta_content(doc, "property", "og:description")
        .or_else(|| meta_content(doc, "name", "description"))
        .unwrap_or_default();

    Found {
        display_name: display_name_from_title(&title),
        bio: bio_from_description(&description),
        follower_count: capture_count(&FOLLOWERS_RE, &description, CountStyle::Instagram),
        following_count: capture_count(&FOLLOWING_RE, &description, CountStyle::Instagram),
        post_count: capture_count(&POSTS_RE, &description, CountStyle::Instagram),
        ..Found::default()
    }
}

fn display_name_from_title(title: &str) -> Option<String> {
    TITLE_RE
        .captures(title)
        .or_else(|| TITLE_SITE_RE.captures(title))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|name| !name.is_empty())
}

fn bio_from_description(description: &str) -> Option<String> {
    let tail = BIO_RE.captures(description)?.get(1)?.as_str().trim();
    let bio = QUOTED_BIO_RE
        .captures(tail)
        .and_then(|caps| caps.get(1))
        .map_or(tail, |m| m.as_str())
        .trim_start_matches(['"', '\u{201c}'])
        .trim_end_matches(['"', '\u{201d}'])
        .trim();
    if bio.is_empty() || bio.to_lowercase().starts_with(BOILERPLATE_PREFIX) {
        return None;
    }
    Some(bio.to_string())
}
