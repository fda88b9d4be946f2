//! Strategies 3 and 4: rendered page structure.

use std::sync::LazyLock;

use regex::Regex;
use scraper::Html;

use super::{Found, FOLLOWERS_RE, FOLLOWING_RE, POSTS_RE};
use crate::count::{capture_count, CountStyle};
use crate::html::{
    block_text, first_accepted_text, first_element, first_selector_text_in, has_match,
};

const NAME_SELECTORS: &[&str] = &[
    "h1",
    "h2",
    ".x1lliihq",
    r#"[class*="Title"]"#,
    r#"span[dir="auto"]"#,
];

const BIO_SELECTORS: &[&str] = &[
    "div._aa_c span",
    "header + div span",
    r#"[class*="biography"]"#,
    r#"section div span[dir="auto"]"#,
];

const VERIFIED_SELECTORS: &[&str] = &[
    r#"svg[aria-label*="Verified"]"#,
    r#"span[aria-label*="Verified"]"#,
];

const MAIN_CONTENT_SELECTORS: &[&str] = &["main", r#"section[role="main"]"#, "article"];

const PRIVATE_MARKER: &str = "this account is private";

/// Bio candidates shorter than this are usually labels or buttons.
const MIN_BIO_CHARS: usize = 11;

static COUNT_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\d[\d,.]*\s*[KMB]?\s+(?:followers?|following|posts?)\b")
        .expect("valid regex")
});

/// Display name, bio and verified badge from the profile header.
///
/// `known_name` is the display name found so far; a bio candidate equal to
/// it is the name repeated, not a bio.
pub(super) fn extract_header(doc: &Html, username: &str, known_name: &str) -> Found {
    let display_name = first_element(doc, &["header"]).and_then(|header| {
        first_selector_text_in(header, NAME_SELECTORS, |text| {
            !text.eq_ignore_ascii_case(username) && !text.starts_with('@')
        })
    });

    let bio = find_bio(doc, username, known_name, display_name.as_deref());
    let is_verified = VERIFIED_SELECTORS.iter().any(|css| has_match(doc, css));

    Found {
        display_name,
        bio,
        is_verified,
        ..Found::default()
    }
}

fn find_bio(
    doc: &Html,
    username: &str,
    known_name: &str,
    header_name: Option<&str>,
) -> Option<String> {
    let is_bio = |text: &str| {
        text.chars().count() >= MIN_BIO_CHARS
            && !text.eq_ignore_ascii_case(username)
            && text != known_name
            && header_name != Some(text)
            && !COUNT_LINE_RE.is_match(text)
    };

    first_accepted_text(doc, BIO_SELECTORS, is_bio)
}

/// Counts and the private-account marker from the main content text.
pub(super) fn extract_main_content(doc: &Html) -> Found {
    let Some(main) = first_element(doc, MAIN_CONTENT_SELECTORS) else {
        tracing::debug!("no main content area");
        return Found::default();
    };
    let text = block_text(main);

    Found {
        follower_count: capture_count(&FOLLOWERS_RE, &text, CountStyle::Instagram),
        following_count: capture_count(&FOLLOWING_RE, &text, CountStyle::Instagram),
        post_count: capture_count(&POSTS_RE, &text, CountStyle::Instagram),
        is_private: text.to_lowercase().contains(PRIVATE_MARKER),
        ..Found::default()
    }
}
