//! Follower and connection counts.

use std::sync::LazyLock;

use regex::Regex;
use scraper::Html;

use crate::count::{first_nonzero_count, CountStyle, COUNT_TOKEN};
use crate::html::{block_text, body_text, parse_selector};

/// Elements that carry the network counts on the profile top card.
const INTERACTIVE_SELECTORS: &str =
    "a, button, .pv-top-card--list-bullet li, .top-card-layout li, .top-card__subline-item";

static FOLLOWER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)({COUNT_TOKEN}\+?)\s*followers?")).expect("valid regex")
});

static CONNECTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)({COUNT_TOKEN}\+?)\s*connections?")).expect("valid regex")
});

pub(super) fn follower_count(doc: &Html) -> Option<u64> {
    scan(doc, "follower", &FOLLOWER_RE)
}

/// LinkedIn caps the displayed value at "500+", which reads as exactly 500.
pub(super) fn connection_count(doc: &Html) -> Option<u64> {
    scan(doc, "connection", &CONNECTION_RE)
}

/// Zero is never returned: a match that does not parse as a LinkedIn count
/// leaves the scan going.
fn scan(doc: &Html, keyword: &str, re: &Regex) -> Option<u64> {
    let from_elements = parse_selector(INTERACTIVE_SELECTORS).and_then(|selector| {
        doc.select(&selector)
            .map(block_text)
            .filter(|text| text.to_lowercase().contains(keyword))
            .find_map(|text| first_nonzero_count(re, &text, CountStyle::LinkedIn))
    });
    if from_elements.is_some() {
        tracing::debug!(keyword, source = "element", "network count found");
        return from_elements;
    }

    let from_body = first_nonzero_count(re, &body_text(doc), CountStyle::LinkedIn);
    if from_body.is_some() {
        tracing::debug!(keyword, source = "body", "network count found");
    }
    from_body
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connections_capped_display_is_exact() {
        let doc = Html::parse_document(
            r#"<html><body><ul class="pv-top-card--list-bullet"><li><span>500+</span> connections</li></ul></body></html>"#,
        );
        assert_eq!(connection_count(&doc), Some(500));
    }

    #[test]
    fn link_count_beats_body_text() {
        let doc = Html::parse_document(
            r#"<html><body><p>Followed by 3 followers you know</p>
            <a href="/followers">12.5K followers</a></body></html>"#,
        );
        assert_eq!(follower_count(&doc), Some(12_500));
    }

    #[test]
    fn body_text_fallback() {
        let doc = Html::parse_document(
            "<html><body><div><span>2,048</span> followers</div></body></html>",
        );
        assert_eq!(follower_count(&doc), Some(2_048));
    }

    #[test]
    fn billions_suffix_is_not_a_linkedin_count() {
        let doc = Html::parse_document(r#"<html><body><a href="x">1B followers</a></body></html>"#);
        assert_eq!(follower_count(&doc), None);
    }

    #[test]
    fn unparseable_link_count_falls_back_to_body() {
        let doc = Html::parse_document(
            r#"<html><body><a href="/club">Top 1B followers club</a>
            <div><span>2,048</span> followers</div></body></html>"#,
        );
        assert_eq!(follower_count(&doc), Some(2_048));
    }

    #[test]
    fn no_counts() {
        let doc = Html::parse_document("<html><body><p>Nothing</p></body></html>");
        assert_eq!(follower_count(&doc), None);
        assert_eq!(connection_count(&doc), None);
    }
}
