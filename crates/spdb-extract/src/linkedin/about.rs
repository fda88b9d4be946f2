//! The free-text "About" section.
//!
//! LinkedIn has moved this section around more than any other part of the
//! profile, so four strategies are tried in order, from the most structural
//! to a plain text-length heuristic.

use std::sync::LazyLock;

use regex::Regex;
use scraper::ElementRef;

use crate::html::{
    element_text, first_accepted_text, first_selector_text_in, fragment_text, parse_selector, Page,
};

type Strategy = fn(&Page<'_>) -> Option<String>;

const STRATEGIES: &[(&str, Strategy)] = &[
    ("about-heading", near_about_heading),
    ("summary-selectors", summary_selectors),
    ("raw-about-block", raw_about_block),
    ("longest-block", longest_text_block),
];

const SUMMARY_SELECTORS: &[&str] = &[
    "#about ~ * .display-flex.ph5.pv3",
    r#"section[data-section="summary"] .pv-shared-text-with-see-more"#,
    ".pv-about-section .pv-about__summary-text",
    r#"div[id="about"] ~ div .inline-show-more-text"#,
    r#"section.summary [data-test-id="about-section"]"#,
    ".core-section-container.summary .core-section-container__content",
];

/// Content containers looked for around an "About" heading.
const HEADING_CONTENT_SELECTORS: &[&str] = &[
    ".display-flex",
    ".inline-show-more-text",
    r#"span[aria-hidden="true"]"#,
    "p",
];

/// How many ancestors of the heading are searched for its content.
const HEADING_ANCESTOR_LEVELS: usize = 3;

const MIN_BLOCK_CHARS: usize = 80;
const MAX_BLOCK_CHARS: usize = 5000;

/// Elements whose presence as a child disqualifies a container from the
/// length heuristic: the container is layout, not a text block.
const NON_LEAF_CHILDREN: &[&str] = &[
    "div", "p", "section", "article", "ul", "ol", "li", "h1", "h2", "h3", "h4", "h5", "h6",
    "script", "style", "header", "footer", "nav", "main",
];

static RAW_ABOUT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)>\s*About\s*</(?:h2|h3|span)>(.*?)<(?:section|h2|h3)\b")
        .expect("valid regex")
});

static NETWORK_COUNT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\d[\d,.]*\s*[KM]?\+?\s*(?:followers?|connections?)\b").expect("valid regex")
});

pub(super) fn extract(page: &Page<'_>) -> Option<String> {
    STRATEGIES.iter().find_map(|(name, strategy)| {
        let about = strategy(page)?;
        tracing::debug!(strategy = *name, len = about.len(), "about section found");
        Some(about)
    })
}

/// Strategy 1: content next to an `h2`/`h3` reading exactly "About".
fn near_about_heading(page: &Page<'_>) -> Option<String> {
    let headings = parse_selector("h2, h3")?;
    let heading = page
        .doc
        .select(&headings)
        .find(|h| is_about_heading(*h))?;

    heading
        .ancestors()
        .filter_map(ElementRef::wrap)
        .take(HEADING_ANCESTOR_LEVELS)
        .find_map(|ancestor| {
            first_selector_text_in(ancestor, HEADING_CONTENT_SELECTORS, |text| {
                !strip_about_label(text).is_empty()
            })
        })
        .map(|text| strip_about_label(&text).to_string())
}

/// Headings often repeat their label for screen readers
/// (`<span aria-hidden>About</span><span class="visually-hidden">About</span>`),
/// so every non-blank text node must read "About".
fn is_about_heading(heading: ElementRef<'_>) -> bool {
    let mut parts = heading.text().map(str::trim).filter(|t| !t.is_empty()).peekable();
    parts.peek().is_some() && parts.all(|t| t.eq_ignore_ascii_case("about"))
}

/// Strategy 2: class names of known summary-section layouts.
fn summary_selectors(page: &Page<'_>) -> Option<String> {
    first_accepted_text(page.doc, SUMMARY_SELECTORS, |_| true)
}

/// Strategy 3: raw markup between the "About" heading and the next block.
fn raw_about_block(page: &Page<'_>) -> Option<String> {
    let fragment = RAW_ABOUT_RE.captures(page.raw)?.get(1)?.as_str();
    let text = fragment_text(fragment);
    let about = strip_about_label(&text);
    (!about.is_empty()).then(|| about.to_string())
}

/// Strategy 4: the longest leaf text block of plausible length that is not
/// a network-count line.
fn longest_text_block(page: &Page<'_>) -> Option<String> {
    let blocks = parse_selector("p, span, div")?;
    page.doc
        .select(&blocks)
        .filter(|el| is_leaf_block(*el))
        .map(element_text)
        .filter(|text| {
            let chars = text.chars().count();
            (MIN_BLOCK_CHARS..=MAX_BLOCK_CHARS).contains(&chars) && !NETWORK_COUNT_RE.is_match(text)
        })
        .max_by_key(|text| text.chars().count())
}

fn is_leaf_block(el: ElementRef<'_>) -> bool {
    !el.children()
        .filter_map(ElementRef::wrap)
        .any(|child| NON_LEAF_CHILDREN.contains(&child.value().name()))
}

/// Drops a leading "About" label that came along with the content.
fn strip_about_label(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed
        .get(..5)
        .filter(|head| head.eq_ignore_ascii_case("about"))
        .map(|_| &trimmed[5..])
    else {
        return trimmed;
    };
    if rest.is_empty() || rest.starts_with(|c: char| c.is_whitespace() || c == ':') {
        rest.trim_start_matches(|c: char| c.is_whitespace() || c == ':')
    } else {
        trimmed
    }
}
