//! DOM helpers shared by the platform extractors.

use scraper::{ElementRef, Html, Selector};

/// A captured page: the parsed document plus the raw markup it came from.
///
/// Some strategies need the DOM, others scan the raw text (inline scripts,
/// markup fragments the parser would normalize away).
pub(crate) struct Page<'a> {
    pub doc: &'a Html,
    pub raw: &'a str,
}

pub(crate) fn parse_selector(css: &str) -> Option<Selector> {
    match Selector::parse(css) {
        Ok(selector) => Some(selector),
        Err(e) => {
            tracing::debug!(selector = css, error = %e, "skipping unparseable selector");
            None
        }
    }
}

/// Collapses runs of whitespace into single spaces and trims the ends.
pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Visible text of an element, whitespace-collapsed.
pub(crate) fn element_text(el: ElementRef<'_>) -> String {
    collapse_whitespace(&el.text().collect::<String>())
}

/// Walks `selectors` in order and returns the text of the first element of
/// the first selector whose text is non-empty and passes `accept`.
///
/// Only the first element per selector is considered: later matches of a
/// broad selector are usually unrelated page chrome.
pub(crate) fn first_selector_text(
    doc: &Html,
    selectors: &[&str],
    accept: impl Fn(&str) -> bool,
) -> Option<String> {
    for css in selectors {
        let Some(selector) = parse_selector(css) else {
            continue;
        };
        let Some(el) = doc.select(&selector).next() else {
            continue;
        };
        let text = element_text(el);
        if !text.is_empty() && accept(&text) {
            tracing::debug!(selector = css, "selector matched");
            return Some(text);
        }
    }
    None
}

/// Same as [`first_selector_text`] but scoped to descendants of `scope`.
pub(crate) fn first_selector_text_in(
    scope: ElementRef<'_>,
    selectors: &[&str],
    accept: impl Fn(&str) -> bool,
) -> Option<String> {
    for css in selectors {
        let Some(selector) = parse_selector(css) else {
            continue;
        };
        let Some(el) = scope.select(&selector).next() else {
            continue;
        };
        let text = element_text(el);
        if !text.is_empty() && accept(&text) {
            tracing::debug!(selector = css, "scoped selector matched");
            return Some(text);
        }
    }
    None
}

/// Visible text of an element with a space between every text node.
///
/// Used for pattern scans, where `<b>12</b><b>870 posts</b>` must not read
/// as one number.
pub(crate) fn block_text(el: ElementRef<'_>) -> String {
    collapse_whitespace(&el.text().collect::<Vec<_>>().join(" "))
}

/// Like [`first_selector_text`], but looks past the first element of each
/// selector: every match is tried before moving to the next selector.
pub(crate) fn first_accepted_text(
    doc: &Html,
    selectors: &[&str],
    accept: impl Fn(&str) -> bool,
) -> Option<String> {
    for css in selectors {
        let Some(selector) = parse_selector(css) else {
            continue;
        };
        if let Some(text) = doc
            .select(&selector)
            .map(element_text)
            .find(|text| !text.is_empty() && accept(text))
        {
            tracing::debug!(selector = css, "selector matched");
            return Some(text);
        }
    }
    None
}

/// First element matched by any selector in `selectors`, tried in order.
pub(crate) fn first_element<'a>(doc: &'a Html, selectors: &[&str]) -> Option<ElementRef<'a>> {
    selectors
        .iter()
        .filter_map(|css| parse_selector(css))
        .find_map(|selector| doc.select(&selector).next())
}

/// Returns `true` if any element matches `css`.
pub(crate) fn has_match(doc: &Html, css: &str) -> bool {
    parse_selector(css).is_some_and(|selector| doc.select(&selector).next().is_some())
}

/// Trimmed `content` attribute of `<meta {attr}="{value}">`, if non-empty.
pub(crate) fn meta_content(doc: &Html, attr: &str, value: &str) -> Option<String> {
    let selector = parse_selector(&format!(r#"meta[{attr}="{value}"]"#))?;
    doc.select(&selector)
        .filter_map(|el| el.value().attr("content"))
        .map(str::trim)
        .find(|content| !content.is_empty())
        .map(str::to_string)
}

/// Spaced text of `<body>`, or of the whole document when there is no body element.
pub(crate) fn body_text(doc: &Html) -> String {
    first_element(doc, &["body"]).map_or_else(|| block_text(doc.root_element()), block_text)
}

/// Decodes a raw markup fragment to its visible text.
pub(crate) fn fragment_text(fragment: &str) -> String {
    let parsed = Html::parse_fragment(fragment);
    element_text(parsed.root_element())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapse_whitespace_normalizes_runs() {
        assert_eq!(collapse_whitespace("  a \n\t b   c "), "a b c");
        assert_eq!(collapse_whitespace("   "), "");
    }

    #[test]
    fn first_selector_text_respects_order_and_filter() {
        let doc = Html::parse_document(
            r#"<html><body><h2>Second</h2><h1>  First  </h1><p>Contact info</p></body></html>"#,
        );
        assert_eq!(
            first_selector_text(&doc, &["h1", "h2"], |_| true).as_deref(),
            Some("First")
        );
        assert_eq!(
            first_selector_text(&doc, &["p", "h2"], |t| !t.contains("Contact")).as_deref(),
            Some("Second")
        );
        assert_eq!(first_selector_text(&doc, &["h3"], |_| true), None);
    }

    #[test]
    fn first_accepted_text_scans_every_match() {
        let doc = Html::parse_document(
            "<html><body><li>Contact info</li><li>Lisbon</li><h2>Other</h2></body></html>",
        );
        assert_eq!(
            first_accepted_text(&doc, &["li", "h2"], |t| t != "Contact info").as_deref(),
            Some("Lisbon")
        );
        assert_eq!(
            first_selector_text(&doc, &["li", "h2"], |t| t != "Contact info").as_deref(),
            Some("Other")
        );
    }

    #[test]
    fn invalid_selectors_are_skipped() {
        let doc = Html::parse_document("<html><body><h1>Name</h1></body></html>");
        assert_eq!(
            first_selector_text(&doc, &["h1[", "h1"], |_| true).as_deref(),
            Some("Name")
        );
    }

    #[test]
    fn meta_content_reads_attribute() {
        let doc = Html::parse_document(
            r#"<html><head><meta property="og:title" content=" Jane (@jane) "></head></html>"#,
        );
        assert_eq!(
            meta_content(&doc, "property", "og:title").as_deref(),
            Some("Jane (@jane)")
        );
        assert_eq!(meta_content(&doc, "name", "description"), None);
    }

    #[test]
    fn block_text_separates_adjacent_nodes() {
        let doc = Html::parse_document("<html><body><ul><li>12</li><li>870 posts</li></ul></body></html>");
        assert_eq!(body_text(&doc), "12 870 posts");
    }

    #[test]
    fn fragment_text_decodes_entities() {
        assert_eq!(
            fragment_text("<div><span>Tom &amp; Jerry</span>\n<p>rock</p></div>"),
            "Tom & Jerry rock"
        );
    }
}
