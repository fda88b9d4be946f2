//! Magnitude parsing for human-readable counts such as `"16M"` or `"500+"`.
//!
//! Parsing never fails: anything that is not a recognizable count becomes
//! `0`, which downstream code treats as "unknown".

use regex::Regex;

/// Regex fragment matching a count token as it appears in page text,
/// e.g. `12,345`, `1.5K`, `16M`. Callers wrap it in a capture group.
pub(crate) const COUNT_TOKEN: &str = r"\d[\d,]*(?:\.\d+)?[KMBkmb]?";

/// Which platform's suffix conventions apply.
///
/// Instagram abbreviates up to billions (`"1.2B"`); LinkedIn only ever shows
/// `K` and `M`, so a `B` suffix there is not a count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountStyle {
    Instagram,
    LinkedIn,
}

impl CountStyle {
    fn multiplier(self, suffix: char) -> Option<f64> {
        match (suffix.to_ascii_uppercase(), self) {
            ('K', _) => Some(1_000.0),
            ('M', _) => Some(1_000_000.0),
            ('B', CountStyle::Instagram) => Some(1_000_000_000.0),
            _ => None,
        }
    }
}

/// Parses a magnitude token into the nearest integer.
///
/// - Thousands separators (`,`) and one trailing `+` are stripped, so
///   `"500+"` is exactly `500` and `"12,345"` is `12345`.
/// - A single `K`/`M` (and `B` for [`CountStyle::Instagram`]) suffix scales
///   the value, case-insensitively: `"1.5M"` is `1500000`.
/// - Empty, negative or otherwise unparseable input yields `0`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn parse_count(raw: &str, style: CountStyle) -> u64 {
    let cleaned: String = raw.trim().chars().filter(|&c| c != ',').collect();
    let cleaned = cleaned.strip_suffix('+').unwrap_or(&cleaned).trim_end();

    let split = cleaned
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(cleaned.len());
    let (number, suffix) = cleaned.split_at(split);
    if number.is_empty() {
        return 0;
    }

    let mut suffix_chars = suffix.trim().chars();
    let multiplier = match (suffix_chars.next(), suffix_chars.next()) {
        (None, _) => 1.0,
        (Some(c), None) => match style.multiplier(c) {
            Some(m) => m,
            None => return 0,
        },
        _ => return 0,
    };

    let Ok(value) = number.parse::<f64>() else {
        return 0;
    };
    let scaled = (value * multiplier).round();
    if !scaled.is_finite() || scaled < 0.0 {
        return 0;
    }

    scaled as u64
}

/// Returns the parsed first capture group of `re` in `text`, if it matches.
pub(crate) fn capture_count(re: &Regex, text: &str, style: CountStyle) -> Option<u64> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| parse_count(m.as_str(), style))
}

/// Like [`capture_count`], but skips matches that parse to zero and keeps
/// scanning the rest of `text`.
pub(crate) fn first_nonzero_count(re: &Regex, text: &str, style: CountStyle) -> Option<u64> {
    re.captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| parse_count(m.as_str(), style))
        .find(|&n| n > 0)
}
