//! Strategy 1: profile data embedded in the page's scripts.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use super::Found;
use crate::count::{parse_count, CountStyle};

static SHARED_DATA_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<script[^>]*>\s*window\._sharedData\s*=\s*(\{.+?\});?\s*</script>")
        .expect("valid regex")
});

static JSON_SCRIPT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<script[^>]+type\s*=\s*["']application/json["'][^>]*>(.*?)</script>"#)
        .expect("valid regex")
});

/// Nesting limit for the user-object search. Instagram's relay payloads nest
/// the profile roughly ten levels deep.
const MAX_DEPTH: usize = 15;

/// Keys whose presence marks an object as carrying profile data rather than
/// being a bare mention of the username.
const PROFILE_MARKERS: &[&str] = &["full_name", "fullName", "biography", "edge_followed_by"];

/// Tries the three embedded sources in order and returns the first hit.
pub(super) fn extract(raw: &str, username: &str) -> Option<Found> {
    if username.is_empty() {
        return None;
    }

    if let Some(found) = from_shared_data(raw, username) {
        tracing::debug!(source = "shared_data", "embedded profile found");
        return Some(found);
    }
    if let Some(found) = from_json_scripts(raw, username) {
        tracing::debug!(source = "json_script", "embedded profile found");
        return Some(found);
    }
    if let Some(found) = from_inline_pattern(raw, username) {
        tracing::debug!(source = "inline_pattern", "embedded profile found");
        return Some(found);
    }
    None
}

/// Legacy `window._sharedData = {...};` bootstrap object.
fn from_shared_data(raw: &str, username: &str) -> Option<Found> {
    let json_text = SHARED_DATA_RE.captures(raw)?.get(1)?.as_str();
    let data: Value = match serde_json::from_str(json_text) {
        Ok(v) => v,
        Err(e) => {
            tracing::debug!(error = %e, "unparseable _sharedData");
            return None;
        }
    };

    let user = data
        .get("entry_data")?
        .get("ProfilePage")?
        .get(0)?
        .get("graphql")?
        .get("user")?;
    if !same_username(user, username) {
        return None;
    }
    Some(found_from_user(user))
}

/// `<script type="application/json">` blocks, each searched for the user.
fn from_json_scripts(raw: &str, username: &str) -> Option<Found> {
    for cap in JSON_SCRIPT_RE.captures_iter(raw) {
        let Some(json_text) = cap.get(1).map(|m| m.as_str().trim()) else {
            continue;
        };
        if json_text.is_empty() {
            continue;
        }

        let data: Value = match serde_json::from_str(json_text) {
            Ok(v) => v,
            Err(e) => {
                tracing::debug!(error = %e, "skipping unparseable JSON script block");
                continue;
            }
        };

        if let Some(user) = find_user(&data, username, 0) {
            return Some(found_from_user(user));
        }
    }
    None
}

/// Depth-first search for an object whose `username` is the target and that
/// carries profile data.
fn find_user<'v>(value: &'v Value, username: &str, depth: usize) -> Option<&'v Value> {
    if depth > MAX_DEPTH {
        return None;
    }
    match value {
        Value::Object(map) => {
            if same_username(value, username) && PROFILE_MARKERS.iter().any(|k| truthy(map.get(*k)))
            {
                return Some(value);
            }
            map.values()
                .find_map(|child| find_user(child, username, depth + 1))
        }
        Value::Array(items) => items
            .iter()
            .find_map(|child| find_user(child, username, depth + 1)),
        _ => None,
    }
}

fn same_username(user: &Value, username: &str) -> bool {
    user.get("username")
        .and_then(Value::as_str)
        .is_some_and(|u| u.eq_ignore_ascii_case(username))
}

fn truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::Array(_) | Value::Object(_)) => true,
    }
}

fn found_from_user(user: &Value) -> Found {
    Found {
        display_name: first_text(user, &["full_name", "fullName"]),
        bio: first_text(user, &["biography", "bio"]),
        follower_count: edge_count(user, "edge_followed_by")
            .or_else(|| json_count(user.get("follower_count"))),
        following_count: edge_count(user, "edge_follow")
            .or_else(|| json_count(user.get("following_count"))),
        post_count: edge_count(user, "edge_owner_to_timeline_media")
            .or_else(|| json_count(user.get("media_count"))),
        is_verified: ["is_verified", "verified"]
            .iter()
            .any(|k| user.get(*k).and_then(Value::as_bool).unwrap_or(false)),
        is_private: user
            .get("is_private")
            .and_then(Value::as_bool)
            .unwrap_or(false),
    }
}

fn first_text(user: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|k| user.get(*k).and_then(Value::as_str))
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

fn edge_count(user: &Value, edge: &str) -> Option<u64> {
    json_count(user.get(edge)?.get("count"))
}

/// Counts arrive as numbers or, occasionally, as display strings ("1.2M").
fn json_count(value: Option<&Value>) -> Option<u64> {
    let count = match value? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => Some(parse_count(s, CountStyle::Instagram)),
        _ => None,
    };
    count.filter(|&n| n > 0)
}

/// Last resort: a regex over the raw markup for the user's serialized
/// fields, for pages that embed the payload in a script we cannot parse.
fn from_inline_pattern(raw: &str, username: &str) -> Option<Found> {
    let user = regex::escape(username);
    let string = r#""((?:[^"\\]|\\.)*)""#;
    let with_counts = format!(
        r#"(?i)"username":"{user}"[^}}]{{0,500}}"full_name":{string}[^}}]{{0,500}}"biography":{string}[^}}]{{0,500}}"edge_followed_by":\{{"count":(\d+)\}}"#
    );
    let without_counts = format!(
        r#"(?i)"username":"{user}"[^}}]{{0,300}}"full_name":{string}[^}}]{{0,300}}"biography":{string}"#
    );

    for pattern in [with_counts, without_counts] {
        let re = match Regex::new(&pattern) {
            Ok(re) => re,
            Err(e) => {
                tracing::debug!(error = %e, "inline profile pattern did not compile");
                continue;
            }
        };
        let Some(caps) = re.captures(raw) else {
            continue;
        };
        let Some(display_name) = caps
            .get(1)
            .map(|m| unescape_json_string(m.as_str()))
            .filter(|name| !name.is_empty())
        else {
            continue;
        };
        return Some(Found {
            display_name: Some(display_name),
            bio: caps.get(2).map(|m| unescape_json_string(m.as_str())),
            follower_count: caps.get(3).and_then(|m| m.as_str().parse().ok()),
            ..Found::default()
        });
    }
    None
}

/// Decodes the body of a JSON string literal (`\n`, `\"`, `\u00e9`).
fn unescape_json_string(body: &str) -> String {
    serde_json::from_str::<String>(&format!("\"{body}\""))
        .unwrap_or_else(|_| body.replace("\\n", "\n").replace("\\\"", "\""))
}
