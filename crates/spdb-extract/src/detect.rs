//! URL-based platform classification.

use std::sync::LazyLock;

use regex::Regex;
use spdb_core::Platform;

static LINKEDIN_PROFILE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:https?://)?(?:[a-z0-9-]+\.)*linkedin\.com/in/([^/?#\s]+)")
        .expect("valid linkedin profile regex")
});

static INSTAGRAM_PROFILE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:https?://)?(?:[a-z0-9-]+\.)*instagram\.com/([a-z0-9._]+)/?(?:[?#].*)?$")
        .expect("valid instagram profile regex")
});

/// Root-level Instagram paths that are site sections, not usernames.
const INSTAGRAM_RESERVED_PATHS: &[&str] = &[
    "about",
    "accounts",
    "challenge",
    "developer",
    "direct",
    "explore",
    "legal",
    "p",
    "privacy",
    "reel",
    "reels",
    "stories",
    "tv",
    "web",
];

/// Classifies `url` as a supported profile page.
///
/// Returns `None` for anything that is not unambiguously a profile: company
/// pages, post permalinks, site sections and non-URLs are all unsupported.
#[must_use]
pub fn detect_platform(url: &str) -> Option<Platform> {
    let url = url.trim();
    if LINKEDIN_PROFILE_RE.is_match(url) {
        return Some(Platform::LinkedIn);
    }
    instagram_username(url).map(|_| Platform::Instagram)
}

/// Returns `true` if [`detect_platform`] recognizes `url`.
#[must_use]
pub fn is_supported(url: &str) -> bool {
    detect_platform(url).is_some()
}

/// All platforms the extractor understands.
#[must_use]
pub fn supported_platforms() -> &'static [Platform] {
    &Platform::ALL
}

/// Extracts the account handle from a profile URL: the `/in/<slug>` segment
/// for LinkedIn, the root-level username for Instagram.
#[must_use]
pub fn profile_handle(url: &str, platform: Platform) -> Option<String> {
    let url = url.trim();
    match platform {
        Platform::LinkedIn => LINKEDIN_PROFILE_RE
            .captures(url)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string()),
        Platform::Instagram => instagram_username(url),
    }
}

/// Instagram handles are case-insensitive; the lowercase form is the key.
fn instagram_username(url: &str) -> Option<String> {
    let username = INSTAGRAM_PROFILE_RE.captures(url)?.get(1)?.as_str();
    let reserved = INSTAGRAM_RESERVED_PATHS
        .iter()
        .any(|path| path.eq_ignore_ascii_case(username));
    (!reserved).then(|| username.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linkedin_member_profile() {
        assert_eq!(
            detect_platform("https://www.linkedin.com/in/satyanadella/"),
            Some(Platform::LinkedIn)
        );
        assert_eq!(
            detect_platform("linkedin.com/in/someone?trk=public"),
            Some(Platform::LinkedIn)
        );
    }

    #[test]
    fn linkedin_company_page_is_unsupported() {
        assert_eq!(detect_platform("https://www.linkedin.com/company/microsoft/"), None);
        assert_eq!(detect_platform("https://www.linkedin.com/in/"), None);
    }

    #[test]
    fn instagram_root_level_profile() {
        assert_eq!(
            detect_platform("https://www.instagram.com/dhruvrathee/"),
            Some(Platform::Instagram)
        );
        assert_eq!(
            detect_platform("https://instagram.com/nat.geo_official"),
            Some(Platform::Instagram)
        );
        assert_eq!(
            detect_platform("https://www.instagram.com/natgeo/?hl=en"),
            Some(Platform::Instagram)
        );
    }

    #[test]
    fn instagram_post_and_section_urls_are_unsupported() {
        assert_eq!(detect_platform("https://www.instagram.com/p/C3xyz123/"), None);
        assert_eq!(detect_platform("https://www.instagram.com/natgeo/reels/"), None);
        assert_eq!(detect_platform("https://www.instagram.com/explore/"), None);
        assert_eq!(detect_platform("https://www.instagram.com/"), None);
    }

    #[test]
    fn unrelated_and_malformed_inputs_are_unsupported() {
        assert_eq!(detect_platform(""), None);
        assert_eq!(detect_platform("not a url"), None);
        assert_eq!(detect_platform("https://example.com/in/someone"), None);
        assert_eq!(detect_platform("https://notinstagram.com.evil.io/user"), None);
    }

    #[test]
    fn instagram_handle_is_lowercased() {
        assert_eq!(
            profile_handle("https://www.instagram.com/NatGeo/", Platform::Instagram),
            Some("natgeo".to_string())
        );
        assert_eq!(
            profile_handle("https://www.instagram.com/NatGeo/", Platform::Instagram),
            profile_handle("https://www.instagram.com/natgeo/", Platform::Instagram)
        );
    }

    #[test]
    fn detection_is_deterministic() {
        let urls = [
            "https://www.linkedin.com/in/a/",
            "https://www.instagram.com/b/",
            "https://www.instagram.com/p/c/",
            "",
        ];
        for url in urls {
            assert_eq!(detect_platform(url), detect_platform(url));
            assert_eq!(is_supported(url), detect_platform(url).is_some());
        }
    }

    #[test]
    fn handles_are_extracted_from_url() {
        assert_eq!(
            profile_handle("https://www.linkedin.com/in/jane-doe-123/", Platform::LinkedIn)
                .as_deref(),
            Some("jane-doe-123")
        );
        assert_eq!(
            profile_handle("https://www.instagram.com/natgeo/?hl=en", Platform::Instagram)
                .as_deref(),
            Some("natgeo")
        );
        assert_eq!(
            profile_handle("https://www.instagram.com/p/abc/", Platform::Instagram),
            None
        );
    }

    #[test]
    fn supported_platforms_lists_both() {
        assert_eq!(
            supported_platforms(),
            &[Platform::LinkedIn, Platform::Instagram]
        );
    }
}
