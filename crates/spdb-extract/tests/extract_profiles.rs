//! End-to-end extraction over captured page fixtures.
//!
//! Each fixture is a trimmed-down capture of one page layout. Tests go
//! through the public `extract_profile_at` entry point only.

use chrono::{DateTime, Utc};

use spdb_extract::{
    extract_profile, extract_profile_at, InstagramProfile, LinkedInProfile, ProfileRecord,
};

const INSTAGRAM_META_ONLY: &str = include_str!("fixtures/instagram_meta_only.html");
const INSTAGRAM_EMBEDDED: &str = include_str!("fixtures/instagram_embedded.html");
const INSTAGRAM_PRIVATE_DOM: &str = include_str!("fixtures/instagram_private_dom.html");
const LINKEDIN_MEMBER: &str = include_str!("fixtures/linkedin_member.html");
const LINKEDIN_PUBLIC: &str = include_str!("fixtures/linkedin_public.html");

fn captured_at() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2026-02-14T09:30:00Z")
        .expect("valid timestamp")
        .with_timezone(&Utc)
}

fn instagram(url: &str, html: &str) -> InstagramProfile {
    match extract_profile_at(url, html, captured_at()).expect("supported url") {
        ProfileRecord::Instagram(profile) => profile,
        other => panic!("expected instagram record, got {other:?}"),
    }
}

fn linkedin(url: &str, html: &str) -> LinkedInProfile {
    match extract_profile_at(url, html, captured_at()).expect("supported url") {
        ProfileRecord::LinkedIn(profile) => profile,
        other => panic!("expected linkedin record, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Instagram
// ---------------------------------------------------------------------------

#[test]
fn instagram_counts_and_bio_from_og_description() {
    let profile = instagram("https://www.instagram.com/dhruvrathee/", INSTAGRAM_META_ONLY);
    assert_eq!(profile.username, "dhruvrathee");
    assert_eq!(profile.display_name, "Dhruv Rathee");
    assert_eq!(profile.follower_count, 16_000_000);
    assert_eq!(profile.following_count, 405);
    assert_eq!(profile.post_count, 870);
    assert_eq!(profile.bio, "Bio text here");
    assert!(!profile.is_verified);
    assert!(!profile.is_private);
}

#[test]
fn instagram_embedded_data_is_not_overwritten() {
    let profile = instagram("https://www.instagram.com/natgeo/", INSTAGRAM_EMBEDDED);
    assert_eq!(profile.display_name, "National Geographic");
    assert_eq!(
        profile.bio,
        "Experience the world through the eyes of our photographers."
    );
    assert_eq!(profile.follower_count, 283_000_000);
    assert_eq!(profile.following_count, 180);
    assert_eq!(profile.post_count, 30_000);
    assert!(profile.is_verified);
}

#[test]
fn instagram_username_is_case_insensitive() {
    let mixed = instagram("https://www.instagram.com/NatGeo/", INSTAGRAM_EMBEDDED);
    let lower = instagram("https://www.instagram.com/natgeo/", INSTAGRAM_EMBEDDED);
    assert_eq!(mixed.username, "natgeo");
    assert_eq!(mixed.username, lower.username);
    assert_eq!(mixed.follower_count, lower.follower_count);
}

#[test]
fn instagram_structure_only_page() {
    let profile = instagram("https://www.instagram.com/quiet.fox/", INSTAGRAM_PRIVATE_DOM);
    assert_eq!(profile.username, "quiet.fox");
    assert_eq!(profile.display_name, "Quiet Fox");
    assert_eq!(profile.bio, "Woodworker, trail runner and tea snob.");
    assert_eq!(profile.post_count, 1_204);
    assert_eq!(profile.follower_count, 9_800);
    assert_eq!(profile.following_count, 312);
    assert!(profile.is_verified);
    assert!(profile.is_private);
}

// ---------------------------------------------------------------------------
// LinkedIn
// ---------------------------------------------------------------------------

#[test]
fn linkedin_member_layout() {
    let profile = linkedin("https://www.linkedin.com/in/jane-doe/", LINKEDIN_MEMBER);
    assert_eq!(profile.name, "Jane Doe");
    assert_eq!(
        profile.headline,
        "Principal Engineer at Example Corp | Distributed Systems"
    );
    assert_eq!(profile.location, "Amsterdam, North Holland, Netherlands");
    assert_eq!(
        profile.about,
        "I lead the storage team. Previously built payment rails and a few compilers nobody asked for."
    );
    assert_eq!(profile.follower_count, 4_512);
    assert_eq!(profile.connection_count, 500);
}

#[test]
fn linkedin_public_layout() {
    let profile = linkedin("https://www.linkedin.com/in/johnsmith", LINKEDIN_PUBLIC);
    assert_eq!(profile.name, "John Smith");
    assert_eq!(profile.headline, "Product Designer at Studio North");
    assert_eq!(profile.location, "Lisbon, Portugal");
    assert!(profile.about.starts_with("Designing calm software for noisy teams."));
    assert_eq!(profile.follower_count, 2_000);
    assert_eq!(profile.connection_count, 312);
}

// ---------------------------------------------------------------------------
// Cross-cutting properties
// ---------------------------------------------------------------------------

#[test]
fn same_input_and_timestamp_give_identical_records() {
    for (url, html) in [
        ("https://www.instagram.com/natgeo/", INSTAGRAM_EMBEDDED),
        ("https://www.linkedin.com/in/jane-doe/", LINKEDIN_MEMBER),
    ] {
        let first = extract_profile_at(url, html, captured_at()).unwrap();
        let second = extract_profile_at(url, html, captured_at()).unwrap();
        assert_eq!(first, second, "extraction of {url} is not deterministic");
    }
}

#[test]
fn mismatched_page_keeps_identity_fields() {
    // A LinkedIn capture submitted under an Instagram URL.
    let profile = instagram("https://www.instagram.com/nobody/", LINKEDIN_PUBLIC);
    assert_eq!(profile.username, "nobody");
    assert_eq!(profile.url, "https://www.instagram.com/nobody/");
    assert_eq!(profile.scraped_at, captured_at());
    assert_eq!(profile.follower_count, 2_000);
    assert!(profile.display_name.is_empty());
}

#[test]
fn blank_document_is_not_an_error() {
    let record = extract_profile("https://www.linkedin.com/in/x/", "").unwrap();
    let ProfileRecord::LinkedIn(profile) = record else {
        panic!("expected linkedin record");
    };
    assert!(profile.is_empty());
    assert_eq!(profile.url, "https://www.linkedin.com/in/x/");
}

#[test]
fn record_json_uses_platform_tag() {
    let record = extract_profile_at(
        "https://www.instagram.com/dhruvrathee/",
        INSTAGRAM_META_ONLY,
        captured_at(),
    )
    .unwrap();
    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json["platform"], "instagram");
    assert_eq!(json["follower_count"], 16_000_000);
    assert_eq!(json["scraped_at"], "2026-02-14T09:30:00Z");
}
