//! LinkedIn member-profile cascade.
//!
//! Covers both the logged-in profile layout (`pv-*` / `text-heading-*`
//! classes) and the public guest layout (`top-card-layout__*`).

mod about;
mod counts;

use spdb_core::LinkedInProfile;

use crate::fill::{fill_count, fill_text};
use crate::html::{first_accepted_text, first_selector_text, Page};

const NAME_SELECTORS: &[&str] = &[
    "h1.text-heading-xlarge",
    ".pv-text-details__left-panel h1",
    "h1.inline.t-24.v-align-middle.break-words",
    ".pv-top-card--list li:first-child",
    "div.ph5 h1",
    ".top-card-layout__title",
    "main h1",
];

const HEADLINE_SELECTORS: &[&str] = &[
    ".text-body-medium.break-words",
    ".pv-text-details__left-panel .text-body-medium",
    "div.text-body-medium.break-words",
    ".pv-top-card--list.pv-top-card--list-bullet.mt1 li:first-child",
    ".top-card-layout__headline",
];

const LOCATION_SELECTORS: &[&str] = &[
    ".text-body-small.inline.t-black--light.break-words",
    ".pv-text-details__left-panel .text-body-small",
    "span.text-body-small.inline.t-black--light.break-words",
    ".pv-top-card--list-bullet li",
    ".top-card__subline-item",
];

/// Runs the cascade against `page`, filling `profile` in place.
pub(crate) fn extract(page: &Page<'_>, profile: &mut LinkedInProfile) {
    fill_text(
        &mut profile.name,
        first_selector_text(page.doc, NAME_SELECTORS, |_| true),
    );
    fill_text(
        &mut profile.headline,
        first_selector_text(page.doc, HEADLINE_SELECTORS, |_| true),
    );
    fill_text(
        &mut profile.location,
        first_accepted_text(page.doc, LOCATION_SELECTORS, is_location),
    );
    fill_text(&mut profile.about, about::extract(page));
    fill_count(&mut profile.follower_count, counts::follower_count(page.doc));
    fill_count(
        &mut profile.connection_count,
        counts::connection_count(page.doc),
    );

    tracing::debug!(
        name_found = !profile.name.is_empty(),
        about_found = !profile.about.is_empty(),
        followers = profile.follower_count,
        connections = profile.connection_count,
        "linkedin cascade finished"
    );
}

/// The top-card bullet list mixes the location with the contact link and
/// network counts.
fn is_location(text: &str) -> bool {
    let lower = text.to_lowercase();
    !lower.contains("contact info") && !lower.contains("connection") && !lower.contains("follower")
}
