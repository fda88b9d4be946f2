use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Platform;

/// A profile snapshot extracted from one captured HTML document.
///
/// Content fields are best-effort: text that could not be found is an empty
/// string and counts that could not be found are zero, never null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "platform", rename_all = "lowercase")]
pub enum ProfileRecord {
    LinkedIn(LinkedInProfile),
    Instagram(InstagramProfile),
}

impl ProfileRecord {
    #[must_use]
    pub fn platform(&self) -> Platform {
        match self {
            ProfileRecord::LinkedIn(_) => Platform::LinkedIn,
            ProfileRecord::Instagram(_) => Platform::Instagram,
        }
    }

    /// Source URL the HTML was captured from.
    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            ProfileRecord::LinkedIn(p) => &p.url,
            ProfileRecord::Instagram(p) => &p.url,
        }
    }

    #[must_use]
    pub fn scraped_at(&self) -> DateTime<Utc> {
        match self {
            ProfileRecord::LinkedIn(p) => p.scraped_at,
            ProfileRecord::Instagram(p) => p.scraped_at,
        }
    }

    /// Human-readable label for logs: the LinkedIn name or Instagram username.
    #[must_use]
    pub fn label(&self) -> &str {
        let label = match self {
            ProfileRecord::LinkedIn(p) => p.name.as_str(),
            ProfileRecord::Instagram(p) => p.username.as_str(),
        };
        if label.is_empty() {
            "unknown"
        } else {
            label
        }
    }
}

/// LinkedIn member profile (`/in/<slug>` pages).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkedInProfile {
    pub url: String,
    pub name: String,
    /// The one-line professional headline shown under the name.
    pub headline: String,
    pub location: String,
    /// Free-text "About" section.
    pub about: String,
    pub follower_count: u64,
    /// LinkedIn displays at most "500+"; that is stored as exactly 500.
    pub connection_count: u64,
    pub scraped_at: DateTime<Utc>,
}

impl LinkedInProfile {
    /// A profile with only the source URL and capture timestamp set.
    #[must_use]
    pub fn empty(url: impl Into<String>, scraped_at: DateTime<Utc>) -> Self {
        Self {
            url: url.into(),
            name: String::new(),
            headline: String::new(),
            location: String::new(),
            about: String::new(),
            follower_count: 0,
            connection_count: 0,
            scraped_at,
        }
    }

    /// Returns `true` when no content field was populated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
            && self.headline.is_empty()
            && self.location.is_empty()
            && self.about.is_empty()
            && self.follower_count == 0
            && self.connection_count == 0
    }
}

/// Instagram account profile (root-level `/<username>` pages).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstagramProfile {
    pub url: String,
    /// Account handle taken from the URL; the natural key for storage.
    pub username: String,
    pub display_name: String,
    pub bio: String,
    pub follower_count: u64,
    pub following_count: u64,
    pub post_count: u64,
    pub is_verified: bool,
    pub is_private: bool,
    pub scraped_at: DateTime<Utc>,
}

impl InstagramProfile {
    /// A profile with only the source URL, username and capture timestamp set.
    #[must_use]
    pub fn empty(
        url: impl Into<String>,
        username: impl Into<String>,
        scraped_at: DateTime<Utc>,
    ) -> Self {
        Self {
            url: url.into(),
            username: username.into(),
            display_name: String::new(),
            bio: String::new(),
            follower_count: 0,
            following_count: 0,
            post_count: 0,
            is_verified: false,
            is_private: false,
            scraped_at,
        }
    }

    /// Returns `true` when no content field was populated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.display_name.is_empty()
            && self.bio.is_empty()
            && self.follower_count == 0
            && self.following_count == 0
            && self.post_count == 0
            && !self.is_verified
            && !self.is_private
    }
}
