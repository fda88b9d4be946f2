//! Database operations for the `linkedin_profiles` and `instagram_profiles`
//! tables.
//!
//! Both tables keep one row per natural key (`(name, url)` for LinkedIn,
//! `username` for Instagram). Saving a capture for an existing key overwrites
//! every content field, so the table always reflects the latest capture.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use spdb_core::{InstagramProfile, LinkedInProfile, ProfileRecord};

use crate::DbError;

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// A row from the `linkedin_profiles` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct LinkedInProfileRow {
    pub id: i64,
    pub name: String,
    pub url: String,
    pub headline: String,
    pub location: String,
    pub about: String,
    pub follower_count: i64,
    pub connection_count: i64,
    pub scraped_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LinkedInProfileRow {
    #[must_use]
    pub fn into_profile(self) -> LinkedInProfile {
        LinkedInProfile {
            url: self.url,
            name: self.name,
            headline: self.headline,
            location: self.location,
            about: self.about,
            follower_count: from_column(self.follower_count),
            connection_count: from_column(self.connection_count),
            scraped_at: self.scraped_at,
        }
    }
}

/// A row from the `instagram_profiles` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct InstagramProfileRow {
    pub id: i64,
    pub username: String,
    pub url: String,
    pub display_name: String,
    pub bio: String,
    pub follower_count: i64,
    pub following_count: i64,
    pub post_count: i64,
    pub is_verified: bool,
    pub is_private: bool,
    pub scraped_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl InstagramProfileRow {
    #[must_use]
    pub fn into_profile(self) -> InstagramProfile {
        InstagramProfile {
            url: self.url,
            username: self.username,
            display_name: self.display_name,
            bio: self.bio,
            follower_count: from_column(self.follower_count),
            following_count: from_column(self.following_count),
            post_count: from_column(self.post_count),
            is_verified: self.is_verified,
            is_private: self.is_private,
            scraped_at: self.scraped_at,
        }
    }
}

/// Result of an upsert: the row id and whether the row was newly inserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpsertOutcome {
    pub id: i64,
    pub created: bool,
}

// ---------------------------------------------------------------------------
// Writes
// ---------------------------------------------------------------------------

/// Stores `record` in the table for its platform.
///
/// # Errors
///
/// Returns [`DbError::InvalidRecord`] if the record cannot be keyed or a count
/// does not fit the column, or [`DbError::Sqlx`] if the query fails.
pub async fn save_profile(pool: &PgPool, record: &ProfileRecord) -> Result<UpsertOutcome, DbError> {
    let outcome = match record {
        ProfileRecord::LinkedIn(profile) => upsert_linkedin_profile(pool, profile).await?,
        ProfileRecord::Instagram(profile) => upsert_instagram_profile(pool, profile).await?,
    };
    tracing::debug!(
        platform = %record.platform(),
        id = outcome.id,
        created = outcome.created,
        "profile upserted"
    );
    Ok(outcome)
}

/// Inserts or overwrites the LinkedIn profile keyed by `(name, url)`.
///
/// # Errors
///
/// Returns [`DbError::InvalidRecord`] if a count exceeds `BIGINT`, or
/// [`DbError::Sqlx`] if the query fails.
pub async fn upsert_linkedin_profile(
    pool: &PgPool,
    profile: &LinkedInProfile,
) -> Result<UpsertOutcome, DbError> {
    let follower_count = to_column("follower_count", profile.follower_count)?;
    let connection_count = to_column("connection_count", profile.connection_count)?;

    let (id, created) = sqlx::query_as::<_, (i64, bool)>(
        "INSERT INTO linkedin_profiles \
             (name, url, headline, location, about, follower_count, connection_count, scraped_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
         ON CONFLICT (name, url) DO UPDATE SET \
             headline         = EXCLUDED.headline, \
             location         = EXCLUDED.location, \
             about            = EXCLUDED.about, \
             follower_count   = EXCLUDED.follower_count, \
             connection_count = EXCLUDED.connection_count, \
             scraped_at       = EXCLUDED.scraped_at, \
             updated_at       = NOW() \
         RETURNING id, (xmax = 0) AS is_new",
    )
    .bind(&profile.name)
    .bind(&profile.url)
    .bind(&profile.headline)
    .bind(&profile.location)
    .bind(&profile.about)
    .bind(follower_count)
    .bind(connection_count)
    .bind(profile.scraped_at)
    .fetch_one(pool)
    .await?;

    Ok(UpsertOutcome { id, created })
}

/// Inserts or overwrites the Instagram profile keyed by `username`, compared
/// in lowercase.
///
/// # Errors
///
/// Returns [`DbError::InvalidRecord`] if `username` is empty or a count
/// exceeds `BIGINT`, or [`DbError::Sqlx`] if the query fails.
pub async fn upsert_instagram_profile(
    pool: &PgPool,
    profile: &InstagramProfile,
) -> Result<UpsertOutcome, DbError> {
    if profile.username.trim().is_empty() {
        return Err(DbError::InvalidRecord(
            "instagram username is empty".to_string(),
        ));
    }
    let follower_count = to_column("follower_count", profile.follower_count)?;
    let following_count = to_column("following_count", profile.following_count)?;
    let post_count = to_column("post_count", profile.post_count)?;
    let username = profile.username.trim().to_ascii_lowercase();

    let (id, created) = sqlx::query_as::<_, (i64, bool)>(
        "INSERT INTO instagram_profiles \
             (username, url, display_name, bio, follower_count, following_count, post_count, \
              is_verified, is_private, scraped_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
         ON CONFLICT (username) DO UPDATE SET \
             url             = EXCLUDED.url, \
             display_name    = EXCLUDED.display_name, \
             bio             = EXCLUDED.bio, \
             follower_count  = EXCLUDED.follower_count, \
             following_count = EXCLUDED.following_count, \
             post_count      = EXCLUDED.post_count, \
             is_verified     = EXCLUDED.is_verified, \
             is_private      = EXCLUDED.is_private, \
             scraped_at      = EXCLUDED.scraped_at, \
             updated_at      = NOW() \
         RETURNING id, (xmax = 0) AS is_new",
    )
    .bind(&username)
    .bind(&profile.url)
    .bind(&profile.display_name)
    .bind(&profile.bio)
    .bind(follower_count)
    .bind(following_count)
    .bind(post_count)
    .bind(profile.is_verified)
    .bind(profile.is_private)
    .bind(profile.scraped_at)
    .fetch_one(pool)
    .await?;

    Ok(UpsertOutcome { id, created })
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// Returns up to `limit` LinkedIn profiles, most recently captured first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_linkedin_profiles(
    pool: &PgPool,
    limit: i64,
) -> Result<Vec<LinkedInProfileRow>, DbError> {
    let rows = sqlx::query_as::<_, LinkedInProfileRow>(
        "SELECT id, name, url, headline, location, about, follower_count, connection_count, \
                scraped_at, created_at, updated_at \
         FROM linkedin_profiles \
         ORDER BY scraped_at DESC, id DESC \
         LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Returns up to `limit` Instagram profiles, most recently captured first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_instagram_profiles(
    pool: &PgPool,
    limit: i64,
) -> Result<Vec<InstagramProfileRow>, DbError> {
    let rows = sqlx::query_as::<_, InstagramProfileRow>(
        "SELECT id, username, url, display_name, bio, follower_count, following_count, \
                post_count, is_verified, is_private, scraped_at, created_at, updated_at \
         FROM instagram_profiles \
         ORDER BY scraped_at DESC, id DESC \
         LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Returns the stored Instagram profile for `username` (any case), or `None`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_instagram_profile(
    pool: &PgPool,
    username: &str,
) -> Result<Option<InstagramProfileRow>, DbError> {
    let row = sqlx::query_as::<_, InstagramProfileRow>(
        "SELECT id, username, url, display_name, bio, follower_count, following_count, \
                post_count, is_verified, is_private, scraped_at, created_at, updated_at \
         FROM instagram_profiles \
         WHERE username = $1",
    )
    .bind(username.trim().to_ascii_lowercase())
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn to_column(field: &str, value: u64) -> Result<i64, DbError> {
    i64::try_from(value)
        .map_err(|_| DbError::InvalidRecord(format!("{field} {value} exceeds BIGINT range")))
}

/// Columns carry a `>= 0` check, so a negative value never comes back.
fn from_column(value: i64) -> u64 {
    u64::try_from(value).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_beyond_bigint_are_rejected() {
        assert_eq!(to_column("post_count", 42).unwrap(), 42);
        let err = to_column("post_count", u64::MAX).unwrap_err();
        assert!(matches!(err, DbError::InvalidRecord(ref msg) if msg.starts_with("post_count")));
    }

    #[test]
    fn negative_columns_read_as_zero() {
        assert_eq!(from_column(-1), 0);
        assert_eq!(from_column(7), 7);
    }
}
