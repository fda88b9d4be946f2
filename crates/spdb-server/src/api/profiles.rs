use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use spdb_core::Platform;
use spdb_db::{InstagramProfileRow, LinkedInProfileRow};

use crate::middleware::RequestId;

use super::{map_db_error, normalize_limit, ApiError, AppState, ResponseMeta};

#[derive(Debug, Serialize)]
pub(super) struct LinkedInProfileItem {
    id: i64,
    name: String,
    url: String,
    headline: String,
    location: String,
    about: String,
    follower_count: i64,
    connection_count: i64,
    scraped_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<LinkedInProfileRow> for LinkedInProfileItem {
    fn from(row: LinkedInProfileRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            url: row.url,
            headline: row.headline,
            location: row.location,
            about: row.about,
            follower_count: row.follower_count,
            connection_count: row.connection_count,
            scraped_at: row.scraped_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct InstagramProfileItem {
    id: i64,
    username: String,
    url: String,
    display_name: String,
    bio: String,
    follower_count: i64,
    following_count: i64,
    post_count: i64,
    is_verified: bool,
    is_private: bool,
    scraped_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<InstagramProfileRow> for InstagramProfileItem {
    fn from(row: InstagramProfileRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
            url: row.url,
            display_name: row.display_name,
            bio: row.bio,
            follower_count: row.follower_count,
            following_count: row.following_count,
            post_count: row.post_count,
            is_verified: row.is_verified,
            is_private: row.is_private,
            scraped_at: row.scraped_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct ProfileListResponse<T: Serialize> {
    success: bool,
    platform: Platform,
    count: usize,
    data: Vec<T>,
    meta: ResponseMeta,
}

impl<T: Serialize> ProfileListResponse<T> {
    fn new(platform: Platform, data: Vec<T>, request_id: String) -> Self {
        Self {
            success: true,
            platform,
            count: data.len(),
            data,
            meta: ResponseMeta::new(request_id),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct ProfileQuery {
    pub limit: Option<i64>,
}

pub(super) async fn list_profiles(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(platform): Path<String>,
    Query(query): Query<ProfileQuery>,
) -> Result<Response, ApiError> {
    let platform: Platform = platform
        .parse()
        .map_err(|_| ApiError::new(req_id.0.clone(), "bad_request", "Invalid platform"))?;
    let limit = normalize_limit(query.limit);

    let response = match platform {
        Platform::LinkedIn => {
            let rows = spdb_db::list_linkedin_profiles(&state.pool, limit)
                .await
                .map_err(|e| map_db_error(req_id.0.clone(), &e))?;
            let data: Vec<LinkedInProfileItem> = rows.into_iter().map(Into::into).collect();
            Json(ProfileListResponse::new(platform, data, req_id.0)).into_response()
        }
        Platform::Instagram => {
            let rows = spdb_db::list_instagram_profiles(&state.pool, limit)
                .await
                .map_err(|e| map_db_error(req_id.0.clone(), &e))?;
            let data: Vec<InstagramProfileItem> = rows.into_iter().map(Into::into).collect();
            Json(ProfileListResponse::new(platform, data, req_id.0)).into_response()
        }
    };

    Ok(response)
}

#[derive(Debug, Serialize)]
pub(super) struct SupportedPlatforms {
    success: bool,
    platforms: Vec<Platform>,
    count: usize,
}

pub(super) async fn supported_platforms() -> Json<SupportedPlatforms> {
    let platforms = spdb_extract::supported_platforms().to_vec();
    Json(SupportedPlatforms {
        success: true,
        count: platforms.len(),
        platforms,
    })
}
