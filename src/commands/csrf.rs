//! CSRF Commands
//!
//! Fetches a fresh anti-forgery token from the server.

use super::get_json;
use crate::error::{SyncError, SyncResult};
use crate::models::CsrfRefresh;

pub async fn refresh_csrf(url: &str) -> SyncResult<String> {
    let refreshed: CsrfRefresh = get_json(url).await?;
    token_from_refresh(refreshed)
}

fn token_from_refresh(refreshed: CsrfRefresh) -> SyncResult<String> {
    refreshed
        .csrf_token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| SyncError::Decode("csrf_token missing from response".to_string()))
}
