//! Request and response bodies for the API service

use serde::{Deserialize, Serialize};

/// Query for `GET /leaderboard`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardQuery {
    pub user_id: Option<String>,
    pub top: Option<usize>,
}

/// Query for `GET /leaderboard/all`
#[derive(Debug, Default, Deserialize)]
pub struct RankedQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayNameRequest {
    pub display_name: String,
}

#[derive(Debug, Deserialize)]
pub struct PhotoRequest {
    #[serde(rename = "photoURL")]
    pub photo_url: String,
}

#[derive(Debug, Deserialize)]
pub struct InterestsRequest {
    pub interests: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollaborationRequest {
    pub collaboration_preferences: Vec<String>,
}

/// Body for `POST /accounts/register`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    pub user_id: String,
    pub email: String,
    pub display_name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionResponse {
    pub user_id: String,
    pub completed_profile: bool,
}

/// One category of the interest catalog
#[derive(Debug, Serialize)]
pub struct InterestCategory {
    pub name: &'static str,
    pub interests: &'static [&'static str],
}

/// Response for `GET /catalog/interests`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogResponse {
    pub categories: Vec<InterestCategory>,
    pub collaboration_types: &'static [&'static str],
}
