//! Score records and leaderboard rows

use common::Document;
use common::document::numeric_field;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Field the leaderboard orders by
pub const TOTAL_SCORE_FIELD: &str = "totalScore";

/// Display name used when a score record has no nickname
pub const ANONYMOUS_NICKNAME: &str = "Anonymous";

/// Score record as stored in the `users` collection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserScoreRecord {
    #[serde(skip)]
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image_url: Option<String>,
}

impl UserScoreRecord {
    /// Read a record leniently: wrong-typed or empty fields count as absent
    pub fn from_document(user_id: &str, doc: &Document) -> Self {
        Self {
            user_id: user_id.to_string(),
            nickname: non_empty_str(doc, "nickname"),
            total_score: numeric_field(doc, TOTAL_SCORE_FIELD),
            profile_image_url: non_empty_str(doc, "profileImageUrl"),
        }
    }

    /// Score with the missing-value default applied
    pub fn score(&self) -> f64 {
        self.total_score.unwrap_or(0.0)
    }

    /// Normalize into a leaderboard row at `rank`
    pub fn into_ranked(self, rank: u64) -> RankedUser {
        let score = self.score();
        RankedUser {
            id: self.user_id,
            rank,
            display_name: self
                .nickname
                .unwrap_or_else(|| ANONYMOUS_NICKNAME.to_string()),
            score,
            photo_url: self.profile_image_url,
        }
    }
}

fn non_empty_str(doc: &Document, field: &str) -> Option<String> {
    doc.get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// One normalized leaderboard row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedUser {
    pub id: String,
    /// 1-based position
    pub rank: u64,
    pub display_name: String,
    pub score: f64,
    #[serde(rename = "photoURL")]
    pub photo_url: Option<String>,
}

/// Result of a leaderboard query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Leaderboard {
    pub top_users: Vec<RankedUser>,
    /// `None` when no user was given or the user has no score record
    pub current_user_rank: Option<u64>,
    pub total_users: u64,
}
