//! Leaderboard ranking over the `users` collection

use std::sync::Arc;

use common::document::{numeric_field, score_order};
use common::{Comparison, KeyedDocument, RankedStore, USERS_COLLECTION};
use tracing::{debug, error, info, warn};

use crate::error::LeaderboardResult;
use crate::models::{Leaderboard, RankedUser, TOTAL_SCORE_FIELD, UserScoreRecord};

/// Number of rows returned by `get_leaderboard` when the caller does not say
pub const DEFAULT_TOP_COUNT: usize = 10;

/// Number of rows returned by `get_all_users_ranked` when the caller does not say
pub const DEFAULT_RANKED_LIMIT: usize = 100;

/// Computes leaderboards and per-user ranks
#[derive(Clone)]
pub struct LeaderboardService {
    store: Arc<dyn RankedStore>,
}

impl LeaderboardService {
    /// Create a new leaderboard service
    pub fn new(store: Arc<dyn RankedStore>) -> Self {
        Self { store }
    }

    /// Top `top_count` users plus the requesting user's rank.
    ///
    /// The rank of a user outside the top rows is one plus the number of
    /// users with a strictly higher score.
    pub async fn get_leaderboard(
        &self,
        requesting_user_id: Option<&str>,
        top_count: usize,
    ) -> LeaderboardResult<Leaderboard> {
        info!(
            "Fetching leaderboard (top {}) for {:?}",
            top_count, requesting_user_id
        );

        let total_users = self.store.count(USERS_COLLECTION).await.map_err(|e| {
            error!("Failed to count users: {}", e);
            e
        })?;

        let top = self
            .store
            .top_n(USERS_COLLECTION, TOTAL_SCORE_FIELD, top_count)
            .await
            .map_err(|e| {
                error!("Failed to fetch top users: {}", e);
                e
            })?;
        let top_users = rank_in_order(top);

        let requesting_user_id = requesting_user_id.filter(|id| !id.is_empty());
        let current_user_rank = match requesting_user_id {
            None => None,
            Some(user_id) => match top_users.iter().find(|user| user.id == user_id) {
                Some(user) => Some(user.rank),
                None => self.rank_outside_top(user_id).await?,
            },
        };

        Ok(Leaderboard {
            top_users,
            current_user_rank,
            total_users,
        })
    }

    async fn rank_outside_top(&self, user_id: &str) -> LeaderboardResult<Option<u64>> {
        let Some(record) = self.store.get(USERS_COLLECTION, user_id).await? else {
            debug!("No score record for {}", user_id);
            return Ok(None);
        };

        let score = numeric_field(&record, TOTAL_SCORE_FIELD).unwrap_or(0.0);
        let higher = self
            .store
            .count_where(
                USERS_COLLECTION,
                TOTAL_SCORE_FIELD,
                Comparison::GreaterThan,
                score,
            )
            .await?;

        Ok(Some(higher + 1))
    }

    /// Up to `limit` users ranked by score.
    ///
    /// Falls back to an unordered fetch sorted client-side when the ordered
    /// query fails. If the fallback fails too, the ordered query's error is
    /// returned.
    pub async fn get_all_users_ranked(&self, limit: usize) -> LeaderboardResult<Vec<RankedUser>> {
        info!("Fetching ranked users with limit {}", limit);

        let primary = match self
            .store
            .top_n(USERS_COLLECTION, TOTAL_SCORE_FIELD, limit)
            .await
        {
            Ok(documents) => return Ok(rank_in_order(documents)),
            Err(e) => e,
        };

        warn!(
            "Ordered ranking query failed, sorting client-side instead: {}",
            primary
        );

        match self.store.fetch(USERS_COLLECTION, limit).await {
            Ok(mut documents) => {
                documents.sort_by(|a, b| {
                    score_order(TOTAL_SCORE_FIELD, (a.0.as_str(), &a.1), (b.0.as_str(), &b.1))
                });
                let ranked = rank_in_order(documents);
                info!("Fallback ranking returned {} users", ranked.len());
                Ok(ranked)
            }
            Err(fallback) => {
                error!("Fallback ranking query also failed: {}", fallback);
                Err(primary.into())
            }
        }
    }
}

/// Assign ranks 1..n by position
fn rank_in_order(documents: Vec<KeyedDocument>) -> Vec<RankedUser> {
    documents
        .into_iter()
        .enumerate()
        .map(|(index, (user_id, doc))| {
            UserScoreRecord::from_document(&user_id, &doc).into_ranked(index as u64 + 1)
        })
        .collect()
}
