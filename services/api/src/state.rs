//! Application state shared across handlers

use std::sync::Arc;

use common::RankedStore;
use ranking::{AccountService, LeaderboardService, ProfileService};

use crate::config::ApiConfig;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub leaderboard: LeaderboardService,
    pub profiles: ProfileService,
    pub accounts: AccountService,
    pub top_count: usize,
    pub ranked_limit: usize,
}

impl AppState {
    /// Wire every service to the same store
    pub fn new(store: Arc<dyn RankedStore>, config: &ApiConfig) -> Self {
        let profiles = ProfileService::new(store.clone());

        Self {
            leaderboard: LeaderboardService::new(store),
            accounts: AccountService::new(profiles.clone()),
            profiles,
            top_count: config.top_count,
            ranked_limit: config.ranked_limit,
        }
    }
}
