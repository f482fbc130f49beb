//! Custom error types for the ranking services

use common::StoreError;
use thiserror::Error;

/// Error returned by the leaderboard service
#[derive(Error, Debug)]
pub enum LeaderboardError {
    /// A store operation failed; no partial leaderboard is returned
    #[error("Leaderboard unavailable: {0}")]
    Unavailable(#[from] StoreError),
}

/// Error returned by the profile and account services
#[derive(Error, Debug)]
pub enum ProfileError {
    /// A store operation failed
    #[error("Profile store error: {0}")]
    Store(#[from] StoreError),

    /// Rejected input
    #[error("Invalid profile data: {0}")]
    Invalid(String),

    /// A stored profile could not be decoded
    #[error("Corrupt profile document: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Type alias for leaderboard results
pub type LeaderboardResult<T> = Result<T, LeaderboardError>;

/// Type alias for profile results
pub type ProfileResult<T> = Result<T, ProfileError>;
