//! Ranking service models

pub mod profile;
pub mod score;

// Re-export for convenience
pub use profile::{AccountType, ProfilePatch, UserProfile};
pub use score::{Leaderboard, RankedUser, TOTAL_SCORE_FIELD, UserScoreRecord};
