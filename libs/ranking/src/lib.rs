//! Leaderboard and profile services
//!
//! [`LeaderboardService`] ranks the `users` collection by score;
//! [`ProfileService`] owns create-or-merge writes to `userProfiles`;
//! [`AccountService`] records sign-ups and provider sign-ins as profile writes.
//! All three work against any [`common::RankedStore`].

pub mod account;
pub mod catalog;
pub mod error;
pub mod leaderboard;
pub mod models;
pub mod profile;
pub mod validation;

pub use account::{AccountService, OAuthIdentity};
pub use error::{LeaderboardError, LeaderboardResult, ProfileError, ProfileResult};
pub use leaderboard::{DEFAULT_RANKED_LIMIT, DEFAULT_TOP_COUNT, LeaderboardService};
pub use profile::ProfileService;
