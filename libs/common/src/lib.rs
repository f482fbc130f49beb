//! Common library for the ranking application
//!
//! This crate provides the document store abstraction shared by the ranking
//! services, its error taxonomy, and the in-memory, PostgreSQL and Redis
//! backends.
//!
//! ```rust,no_run
//! use common::{InMemoryStore, RankedStore, USERS_COLLECTION};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = InMemoryStore::new();
//!     let total = store.count(USERS_COLLECTION).await?;
//!     println!("Users: {}", total);
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod database;
pub mod document;
pub mod error;
pub mod memory;
pub mod store;

pub use document::{Comparison, Document};
pub use error::{StoreError, StoreResult};
pub use memory::InMemoryStore;
pub use store::{KeyedDocument, PROFILES_COLLECTION, RankedStore, USERS_COLLECTION};
