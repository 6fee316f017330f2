/// Database module for lightning-flashcards
///
/// Handles all database operations using SQLite and sqlx.
/// Implements connection pooling for performance.

pub mod connection;
pub mod models;
pub mod queries;
pub mod query_builder;

pub use connection::{Database, DatabaseStats};
pub use models::*;
pub use queries::ReviewOutcome;
pub use query_builder::{FlashcardFilter, ListParams, PracticeMode};
