/// lightning-flashcards library
///
/// Flashcard storage, per-user review progress, and the HTTP surface over both.

pub mod config;
pub mod core;
pub mod db;
pub mod error;
pub mod server;

// Re-exports for convenience
pub use config::Config;
pub use db::Database;
pub use error::{FlashcardError, Result};
