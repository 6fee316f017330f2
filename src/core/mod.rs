/// Core functionality modules
///
/// Contains the business logic for the flashcard deck and
/// per-user review progress.

pub mod deck;
pub mod tracker;

pub use deck::{Deck, NewFlashcard};
pub use tracker::{ProgressTracker, ReviewRequest};
