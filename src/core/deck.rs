// The deck: creating, listing and grouping flashcards
//
// Requests arrive half-filled. This is where defaults land and where a
// card without both sides gets turned away.

use crate::db::{
    CategoryCount, Database, Flashcard, FlashcardFilter, FlashcardInput, DEFAULT_CATEGORY,
    DEFAULT_DIFFICULTY,
};
use crate::error::{FlashcardError, Result};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info};

/// Message for a create request missing a side
pub const MISSING_SIDES: &str = "Front and back are required";

/// Create request body. Everything optional so defaults and validation happen here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewFlashcard {
    pub front: Option<String>,
    pub back: Option<String>,
    pub category: Option<String>,
    pub difficulty: Option<i64>,
}

pub struct Deck {
    db: Arc<Database>,
}

impl Deck {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Validate, fill defaults and store. Returns the new card's id.
    pub async fn create(&self, request: NewFlashcard) -> Result<i64> {
        let input = Self::prepare(request)?;

        let id = self.db.create_flashcard(input).await?;
        info!(id, "flashcard created");

        Ok(id)
    }

    pub async fn list(&self, filter: &FlashcardFilter) -> Result<Vec<Flashcard>> {
        let cards = self.db.list_flashcards(filter).await?;
        debug!(count = cards.len(), ?filter, "flashcards listed");

        Ok(cards)
    }

    pub async fn categories(&self) -> Result<Vec<CategoryCount>> {
        self.db.get_categories().await
    }

    // Both sides must be present and non-empty. Nothing else is checked.
    fn prepare(request: NewFlashcard) -> Result<FlashcardInput> {
        let front = request.front.filter(|s| !s.is_empty());
        let back = request.back.filter(|s| !s.is_empty());

        let (Some(front), Some(back)) = (front, back) else {
            return Err(FlashcardError::Validation(MISSING_SIDES.to_string()));
        };

        let category = request
            .category
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());

        Ok(FlashcardInput {
            front,
            back,
            category,
            difficulty: request.difficulty.unwrap_or(DEFAULT_DIFFICULTY),
        })
    }
}
