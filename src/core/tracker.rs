// Tracks how each user is doing on each card
//
// A review bumps the card's counter and the user's tally together. Unknown
// cards are a silent no-op.

use crate::db::{AnswerResult, Database, ReviewOutcome, ANONYMOUS_USER};
use crate::error::Result;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, warn};

/// Review request body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewRequest {
    pub correct: Option<bool>,
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}

impl ReviewRequest {
    /// Absent or null counts as a miss
    pub fn is_correct(&self) -> bool {
        self.correct.unwrap_or(false)
    }

    pub fn user(&self) -> &str {
        self.user_id
            .as_deref()
            .filter(|u| !u.is_empty())
            .unwrap_or(ANONYMOUS_USER)
    }
}

pub struct ProgressTracker {
    db: Arc<Database>,
}

impl ProgressTracker {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub async fn review(&self, flashcard_id: i64, request: &ReviewRequest) -> Result<ReviewOutcome> {
        let user = request.user();
        let result = AnswerResult::from_correct(request.is_correct());

        let outcome = self.db.record_review(flashcard_id, user, result).await?;

        match outcome {
            ReviewOutcome::Recorded => {
                debug!(flashcard_id, user, ?result, "review recorded")
            }
            ReviewOutcome::UnknownFlashcard => {
                warn!(flashcard_id, user, "review for unknown flashcard ignored")
            }
        }

        Ok(outcome)
    }
}
