/// Data models for database entities
///
/// All models map to database tables and use sqlx for type-safe queries.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Category assigned when a card is created without one
pub const DEFAULT_CATEGORY: &str = "general";

/// Difficulty assigned when a card is created without one
pub const DEFAULT_DIFFICULTY: i64 = 1;

/// User identity when the client doesn't send one
pub const ANONYMOUS_USER: &str = "anonymous";

/// A single flashcard
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Flashcard {
    pub id: i64,
    pub front: String,
    pub back: String,
    pub category: String,
    pub difficulty: i64, // 1 easy, 2 medium, 3 hard
    pub review_count: i64,
    pub last_reviewed: Option<String>, // "YYYY-MM-DD HH:MM:SS" UTC
    pub created_at: String,            // "YYYY-MM-DD HH:MM:SS" UTC
}

/// Input for creating a new flashcard, defaults already applied
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlashcardInput {
    pub front: String,
    pub back: String,
    pub category: String,
    pub difficulty: i64,
}

/// Per-user running tally for one flashcard
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct UserProgress {
    pub id: i64,
    pub flashcard_id: i64,
    pub user_id: String,
    pub correct_count: i64,
    pub incorrect_count: i64,
    pub last_result: i64,
    pub updated_at: String,
}

/// Outcome of a single review
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AnswerResult {
    Correct,
    Incorrect,
}

impl AnswerResult {
    pub fn from_correct(correct: bool) -> Self {
        if correct {
            AnswerResult::Correct
        } else {
            AnswerResult::Incorrect
        }
    }

    /// Value stored in `user_progress.last_result`
    pub fn marker(self) -> i64 {
        match self {
            AnswerResult::Correct => 1,
            AnswerResult::Incorrect => -1,
        }
    }
}

/// Distinct category with its number of cards
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct CategoryCount {
    pub category: String,
    pub count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_markers() {
        assert_eq!(AnswerResult::from_correct(true).marker(), 1);
        assert_eq!(AnswerResult::from_correct(false).marker(), -1);
    }

    #[test]
    fn test_flashcard_serializes_snake_case_fields() {
        let card = Flashcard {
            id: 7,
            front: "Q".to_string(),
            back: "A".to_string(),
            category: DEFAULT_CATEGORY.to_string(),
            difficulty: DEFAULT_DIFFICULTY,
            review_count: 0,
            last_reviewed: None,
            created_at: "2025-11-25 00:00:00".to_string(),
        };

        let value = serde_json::to_value(&card).unwrap();
        assert_eq!(value["review_count"], 0);
        assert!(value["last_reviewed"].is_null());
        assert_eq!(value["category"], "general");
    }
}
