/// SQL query functions for database operations
///
/// All values are bound parameters; list SQL comes from `FlashcardFilter`.

use crate::db::models::*;
use crate::db::query_builder::FlashcardFilter;
use crate::db::Database;
use crate::error::Result;
use chrono::Utc;

/// Same shape SQLite's CURRENT_TIMESTAMP produces, so stamps sort together
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn now() -> String {
    Utc::now().format(TIMESTAMP_FORMAT).to_string()
}

/// What a review did to the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewOutcome {
    /// Card counter bumped and progress upserted
    Recorded,
    /// No card with that id; nothing written
    UnknownFlashcard,
}

impl Database {
    /// Insert a new flashcard
    ///
    /// # Returns
    /// * `Ok(i64)` - The generated flashcard ID
    pub async fn create_flashcard(&self, input: FlashcardInput) -> Result<i64> {
        let result = sqlx::query(
            "INSERT INTO flashcards (front, back, category, difficulty) VALUES (?, ?, ?, ?)",
        )
        .bind(&input.front)
        .bind(&input.back)
        .bind(&input.category)
        .bind(input.difficulty)
        .execute(self.pool())
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// List flashcards matching a filter
    ///
    /// An empty list is a normal result.
    pub async fn list_flashcards(&self, filter: &FlashcardFilter) -> Result<Vec<Flashcard>> {
        let mut query = filter.build();

        let cards = query
            .build_query_as::<Flashcard>()
            .fetch_all(self.pool())
            .await?;

        Ok(cards)
    }

    /// Get flashcard by ID
    pub async fn get_flashcard(&self, id: i64) -> Result<Option<Flashcard>> {
        let card = sqlx::query_as::<_, Flashcard>("SELECT * FROM flashcards WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool())
            .await?;

        Ok(card)
    }

    /// Every distinct category with its card count, alphabetical
    pub async fn get_categories(&self) -> Result<Vec<CategoryCount>> {
        let categories = sqlx::query_as::<_, CategoryCount>(
            "SELECT category, COUNT(*) AS count FROM flashcards GROUP BY category ORDER BY category",
        )
        .fetch_all(self.pool())
        .await?;

        Ok(categories)
    }

    /// Record one review of a flashcard by a user
    ///
    /// Bumps the card's review counter and upserts the user's tally in a
    /// single transaction. The unique (flashcard_id, user_id) constraint
    /// keeps concurrent first reviews from creating duplicate rows.
    pub async fn record_review(
        &self,
        flashcard_id: i64,
        user_id: &str,
        result: AnswerResult,
    ) -> Result<ReviewOutcome> {
        let stamp = now();
        let mut tx = self.pool().begin().await?;

        let touched = sqlx::query(
            "UPDATE flashcards SET review_count = review_count + 1, last_reviewed = ? WHERE id = ?",
        )
        .bind(&stamp)
        .bind(flashcard_id)
        .execute(&mut *tx)
        .await?;

        if touched.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(ReviewOutcome::UnknownFlashcard);
        }

        let (correct, incorrect) = match result {
            AnswerResult::Correct => (1_i64, 0_i64),
            AnswerResult::Incorrect => (0, 1),
        };

        sqlx::query(
            r#"
            INSERT INTO user_progress
                (flashcard_id, user_id, correct_count, incorrect_count, last_result, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT(flashcard_id, user_id) DO UPDATE SET
                correct_count = correct_count + excluded.correct_count,
                incorrect_count = incorrect_count + excluded.incorrect_count,
                last_result = excluded.last_result,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(flashcard_id)
        .bind(user_id)
        .bind(correct)
        .bind(incorrect)
        .bind(result.marker())
        .bind(&stamp)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(ReviewOutcome::Recorded)
    }

    /// Get a user's progress on one flashcard
    pub async fn get_progress(
        &self,
        flashcard_id: i64,
        user_id: &str,
    ) -> Result<Option<UserProgress>> {
        let progress = sqlx::query_as::<_, UserProgress>(
            "SELECT * FROM user_progress WHERE flashcard_id = ? AND user_id = ?",
        )
        .bind(flashcard_id)
        .bind(user_id)
        .fetch_optional(self.pool())
        .await?;

        Ok(progress)
    }

    /// Number of progress rows for a (flashcard, user) pair. Always 0 or 1.
    #[cfg(test)]
    pub async fn count_progress_rows(&self, flashcard_id: i64, user_id: &str) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM user_progress WHERE flashcard_id = ? AND user_id = ?",
        )
        .bind(flashcard_id)
        .bind(user_id)
        .fetch_one(self.pool())
        .await?;

        Ok(count)
    }
}
