/// Query construction for flashcard listing
///
/// Turns loosely-typed request parameters into a `FlashcardFilter` and the
/// filter into a parameterized `SELECT`. Values are always bound, never
/// spliced into the SQL text.

use crate::db::models::ANONYMOUS_USER;
use serde::Deserialize;
use sqlx::{QueryBuilder, Sqlite};
use tracing::debug;

/// Row cap when the caller doesn't send a usable `limit`
pub const DEFAULT_LIMIT: i64 = 10;

/// Raw list parameters, exactly as they arrive on the query string
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    pub category: Option<String>,
    pub difficulty: Option<String>,
    pub limit: Option<String>,
    pub random: Option<String>,
    #[serde(rename = "practiceMode")]
    pub practice_mode: Option<String>,
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}

/// Which cards a list request draws from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PracticeMode {
    /// Every card
    All,
    /// Only cards this user last answered incorrectly
    Incorrect { user_id: String },
}

/// Typed, defaulted list request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlashcardFilter {
    pub category: Option<String>,
    pub difficulty: Option<i64>,
    pub limit: i64,
    pub random: bool,
    pub mode: PracticeMode,
}

impl Default for FlashcardFilter {
    fn default() -> Self {
        Self {
            category: None,
            difficulty: None,
            limit: DEFAULT_LIMIT,
            random: false,
            mode: PracticeMode::All,
        }
    }
}

impl FlashcardFilter {
    /// Apply defaults and parse numbers.
    ///
    /// - `category` of `"all"` (or empty) means no filter
    /// - unparseable `difficulty` is ignored
    /// - missing, unparseable or non-positive `limit` falls back to 10
    /// - only the literal `"true"` turns on random ordering
    pub fn from_params(params: &ListParams) -> Self {
        let category = non_empty(params.category.as_deref())
            .filter(|c| *c != "all")
            .map(str::to_string);

        let difficulty = non_empty(params.difficulty.as_deref()).and_then(|raw| {
            match raw.trim().parse::<i64>() {
                Ok(value) => Some(value),
                Err(_) => {
                    debug!(difficulty = raw, "ignoring non-numeric difficulty");
                    None
                }
            }
        });

        let limit = params
            .limit
            .as_deref()
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .filter(|limit| *limit > 0)
            .unwrap_or(DEFAULT_LIMIT);

        let random = params.random.as_deref() == Some("true");

        let mode = match params.practice_mode.as_deref() {
            Some("incorrect") => PracticeMode::Incorrect {
                user_id: non_empty(params.user_id.as_deref())
                    .unwrap_or(ANONYMOUS_USER)
                    .to_string(),
            },
            _ => PracticeMode::All,
        };

        Self {
            category,
            difficulty,
            limit,
            random,
            mode,
        }
    }

    /// Build the SELECT for this filter.
    ///
    /// In incorrect-only mode the scan becomes a join on `user_progress`
    /// and every column is qualified with its table alias.
    pub fn build(&self) -> QueryBuilder<'static, Sqlite> {
        let (mut query, prefix) = match &self.mode {
            PracticeMode::All => (QueryBuilder::new("SELECT * FROM flashcards WHERE 1=1"), ""),
            PracticeMode::Incorrect { user_id } => {
                let mut query = QueryBuilder::new(
                    "SELECT f.* FROM flashcards f \
                     INNER JOIN user_progress p ON f.id = p.flashcard_id \
                     WHERE p.user_id = ",
                );
                query.push_bind(user_id.clone());
                query.push(" AND p.last_result = -1");
                (query, "f.")
            }
        };

        if let Some(category) = &self.category {
            query.push(format!(" AND {prefix}category = "));
            query.push_bind(category.clone());
        }

        if let Some(difficulty) = self.difficulty {
            query.push(format!(" AND {prefix}difficulty = "));
            query.push_bind(difficulty);
        }

        if self.random {
            query.push(" ORDER BY RANDOM()");
        } else {
            query.push(format!(" ORDER BY {prefix}created_at DESC, {prefix}id DESC"));
        }

        query.push(" LIMIT ");
        query.push_bind(self.limit);

        query
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
