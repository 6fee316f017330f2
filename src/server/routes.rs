/// Request handlers for the flashcard API

use super::error::{not_found, ApiError};
use super::state::AppState;
use crate::core::{NewFlashcard, ReviewRequest};
use crate::db::{CategoryCount, Flashcard, FlashcardFilter, ListParams};
use crate::error::FlashcardError;
use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::response::{Html, IntoResponse};
use axum::Json;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;

const INDEX_HTML: &str = include_str!("../../static/index.html");

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: i64,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

pub async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn list_flashcards_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Flashcard>>, ApiError> {
    let filter = FlashcardFilter::from_params(&params);
    let cards = state.deck.list(&filter).await?;

    Ok(Json(cards))
}

pub async fn create_flashcard_handler(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<CreatedResponse>, ApiError> {
    let request: NewFlashcard = parse_body(&body)?;
    let id = state.deck.create(request).await?;

    Ok(Json(CreatedResponse {
        id,
        message: "Flashcard created successfully",
    }))
}

pub async fn update_progress_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<MessageResponse>, ApiError> {
    let flashcard_id: i64 = id.parse().map_err(|_| FlashcardError::NotFound)?;
    let request: ReviewRequest = parse_body(&body)?;

    state.tracker.review(flashcard_id, &request).await?;

    Ok(Json(MessageResponse {
        message: "Progress updated",
    }))
}

pub async fn categories_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<CategoryCount>>, ApiError> {
    let categories = state.deck.categories().await?;

    Ok(Json(categories))
}

pub async fn not_found_handler() -> impl IntoResponse {
    not_found()
}

// Content-Type isn't required, any body that parses is accepted
fn parse_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, ApiError> {
    let parsed = serde_json::from_slice(body).map_err(FlashcardError::from)?;
    Ok(parsed)
}
