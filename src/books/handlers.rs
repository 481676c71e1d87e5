use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use time::OffsetDateTime;
use tracing::instrument;

use crate::error::ApiError;
use crate::state::AppState;
use crate::validate;

use super::dto::{BookChanges, BookData, BookEnvelope, NewBook, SCHEMA};
use super::repo;

// --- public routers ---

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/books", get(list_books))
        .route("/books/:id", get(get_book))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/books", post(create_book))
        .route(
            "/books/:id",
            put(update_book).patch(patch_book).delete(delete_book),
        )
}

// --- handlers ---

#[instrument(skip(state))]
pub async fn list_books(State(state): State<AppState>) -> Result<Json<Vec<BookData>>, ApiError> {
    let rows = repo::list(&state.db).await?;
    Ok(Json(rows.into_iter().map(BookData::from).collect()))
}

#[instrument(skip(state))]
pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<BookData>, ApiError> {
    let row = repo::find(&state.db, id).await?.ok_or(ApiError::NotFound)?;
    Ok(Json(BookData::from(row)))
}

#[instrument(skip(state, body))]
pub async fn create_book(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<BookEnvelope>), ApiError> {
    let body = validate::require_object(&body).map_err(ApiError::Validation)?;
    validate::validate(SCHEMA, body, false).map_err(ApiError::Validation)?;
    let input: NewBook = serde_json::from_value(Value::Object(body.clone()))
        .map_err(|_| ApiError::Validation(validate::invalid_data()))?;

    if let Some(pk) = input.category {
        if !repo::category_exists(&state.db, pk).await? {
            return Err(ApiError::Validation(validate::invalid_pk("category", pk)));
        }
    }

    let row = repo::insert(
        &state.db,
        &input.title,
        &input.author,
        input.no_of_pages,
        &input.description,
        input.category,
        OffsetDateTime::now_utc(),
    )
    .await?;

    let data = BookData::from(row);
    let message = format!("{} has been created", data.title);
    Ok((StatusCode::CREATED, Json(BookEnvelope { message, data })))
}

#[instrument(skip(state, body))]
pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Result<Json<BookEnvelope>, ApiError> {
    apply_update(&state, id, body, false).await
}

#[instrument(skip(state, body))]
pub async fn patch_book(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Result<Json<BookEnvelope>, ApiError> {
    apply_update(&state, id, body, true).await
}

async fn apply_update(
    state: &AppState,
    id: i64,
    body: Value,
    partial: bool,
) -> Result<Json<BookEnvelope>, ApiError> {
    let existing = repo::find(&state.db, id).await?.ok_or(ApiError::NotFound)?;

    let body = validate::require_object(&body).map_err(ApiError::Validation)?;
    validate::validate(SCHEMA, body, partial).map_err(ApiError::Validation)?;
    let changes: BookChanges = serde_json::from_value(Value::Object(body.clone()))
        .map_err(|_| ApiError::Validation(validate::invalid_data()))?;

    // Absent `category` keeps the persisted reference; explicit null clears it.
    let category_id = match changes.category {
        Some(value) => value,
        None => existing.category_id,
    };
    if let Some(Some(pk)) = changes.category {
        if !repo::category_exists(&state.db, pk).await? {
            return Err(ApiError::Validation(validate::invalid_pk("category", pk)));
        }
    }

    let title = changes.title.unwrap_or(existing.title);
    let author = changes.author.unwrap_or(existing.author);
    let no_of_pages = changes.no_of_pages.unwrap_or(existing.no_of_pages);
    let description = changes.description.unwrap_or(existing.description);

    let row = repo::update(
        &state.db,
        id,
        &title,
        &author,
        no_of_pages,
        &description,
        category_id,
        OffsetDateTime::now_utc(),
    )
    .await?;

    let data = BookData::from(row);
    let message = format!("{} has been updated", data.title);
    Ok(Json(BookEnvelope { message, data }))
}

#[instrument(skip(state))]
pub async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let existing = repo::find(&state.db, id).await?.ok_or(ApiError::NotFound)?;

    let message = format!("{} has been deleted", existing.title);
    repo::delete(&state.db, id).await?;

    Ok((StatusCode::NO_CONTENT, Json(json!({ "message": message }))))
}
