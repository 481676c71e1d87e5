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

use super::dto::{CategoryChanges, CategoryData, CategoryEnvelope, NewCategory, SCHEMA};
use super::repo;

// --- public routers ---

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/categories", get(list_categories))
        .route("/categories/:id", get(get_category))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/categories", post(create_category))
        .route(
            "/categories/:id",
            put(update_category)
                .patch(patch_category)
                .delete(delete_category),
        )
}

// --- handlers ---

#[instrument(skip(state))]
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoryData>>, ApiError> {
    let rows = repo::list(&state.db).await?;
    Ok(Json(rows.into_iter().map(CategoryData::from).collect()))
}

#[instrument(skip(state))]
pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<CategoryData>, ApiError> {
    let row = repo::find(&state.db, id).await?.ok_or(ApiError::NotFound)?;
    Ok(Json(CategoryData::from(row)))
}

#[instrument(skip(state, body))]
pub async fn create_category(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<CategoryEnvelope>), ApiError> {
    let body = validate::require_object(&body).map_err(ApiError::Validation)?;
    validate::validate(SCHEMA, body, false).map_err(ApiError::Validation)?;
    let input: NewCategory = serde_json::from_value(Value::Object(body.clone()))
        .map_err(|_| ApiError::Validation(validate::invalid_data()))?;

    let row = repo::insert(&state.db, &input.name, OffsetDateTime::now_utc()).await?;
    let data = CategoryData::from(row);
    let message = format!("{} category has been created", data.name);
    Ok((StatusCode::CREATED, Json(CategoryEnvelope { message, data })))
}

#[instrument(skip(state, body))]
pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Result<Json<CategoryEnvelope>, ApiError> {
    apply_update(&state, id, body, false).await
}

#[instrument(skip(state, body))]
pub async fn patch_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Result<Json<CategoryEnvelope>, ApiError> {
    apply_update(&state, id, body, true).await
}

async fn apply_update(
    state: &AppState,
    id: i64,
    body: Value,
    partial: bool,
) -> Result<Json<CategoryEnvelope>, ApiError> {
    let existing = repo::find(&state.db, id).await?.ok_or(ApiError::NotFound)?;

    let body = validate::require_object(&body).map_err(ApiError::Validation)?;
    validate::validate(SCHEMA, body, partial).map_err(ApiError::Validation)?;
    let changes: CategoryChanges = serde_json::from_value(Value::Object(body.clone()))
        .map_err(|_| ApiError::Validation(validate::invalid_data()))?;

    let name = changes.name.unwrap_or(existing.name);
    let row = repo::update(&state.db, id, &name, OffsetDateTime::now_utc()).await?;

    let data = CategoryData::from(row);
    let message = format!("{} category has been updated", data.name);
    Ok(Json(CategoryEnvelope { message, data }))
}

#[instrument(skip(state))]
pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let existing = repo::find(&state.db, id).await?.ok_or(ApiError::NotFound)?;

    let message = format!("{} category has been deleted", existing.name);
    repo::delete_and_nullify_books(&state.db, id).await?;

    Ok((StatusCode::NO_CONTENT, Json(json!({ "message": message }))))
}
