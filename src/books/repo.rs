use sqlx::{FromRow, SqlitePool};
use time::OffsetDateTime;

#[derive(Debug, Clone, FromRow)]
pub struct BookRow {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub no_of_pages: i64,
    pub description: String,
    pub category_id: Option<i64>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

const COLUMNS: &str = "id, title, author, no_of_pages, description, category_id, created_at, updated_at";

pub async fn list(db: &SqlitePool) -> Result<Vec<BookRow>, sqlx::Error> {
    sqlx::query_as::<_, BookRow>(&format!(
        "SELECT {COLUMNS} FROM books ORDER BY id"
    ))
    .fetch_all(db)
    .await
}

pub async fn find(db: &SqlitePool, id: i64) -> Result<Option<BookRow>, sqlx::Error> {
    sqlx::query_as::<_, BookRow>(&format!(
        "SELECT {COLUMNS} FROM books WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(db)
    .await
}

pub async fn category_exists(db: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let row: Option<(i64,)> = sqlx::query_as("SELECT id FROM categories WHERE id = $1")
        .bind(id)
        .fetch_optional(db)
        .await?;
    Ok(row.is_some())
}

#[allow(clippy::too_many_arguments)]
pub async fn insert(
    db: &SqlitePool,
    title: &str,
    author: &str,
    no_of_pages: i64,
    description: &str,
    category_id: Option<i64>,
    now: OffsetDateTime,
) -> Result<BookRow, sqlx::Error> {
    sqlx::query_as::<_, BookRow>(&format!(
        r#"
        INSERT INTO books (title, author, no_of_pages, description, category_id, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING {COLUMNS}
        "#
    ))
    .bind(title)
    .bind(author)
    .bind(no_of_pages)
    .bind(description)
    .bind(category_id)
    .bind(now)
    .bind(now)
    .fetch_one(db)
    .await
}

#[allow(clippy::too_many_arguments)]
pub async fn update(
    db: &SqlitePool,
    id: i64,
    title: &str,
    author: &str,
    no_of_pages: i64,
    description: &str,
    category_id: Option<i64>,
    now: OffsetDateTime,
) -> Result<BookRow, sqlx::Error> {
    sqlx::query_as::<_, BookRow>(&format!(
        r#"
        UPDATE books
        SET title = $1, author = $2, no_of_pages = $3, description = $4,
            category_id = $5, updated_at = $6
        WHERE id = $7
        RETURNING {COLUMNS}
        "#
    ))
    .bind(title)
    .bind(author)
    .bind(no_of_pages)
    .bind(description)
    .bind(category_id)
    .bind(now)
    .bind(id)
    .fetch_one(db)
    .await
}

pub async fn delete(db: &SqlitePool, id: i64) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM books WHERE id = $1")
        .bind(id)
        .execute(db)
        .await?;
    Ok(())
}
