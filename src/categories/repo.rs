use sqlx::{FromRow, SqlitePool};
use time::OffsetDateTime;

#[derive(Debug, Clone, FromRow)]
pub struct CategoryRow {
    pub id: i64,
    pub name: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

pub async fn list(db: &SqlitePool) -> Result<Vec<CategoryRow>, sqlx::Error> {
    sqlx::query_as::<_, CategoryRow>(
        r#"
        SELECT id, name, created_at, updated_at
        FROM categories
        ORDER BY id
        "#,
    )
    .fetch_all(db)
    .await
}

pub async fn find(db: &SqlitePool, id: i64) -> Result<Option<CategoryRow>, sqlx::Error> {
    sqlx::query_as::<_, CategoryRow>(
        r#"
        SELECT id, name, created_at, updated_at
        FROM categories
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await
}

pub async fn insert(
    db: &SqlitePool,
    name: &str,
    now: OffsetDateTime,
) -> Result<CategoryRow, sqlx::Error> {
    sqlx::query_as::<_, CategoryRow>(
        r#"
        INSERT INTO categories (name, created_at, updated_at)
        VALUES ($1, $2, $3)
        RETURNING id, name, created_at, updated_at
        "#,
    )
    .bind(name)
    .bind(now)
    .bind(now)
    .fetch_one(db)
    .await
}

pub async fn update(
    db: &SqlitePool,
    id: i64,
    name: &str,
    now: OffsetDateTime,
) -> Result<CategoryRow, sqlx::Error> {
    sqlx::query_as::<_, CategoryRow>(
        r#"
        UPDATE categories
        SET name = $1, updated_at = $2
        WHERE id = $3
        RETURNING id, name, created_at, updated_at
        "#,
    )
    .bind(name)
    .bind(now)
    .bind(id)
    .fetch_one(db)
    .await
}

/// Deletes a category and clears the reference on every book that points
/// at it, in one transaction so readers never observe a dangling pk.
pub async fn delete_and_nullify_books(db: &SqlitePool, id: i64) -> Result<(), sqlx::Error> {
    let mut tx = db.begin().await?;

    sqlx::query("UPDATE books SET category_id = NULL WHERE category_id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    sqlx::query("DELETE FROM categories WHERE id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await
}
