use serde::{Deserialize, Deserializer, Serialize};
use time::OffsetDateTime;

use crate::validate::{Field, FieldKind};

use super::repo::BookRow;

pub const SCHEMA: &[Field] = &[
    Field {
        name: "title",
        kind: FieldKind::Text { max_len: Some(255) },
        required: true,
    },
    Field {
        name: "author",
        kind: FieldKind::Text { max_len: Some(255) },
        required: true,
    },
    Field {
        name: "no_of_pages",
        kind: FieldKind::Integer,
        required: true,
    },
    Field {
        name: "description",
        kind: FieldKind::Text { max_len: None },
        required: true,
    },
    Field {
        name: "category",
        kind: FieldKind::Reference,
        required: false,
    },
];

/// Validated payload for a create request.
#[derive(Debug, Deserialize)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub no_of_pages: i64,
    pub description: String,
    #[serde(default)]
    pub category: Option<i64>,
}

/// Validated payload for a full or partial update. `category` uses a
/// double `Option` so an absent field (keep persisted value) is
/// distinguishable from an explicit null (clear the reference).
#[derive(Debug, Default, Deserialize)]
pub struct BookChanges {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub no_of_pages: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub category: Option<Option<i64>>,
}

fn double_option<'de, D>(de: D) -> Result<Option<Option<i64>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<i64>::deserialize(de).map(Some)
}

/// Wire shape of a persisted book; `category` is the referenced pk or null.
#[derive(Debug, Serialize)]
pub struct BookData {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub no_of_pages: i64,
    pub description: String,
    pub category: Option<i64>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<BookRow> for BookData {
    fn from(row: BookRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            author: row.author,
            no_of_pages: row.no_of_pages,
            description: row.description,
            category: row.category_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BookEnvelope {
    pub message: String,
    pub data: BookData,
}
