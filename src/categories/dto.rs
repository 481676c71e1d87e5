use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::validate::{Field, FieldKind};

use super::repo::CategoryRow;

pub const SCHEMA: &[Field] = &[Field {
    name: "name",
    kind: FieldKind::Text { max_len: Some(255) },
    required: true,
}];

/// Validated payload for a create request.
#[derive(Debug, Deserialize)]
pub struct NewCategory {
    pub name: String,
}

/// Validated payload for a full or partial update; absent fields keep
/// their persisted values.
#[derive(Debug, Default, Deserialize)]
pub struct CategoryChanges {
    #[serde(default)]
    pub name: Option<String>,
}

/// Wire shape of a persisted category.
#[derive(Debug, Serialize)]
pub struct CategoryData {
    pub id: i64,
    pub name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<CategoryRow> for CategoryData {
    fn from(row: CategoryRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Envelope for create/update responses: confirmation message plus the
/// serialized entity.
#[derive(Debug, Serialize)]
pub struct CategoryEnvelope {
    pub message: String,
    pub data: CategoryData,
}
