use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

/// Everything a catalog operation can fail with.
///
/// Store and gateway failures carry the label of the operation that raised
/// them (`items.get_by_id`, `prices.get_many`, ...) and keep their kind as
/// they travel up through the orchestrators.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("one or more of the provided ids are not a valid hex string")]
    InvalidId,

    #[error("{0}")]
    Validation(String),

    #[error("category name does not match with the existing cat for {category_id}")]
    CategoryMismatch { category_id: String },

    #[error("{0}")]
    NotFound(String),

    #[error("category already exists: {0}")]
    DuplicateCategory(String),

    #[error("category {category_id} is referenced by items: {}", item_ids.join(", "))]
    CategoryInUse {
        category_id: String,
        item_ids: Vec<String>,
    },

    #[error("{0}")]
    Unauthorized(String),

    #[error("[{op}] Error in DB: {message}")]
    Database { op: &'static str, message: String },

    #[error("[{op}] {message}")]
    Upstream { op: &'static str, message: String },

    #[error("{0}")]
    Internal(String),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

impl CatalogError {
    /// Adapter for `map_err` on driver calls.
    pub fn db(op: &'static str) -> impl FnOnce(mongodb::error::Error) -> Self {
        move |err| CatalogError::Database {
            op,
            message: err.to_string(),
        }
    }

    pub fn upstream(op: &'static str, message: impl Into<String>) -> Self {
        CatalogError::Upstream {
            op,
            message: message.into(),
        }
    }

    pub fn missing_caller() -> Self {
        CatalogError::Unauthorized("caller identity is required".to_string())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::NotFound(_))
    }
}

impl From<mongodb::bson::oid::Error> for CatalogError {
    fn from(_: mongodb::bson::oid::Error) -> Self {
        CatalogError::InvalidId
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::InvalidId => AppError::InvalidId(err.to_string()),
            CatalogError::Validation(_) | CatalogError::CategoryMismatch { .. } => {
                AppError::BadRequest(err.to_string())
            }
            CatalogError::NotFound(msg) => AppError::NotFound(msg),
            CatalogError::DuplicateCategory(_) => AppError::Conflict(err.to_string()),
            CatalogError::CategoryInUse { ref item_ids, .. } => AppError::ConflictWithDetails {
                details: serde_json::json!({ "item_ids": item_ids }),
                message: err.to_string(),
            },
            CatalogError::Unauthorized(msg) => AppError::Unauthorized(msg),
            CatalogError::Database { .. } => AppError::Database(err.to_string()),
            CatalogError::Upstream { .. } => AppError::Upstream(err.to_string()),
            CatalogError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
