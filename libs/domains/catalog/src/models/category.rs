use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// A category, and also the id+name snapshot items embed.
///
/// The snapshot is denormalized: renaming a category rewrites every item
/// that embeds its id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct Category {
    #[schema(example = "64b7f0c2a1b2c3d4e5f60718")]
    pub id: String,
    #[validate(length(min = 1, max = 120))]
    #[schema(example = "Shoes")]
    pub name: String,
}

impl Category {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCategory {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
}

/// Rename request; `id` travels in the body.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateCategory {
    pub id: String,
    #[validate(length(min = 1, max = 120))]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryList {
    pub categories: Vec<Category>,
}
