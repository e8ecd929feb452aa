use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database,
    bson::{doc, oid::ObjectId},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::CATEGORIES_COLLECTION;
use crate::error::{CatalogError, CatalogResult};
use crate::models::Category;
use crate::repository::CategoryRepository;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CategoryDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    name: String,
}

impl From<CategoryDocument> for Category {
    fn from(doc: CategoryDocument) -> Self {
        Category::new(doc.id.map(|id| id.to_hex()).unwrap_or_default(), doc.name)
    }
}

fn not_found() -> CatalogError {
    CatalogError::NotFound("category not found".to_string())
}

/// MongoDB implementation of the CategoryRepository
pub struct MongoCategoryRepository {
    collection: Collection<CategoryDocument>,
}

impl MongoCategoryRepository {
    pub fn new(db: Database) -> Self {
        Self::with_collection(db, CATEGORIES_COLLECTION)
    }

    pub fn with_collection(db: Database, collection_name: &str) -> Self {
        Self {
            collection: db.collection::<CategoryDocument>(collection_name),
        }
    }
}

#[async_trait]
impl CategoryRepository for MongoCategoryRepository {
    #[instrument(skip(self))]
    async fn get(&self, id: &str) -> CatalogResult<Category> {
        self.collection
            .find_one(doc! { "_id": ObjectId::parse_str(id)? })
            .await
            .map_err(CatalogError::db("categories.get"))?
            .map(Category::from)
            .ok_or_else(not_found)
    }

    #[instrument(skip(self))]
    async fn list(&self) -> CatalogResult<Vec<Category>> {
        let cursor = self
            .collection
            .find(doc! {})
            .await
            .map_err(CatalogError::db("categories.list"))?;
        let docs: Vec<CategoryDocument> = cursor
            .try_collect()
            .await
            .map_err(CatalogError::db("categories.list"))?;

        Ok(docs.into_iter().map(Category::from).collect())
    }

    #[instrument(skip(self))]
    async fn create(&self, name: &str) -> CatalogResult<Category> {
        let result = self
            .collection
            .insert_one(CategoryDocument {
                id: None,
                name: name.to_string(),
            })
            .await
            .map_err(CatalogError::db("categories.create"))?;

        let id = result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| CatalogError::Internal("category not created".to_string()))?;

        tracing::info!(category_id = %id, "Category created");
        Ok(Category::new(id.to_hex(), name))
    }

    #[instrument(skip(self), fields(category_id = %category.id))]
    async fn rename(&self, category: &Category) -> CatalogResult<()> {
        let result = self
            .collection
            .update_one(
                doc! { "_id": ObjectId::parse_str(&category.id)? },
                doc! { "$set": { "name": category.name.as_str() } },
            )
            .await
            .map_err(CatalogError::db("categories.rename"))?;

        if result.matched_count == 0 {
            return Err(not_found());
        }

        tracing::info!(name = %category.name, "Category renamed");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> CatalogResult<()> {
        let result = self
            .collection
            .delete_one(doc! { "_id": ObjectId::parse_str(id)? })
            .await
            .map_err(CatalogError::db("categories.delete"))?;

        if result.deleted_count == 0 {
            return Err(not_found());
        }

        tracing::info!(category_id = %id, "Category deleted");
        Ok(())
    }
}
