use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{Document, doc, oid::ObjectId, to_bson},
    options::IndexOptions,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::instrument;

use super::ITEMS_COLLECTION;
use crate::error::{CatalogError, CatalogResult};
use crate::models::{Category, Eligible, Item, ItemDraft, ItemFields, ItemStatus};
use crate::repository::ItemRepository;

/// Embedded category as stored: the id lives under `_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CategorySnapshot {
    #[serde(rename = "_id")]
    id: String,
    name: String,
}

impl From<&Category> for CategorySnapshot {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id.clone(),
            name: category.name.clone(),
        }
    }
}

/// Stored item. Prices are never persisted here.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ItemDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    status: ItemStatus,
    shop_id: String,
    user_id: String,
    category: CategorySnapshot,
    #[serde(default)]
    images: Vec<String>,
    #[serde(default)]
    attributes: BTreeMap<String, String>,
    #[serde(default)]
    eligible: Vec<Eligible>,
}

impl From<&ItemDraft> for ItemDocument {
    fn from(draft: &ItemDraft) -> Self {
        let fields = &draft.fields;
        Self {
            id: None,
            name: fields.name.clone(),
            description: fields.description.clone(),
            status: fields.status.unwrap_or_default(),
            shop_id: draft.shop_id.clone(),
            user_id: draft.user_id.clone(),
            category: CategorySnapshot::from(&fields.category),
            images: fields.images.clone(),
            attributes: fields.attributes.clone(),
            eligible: fields.eligible.clone(),
        }
    }
}

impl From<ItemDocument> for Item {
    fn from(doc: ItemDocument) -> Self {
        Self {
            id: doc.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: doc.name,
            description: doc.description,
            status: doc.status,
            shop_id: doc.shop_id,
            user_id: doc.user_id,
            category: Category::new(doc.category.id, doc.category.name),
            price: None,
            images: doc.images,
            attributes: doc.attributes,
            eligible: doc.eligible,
        }
    }
}

fn by_id(id: &str) -> CatalogResult<Document> {
    Ok(doc! { "_id": ObjectId::parse_str(id)? })
}

fn by_ids(ids: &[String]) -> CatalogResult<Document> {
    let oids = ids
        .iter()
        .map(ObjectId::parse_str)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(doc! { "_id": { "$in": oids } })
}

fn by_shop_and_category(shop_id: &str, category_id: &str) -> Document {
    doc! { "shop_id": shop_id, "category._id": category_id }
}

/// `$set` for the client-editable fields. Owner and shop are never rewritten.
fn field_update(fields: &ItemFields) -> CatalogResult<Document> {
    let encode = |e: mongodb::bson::ser::Error| CatalogError::Internal(e.to_string());

    let mut set = doc! {
        "name": fields.name.as_str(),
        "description": fields.description.as_str(),
        "category": { "_id": fields.category.id.as_str(), "name": fields.category.name.as_str() },
        "images": fields.images.clone(),
        "attributes": to_bson(&fields.attributes).map_err(encode)?,
        "eligible": to_bson(&fields.eligible).map_err(encode)?,
    };
    if let Some(status) = fields.status {
        set.insert("status", status.to_string());
    }

    Ok(doc! { "$set": set })
}

fn category_rewrite(category: &Category) -> (Document, Document) {
    (
        doc! { "category._id": category.id.as_str() },
        doc! { "$set": { "category._id": category.id.as_str(), "category.name": category.name.as_str() } },
    )
}

/// MongoDB implementation of the ItemRepository
pub struct MongoItemRepository {
    collection: Collection<ItemDocument>,
}

impl MongoItemRepository {
    pub fn new(db: Database) -> Self {
        Self::with_collection(db, ITEMS_COLLECTION)
    }

    pub fn with_collection(db: Database, collection_name: &str) -> Self {
        Self {
            collection: db.collection::<ItemDocument>(collection_name),
        }
    }

    /// Indexes backing the owner, shop and category lookups.
    pub async fn init_indexes(&self) -> CatalogResult<()> {
        let index = |keys: Document, name: &str| {
            IndexModel::builder()
                .keys(keys)
                .options(IndexOptions::builder().name(name.to_string()).build())
                .build()
        };

        let indexes = vec![
            index(doc! { "user_id": 1 }, "idx_user_id"),
            index(doc! { "shop_id": 1, "category._id": 1 }, "idx_shop_category"),
            index(doc! { "category._id": 1 }, "idx_category_id"),
        ];

        self.collection
            .create_indexes(indexes)
            .await
            .map_err(CatalogError::db("items.init_indexes"))?;

        tracing::info!("Item indexes initialized");
        Ok(())
    }

    async fn find_many(&self, filter: Document, op: &'static str) -> CatalogResult<Vec<Item>> {
        let cursor = self
            .collection
            .find(filter)
            .await
            .map_err(CatalogError::db(op))?;
        let docs: Vec<ItemDocument> = cursor.try_collect().await.map_err(CatalogError::db(op))?;

        if docs.is_empty() {
            return Err(CatalogError::NotFound("items not found".to_string()));
        }

        Ok(docs.into_iter().map(Item::from).collect())
    }
}

#[async_trait]
impl ItemRepository for MongoItemRepository {
    #[instrument(skip(self))]
    async fn get_by_id(&self, id: &str) -> CatalogResult<Item> {
        self.collection
            .find_one(by_id(id)?)
            .await
            .map_err(CatalogError::db("items.get_by_id"))?
            .map(Item::from)
            .ok_or_else(|| CatalogError::NotFound("item not found".to_string()))
    }

    #[instrument(skip(self))]
    async fn get_by_user_id(&self, user_id: &str) -> CatalogResult<Vec<Item>> {
        self.find_many(doc! { "user_id": user_id }, "items.get_by_user_id")
            .await
    }

    #[instrument(skip(self))]
    async fn get_by_shop_id(&self, shop_id: &str) -> CatalogResult<Vec<Item>> {
        self.find_many(doc! { "shop_id": shop_id }, "items.get_by_shop_id")
            .await
    }

    #[instrument(skip(self))]
    async fn get_by_shop_and_category(
        &self,
        shop_id: &str,
        category_id: &str,
    ) -> CatalogResult<Vec<Item>> {
        self.find_many(
            by_shop_and_category(shop_id, category_id),
            "items.get_by_shop_and_category",
        )
        .await
    }

    #[instrument(skip(self), fields(count = ids.len()))]
    async fn get_by_ids(&self, ids: &[String]) -> CatalogResult<Vec<Item>> {
        self.find_many(by_ids(ids)?, "items.get_by_ids").await
    }

    #[instrument(skip(self))]
    async fn get_by_category_id(&self, category_id: &str) -> CatalogResult<Vec<Item>> {
        self.find_many(
            doc! { "category._id": category_id },
            "items.get_by_category_id",
        )
        .await
    }

    #[instrument(skip(self, draft), fields(item_name = %draft.fields.name, shop_id = %draft.shop_id))]
    async fn save(&self, draft: &ItemDraft) -> CatalogResult<String> {
        let result = self
            .collection
            .insert_one(ItemDocument::from(draft))
            .await
            .map_err(CatalogError::db("items.save"))?;

        let id = result
            .inserted_id
            .as_object_id()
            .map(|oid| oid.to_hex())
            .ok_or_else(|| CatalogError::Internal("item not created".to_string()))?;

        tracing::info!(item_id = %id, "Item created");
        Ok(id)
    }

    #[instrument(skip(self, fields))]
    async fn update(&self, id: &str, fields: &ItemFields) -> CatalogResult<u64> {
        let result = self
            .collection
            .update_one(by_id(id)?, field_update(fields)?)
            .await
            .map_err(CatalogError::db("items.update"))?;

        if result.matched_count == 0 {
            return Err(CatalogError::NotFound("item not found".to_string()));
        }

        tracing::info!(item_id = %id, modified = result.modified_count, "Item updated");
        Ok(result.modified_count)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> CatalogResult<()> {
        let result = self
            .collection
            .delete_one(by_id(id)?)
            .await
            .map_err(CatalogError::db("items.delete"))?;

        if result.deleted_count == 0 {
            return Err(CatalogError::NotFound("item not found".to_string()));
        }

        tracing::info!(item_id = %id, "Item deleted");
        Ok(())
    }

    #[instrument(skip(self), fields(category_id = %category.id))]
    async fn update_category(&self, category: &Category) -> CatalogResult<u64> {
        let (filter, update) = category_rewrite(category);
        let result = self
            .collection
            .update_many(filter, update)
            .await
            .map_err(CatalogError::db("items.update_category"))?;

        if result.matched_count == 0 {
            return Err(CatalogError::NotFound(format!(
                "no items embed category {}",
                category.id
            )));
        }

        Ok(result.modified_count)
    }
}
