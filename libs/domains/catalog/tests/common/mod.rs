//! In-memory stand-ins for MongoDB and the remote services.
//!
//! They honor the same contracts as the real implementations: empty bulk
//! reads are `NotFound`, ids are 24 hex chars, prices are keyed by item id.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{Router, body::Body, http::Request};
use axum_helpers::RequestContext;
use domain_catalog::{
    CatalogError, CatalogResult, Category, CategoryRepository, CategoryService, Item,
    ItemRepository, ItemService, Price, PriceGateway, ShopGateway, handlers,
    models::{ItemDraft, ItemFields, Shop},
};
use http_body_util::BodyExt;
use serde::de::DeserializeOwned;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

fn next_hex_id() -> String {
    format!("{:024x}", NEXT_ID.fetch_add(1, Ordering::Relaxed))
}

fn items_not_found() -> CatalogError {
    CatalogError::NotFound("items not found".to_string())
}

#[derive(Default)]
pub struct InMemoryItems {
    items: Mutex<Vec<Item>>,
}

impl InMemoryItems {
    pub fn len(&self) -> usize {
        self.items.lock().unwrap().len()
    }

    fn find_many(&self, pred: impl Fn(&Item) -> bool) -> CatalogResult<Vec<Item>> {
        let found: Vec<Item> = self
            .items
            .lock()
            .unwrap()
            .iter()
            .filter(|item| pred(item))
            .cloned()
            .collect();
        if found.is_empty() {
            return Err(items_not_found());
        }
        Ok(found)
    }
}

#[async_trait]
impl ItemRepository for InMemoryItems {
    async fn get_by_id(&self, id: &str) -> CatalogResult<Item> {
        self.items
            .lock()
            .unwrap()
            .iter()
            .find(|item| item.id == id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound("item not found".to_string()))
    }

    async fn get_by_user_id(&self, user_id: &str) -> CatalogResult<Vec<Item>> {
        self.find_many(|item| item.user_id == user_id)
    }

    async fn get_by_shop_id(&self, shop_id: &str) -> CatalogResult<Vec<Item>> {
        self.find_many(|item| item.shop_id == shop_id)
    }

    async fn get_by_shop_and_category(
        &self,
        shop_id: &str,
        category_id: &str,
    ) -> CatalogResult<Vec<Item>> {
        self.find_many(|item| item.shop_id == shop_id && item.category.id == category_id)
    }

    async fn get_by_ids(&self, ids: &[String]) -> CatalogResult<Vec<Item>> {
        self.find_many(|item| ids.contains(&item.id))
    }

    async fn get_by_category_id(&self, category_id: &str) -> CatalogResult<Vec<Item>> {
        self.find_many(|item| item.category.id == category_id)
    }

    async fn save(&self, draft: &ItemDraft) -> CatalogResult<String> {
        let id = next_hex_id();
        let fields = draft.fields.clone();
        self.items.lock().unwrap().push(Item {
            id: id.clone(),
            name: fields.name,
            description: fields.description,
            status: fields.status.unwrap_or_default(),
            shop_id: draft.shop_id.clone(),
            user_id: draft.user_id.clone(),
            category: fields.category,
            price: None,
            images: fields.images,
            attributes: fields.attributes,
            eligible: fields.eligible,
        });
        Ok(id)
    }

    async fn update(&self, id: &str, fields: &ItemFields) -> CatalogResult<u64> {
        let mut items = self.items.lock().unwrap();
        let item = items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| CatalogError::NotFound("item not found".to_string()))?;

        item.name = fields.name.clone();
        item.description = fields.description.clone();
        if let Some(status) = fields.status {
            item.status = status;
        }
        item.category = fields.category.clone();
        item.images = fields.images.clone();
        item.attributes = fields.attributes.clone();
        item.eligible = fields.eligible.clone();
        Ok(1)
    }

    async fn delete(&self, id: &str) -> CatalogResult<()> {
        let mut items = self.items.lock().unwrap();
        let before = items.len();
        items.retain(|item| item.id != id);
        if items.len() == before {
            return Err(CatalogError::NotFound("item not found".to_string()));
        }
        Ok(())
    }

    async fn update_category(&self, category: &Category) -> CatalogResult<u64> {
        let mut items = self.items.lock().unwrap();
        let mut matched = 0;
        for item in items.iter_mut().filter(|item| item.category.id == category.id) {
            item.category = category.clone();
            matched += 1;
        }
        if matched == 0 {
            return Err(items_not_found());
        }
        Ok(matched)
    }
}

#[derive(Default)]
pub struct InMemoryCategories {
    categories: Mutex<Vec<Category>>,
}

impl InMemoryCategories {
    pub fn insert(&self, name: &str) -> Category {
        let category = Category::new(next_hex_id(), name);
        self.categories.lock().unwrap().push(category.clone());
        category
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategories {
    async fn get(&self, id: &str) -> CatalogResult<Category> {
        self.categories
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound("category not found".to_string()))
    }

    async fn list(&self) -> CatalogResult<Vec<Category>> {
        Ok(self.categories.lock().unwrap().clone())
    }

    async fn create(&self, name: &str) -> CatalogResult<Category> {
        Ok(self.insert(name))
    }

    async fn rename(&self, category: &Category) -> CatalogResult<()> {
        let mut categories = self.categories.lock().unwrap();
        let stored = categories
            .iter_mut()
            .find(|c| c.id == category.id)
            .ok_or_else(|| CatalogError::NotFound("category not found".to_string()))?;
        stored.name = category.name.clone();
        Ok(())
    }

    async fn delete(&self, id: &str) -> CatalogResult<()> {
        let mut categories = self.categories.lock().unwrap();
        let before = categories.len();
        categories.retain(|c| c.id != id);
        if categories.len() == before {
            return Err(CatalogError::NotFound("category not found".to_string()));
        }
        Ok(())
    }
}

/// Pricing service double. Records every delete it receives.
#[derive(Default)]
pub struct FakePrices {
    prices: Mutex<Vec<Price>>,
    deletes: Mutex<Vec<String>>,
}

impl FakePrices {
    /// Make the pricing service forget an item, as if its data were incomplete.
    pub fn forget(&self, item_id: &str) {
        self.prices.lock().unwrap().retain(|p| p.item_id != item_id);
    }

    pub fn price_of(&self, item_id: &str) -> Option<Price> {
        self.prices
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.item_id == item_id)
            .cloned()
    }

    pub fn delete_calls(&self) -> Vec<String> {
        self.deletes.lock().unwrap().clone()
    }
}

#[async_trait]
impl PriceGateway for FakePrices {
    async fn get_by_item_id(&self, _ctx: &RequestContext, item_id: &str) -> CatalogResult<Price> {
        self.price_of(item_id)
            .ok_or_else(|| CatalogError::NotFound("price not found".to_string()))
    }

    async fn get_many(
        &self,
        _ctx: &RequestContext,
        item_ids: &[String],
    ) -> CatalogResult<Vec<Price>> {
        Ok(self
            .prices
            .lock()
            .unwrap()
            .iter()
            .filter(|p| item_ids.contains(&p.item_id))
            .cloned()
            .collect())
    }

    async fn create(&self, _ctx: &RequestContext, price: &Price) -> CatalogResult<()> {
        let mut stored = price.clone();
        stored.id = next_hex_id();
        self.prices.lock().unwrap().push(stored);
        Ok(())
    }

    async fn update(&self, _ctx: &RequestContext, price: &Price) -> CatalogResult<()> {
        let mut prices = self.prices.lock().unwrap();
        let stored = prices
            .iter_mut()
            .find(|p| p.id == price.id)
            .ok_or_else(|| CatalogError::NotFound("price not found".to_string()))?;
        *stored = price.clone();
        Ok(())
    }

    async fn delete_by_item_id(&self, _ctx: &RequestContext, item_id: &str) -> CatalogResult<()> {
        self.deletes.lock().unwrap().push(item_id.to_string());
        let mut prices = self.prices.lock().unwrap();
        let before = prices.len();
        prices.retain(|p| p.item_id != item_id);
        if prices.len() == before {
            return Err(CatalogError::NotFound("price not found".to_string()));
        }
        Ok(())
    }
}

/// Every caller owns the same shop, unless there is none.
pub struct FakeShops {
    shop_id: Option<String>,
}

#[async_trait]
impl ShopGateway for FakeShops {
    async fn get_for_caller(&self, _ctx: &RequestContext) -> CatalogResult<Shop> {
        self.shop_id
            .clone()
            .map(|id| Shop { id })
            .ok_or_else(|| CatalogError::NotFound("shop not found for caller".to_string()))
    }
}

/// The whole catalog wired to in-memory stores.
pub struct Catalog {
    pub items: Arc<InMemoryItems>,
    pub categories: Arc<InMemoryCategories>,
    pub prices: Arc<FakePrices>,
    pub shops: Arc<FakeShops>,
}

impl Catalog {
    pub fn new(shop_id: Option<&str>) -> Self {
        Self {
            items: Arc::new(InMemoryItems::default()),
            categories: Arc::new(InMemoryCategories::default()),
            prices: Arc::new(FakePrices::default()),
            shops: Arc::new(FakeShops {
                shop_id: shop_id.map(str::to_string),
            }),
        }
    }

    /// A fresh router over the shared stores; `oneshot` consumes it.
    pub fn router(&self) -> Router {
        let items = ItemService::new(
            self.items.clone(),
            self.categories.clone(),
            self.prices.clone(),
            self.shops.clone(),
        );
        let categories = CategoryService::new(self.categories.clone(), self.items.clone());
        handlers::router(items, categories)
    }
}

pub fn json_request(
    method: &str,
    uri: &str,
    user_id: Option<&str>,
    body: Option<serde_json::Value>,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("x-trace-id", "test-trace")
        .header("authorization", "Bearer test-token");
    if let Some(user) = user_id {
        builder = builder.header("x-user-id", user);
    }

    match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn json_body<T: DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
