use async_trait::async_trait;

use crate::error::CatalogResult;
use crate::models::{Category, Item, ItemDraft, ItemFields};

/// Persistence for items.
///
/// Items come back without a price. Every "get many" operation treats an
/// empty result as `NotFound`, so callers never see an empty success.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRepository: Send + Sync {
    async fn get_by_id(&self, id: &str) -> CatalogResult<Item>;

    async fn get_by_user_id(&self, user_id: &str) -> CatalogResult<Vec<Item>>;

    async fn get_by_shop_id(&self, shop_id: &str) -> CatalogResult<Vec<Item>>;

    async fn get_by_shop_and_category(
        &self,
        shop_id: &str,
        category_id: &str,
    ) -> CatalogResult<Vec<Item>>;

    async fn get_by_ids(&self, ids: &[String]) -> CatalogResult<Vec<Item>>;

    async fn get_by_category_id(&self, category_id: &str) -> CatalogResult<Vec<Item>>;

    /// Insert and return the store-assigned id.
    async fn save(&self, draft: &ItemDraft) -> CatalogResult<String>;

    /// Overwrite the client-editable fields. Returns how many documents changed,
    /// which is 0 for a no-op update.
    async fn update(&self, id: &str, fields: &ItemFields) -> CatalogResult<u64>;

    async fn delete(&self, id: &str) -> CatalogResult<()>;

    /// Rewrite the embedded snapshot on every item carrying `category.id`.
    /// `NotFound` when no item embeds it.
    async fn update_category(&self, category: &Category) -> CatalogResult<u64>;
}

/// Persistence for categories. Name uniqueness is not enforced here.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn get(&self, id: &str) -> CatalogResult<Category>;

    /// All categories in store order; may be empty.
    async fn list(&self) -> CatalogResult<Vec<Category>>;

    async fn create(&self, name: &str) -> CatalogResult<Category>;

    async fn rename(&self, category: &Category) -> CatalogResult<()>;

    async fn delete(&self, id: &str) -> CatalogResult<()>;
}
