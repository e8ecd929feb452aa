//! Categories orchestrator: name uniqueness, rename cascade, guarded delete.

use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::guards::{check_name_available, check_unused};
use crate::error::{CatalogError, CatalogResult};
use crate::models::Category;
use crate::repository::{CategoryRepository, ItemRepository};
use crate::validation::validate_hex_ids;

pub struct CategoryService<C, I>
where
    C: CategoryRepository,
    I: ItemRepository,
{
    categories: Arc<C>,
    items: Arc<I>,
}

impl<C, I> CategoryService<C, I>
where
    C: CategoryRepository,
    I: ItemRepository,
{
    pub fn new(categories: Arc<C>, items: Arc<I>) -> Self {
        Self { categories, items }
    }

    /// Every category. An empty store is reported as `NotFound`.
    #[instrument(skip(self))]
    pub async fn list(&self) -> CatalogResult<Vec<Category>> {
        let categories = self.categories.list().await?;
        if categories.is_empty() {
            return Err(CatalogError::NotFound("no categories found".to_string()));
        }
        Ok(categories)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> CatalogResult<Category> {
        validate_hex_ids([id])?;
        self.categories.get(id).await
    }

    #[instrument(skip(self))]
    pub async fn create(&self, name: &str) -> CatalogResult<Category> {
        let existing = self.categories.list().await?;
        check_name_available(name, &existing).into_result("")?;

        self.categories.create(name).await
    }

    /// Rename, then rewrite the snapshot embedded in every item.
    ///
    /// Items are rewritten after the category itself; a category no item
    /// embeds is not an error.
    #[instrument(skip(self), fields(category_id = %category.id))]
    pub async fn rename(&self, category: &Category) -> CatalogResult<()> {
        validate_hex_ids([&category.id])?;

        let existing = self.categories.list().await?;
        check_name_available(&category.name, &existing).into_result(&category.id)?;

        self.categories.rename(category).await?;

        match self.items.update_category(category).await {
            Ok(rewritten) => {
                info!(rewritten, name = %category.name, "Category renamed on items");
                Ok(())
            }
            Err(err) if err.is_not_found() => {
                info!("No items embed the renamed category");
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "Category renamed but items still carry the old name");
                Err(err)
            }
        }
    }

    /// Refuses while any item embeds the category.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> CatalogResult<()> {
        validate_hex_ids([id])?;

        let referencing = match self.items.get_by_category_id(id).await {
            Ok(items) => items,
            Err(err) if err.is_not_found() => Vec::new(),
            Err(err) => return Err(err),
        };
        check_unused(&referencing).into_result(id)?;

        self.categories.delete(id).await
    }
}

impl<C, I> Clone for CategoryService<C, I>
where
    C: CategoryRepository,
    I: ItemRepository,
{
    fn clone(&self) -> Self {
        Self {
            categories: Arc::clone(&self.categories),
            items: Arc::clone(&self.items),
        }
    }
}
