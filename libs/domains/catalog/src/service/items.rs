//! Items orchestrator: the item store plus the pricing and shop services.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use axum_helpers::RequestContext;
use tracing::{info, instrument};

use super::saga::{CrossStoreWrite, StepOutcome};
use crate::clients::{PriceGateway, ShopGateway};
use crate::error::{CatalogError, CatalogResult};
use crate::models::{Category, Item, ItemDraft, ItemInput, Price};
use crate::repository::{CategoryRepository, ItemRepository};
use crate::validation::validate_hex_ids;

/// Result of a bulk read.
///
/// Items without a price are dropped, so `items` can be shorter than
/// `expected`. That is reported, not treated as an error.
#[derive(Debug, Clone, PartialEq)]
pub struct PricedItems {
    pub items: Vec<Item>,
    pub expected: usize,
}

impl PricedItems {
    pub fn is_partial(&self) -> bool {
        self.items.len() < self.expected
    }
}

/// Attach prices to items, keeping item order.
///
/// An item keeps the first price carrying its id; items with no price are
/// left out.
pub fn join_prices(items: Vec<Item>, prices: Vec<Price>) -> Vec<Item> {
    let mut by_item: HashMap<String, Price> = HashMap::with_capacity(prices.len());
    for price in prices {
        by_item.entry(price.item_id.clone()).or_insert(price);
    }

    let mut seen = HashSet::with_capacity(items.len());
    items
        .into_iter()
        .filter(|item| seen.insert(item.id.clone()))
        .filter_map(|item| {
            let price = by_item.get(&item.id)?.clone();
            Some(item.with_price(price))
        })
        .collect()
}

/// First occurrence of every id, in request order.
fn dedup_ids(ids: &[String]) -> Vec<String> {
    let mut seen = HashSet::with_capacity(ids.len());
    let mut unique = Vec::with_capacity(ids.len());
    for id in ids {
        if seen.insert(id.as_str()) {
            unique.push(id.clone());
        }
    }
    unique
}

pub struct ItemService<R, C, P, S>
where
    R: ItemRepository,
    C: CategoryRepository,
    P: PriceGateway,
    S: ShopGateway,
{
    items: Arc<R>,
    categories: Arc<C>,
    prices: Arc<P>,
    shops: Arc<S>,
}

impl<R, C, P, S> ItemService<R, C, P, S>
where
    R: ItemRepository,
    C: CategoryRepository,
    P: PriceGateway,
    S: ShopGateway,
{
    pub fn new(items: Arc<R>, categories: Arc<C>, prices: Arc<P>, shops: Arc<S>) -> Self {
        Self {
            items,
            categories,
            prices,
            shops,
        }
    }

    /// A single item with its price. An item whose price cannot be
    /// resolved is not served.
    #[instrument(skip(self, ctx), fields(trace_id = %ctx.trace_id))]
    pub async fn get_item(&self, ctx: &RequestContext, id: &str) -> CatalogResult<Item> {
        validate_hex_ids([id])?;

        let item = self.items.get_by_id(id).await?;
        let price = self.prices.get_by_item_id(ctx, id).await?;
        Ok(item.with_price(price))
    }

    /// Items owned by the calling user.
    #[instrument(skip(self, ctx), fields(trace_id = %ctx.trace_id))]
    pub async fn items_for_caller(&self, ctx: &RequestContext) -> CatalogResult<PricedItems> {
        let user_id = ctx.caller().ok_or_else(CatalogError::missing_caller)?;
        let items = self.items.get_by_user_id(user_id).await?;
        self.price_all(ctx, items).await
    }

    #[instrument(skip(self, ctx), fields(trace_id = %ctx.trace_id))]
    pub async fn items_by_shop(
        &self,
        ctx: &RequestContext,
        shop_id: &str,
    ) -> CatalogResult<PricedItems> {
        validate_hex_ids([shop_id])?;
        let items = self.items.get_by_shop_id(shop_id).await?;
        self.price_all(ctx, items).await
    }

    #[instrument(skip(self, ctx), fields(trace_id = %ctx.trace_id))]
    pub async fn items_by_shop_and_category(
        &self,
        ctx: &RequestContext,
        shop_id: &str,
        category_id: &str,
    ) -> CatalogResult<PricedItems> {
        validate_hex_ids([shop_id, category_id])?;
        let items = self
            .items
            .get_by_shop_and_category(shop_id, category_id)
            .await?;
        self.price_all(ctx, items).await
    }

    #[instrument(skip(self, ctx), fields(trace_id = %ctx.trace_id))]
    pub async fn items_by_category(
        &self,
        ctx: &RequestContext,
        category_id: &str,
    ) -> CatalogResult<PricedItems> {
        validate_hex_ids([category_id])?;
        let items = self.items.get_by_category_id(category_id).await?;
        self.price_all(ctx, items).await
    }

    /// Bulk lookup by id. `expected` is the number of ids as requested,
    /// repeats included, so a repeated or unknown id marks the result as
    /// partial. The store is queried once per distinct id.
    #[instrument(skip(self, ctx, ids), fields(trace_id = %ctx.trace_id, requested = ids.len()))]
    pub async fn items_by_ids(
        &self,
        ctx: &RequestContext,
        ids: &[String],
    ) -> CatalogResult<PricedItems> {
        validate_hex_ids(ids)?;

        let items = self.items.get_by_ids(&dedup_ids(ids)).await?;
        let priced = self.price_all(ctx, items).await?;
        Ok(PricedItems {
            items: priced.items,
            expected: ids.len(),
        })
    }

    /// One batched price lookup for all `items`, then the join.
    async fn price_all(&self, ctx: &RequestContext, items: Vec<Item>) -> CatalogResult<PricedItems> {
        let expected = items.len();
        let ids: Vec<String> = items.iter().map(|item| item.id.clone()).collect();
        let prices = self.prices.get_many(ctx, &ids).await?;

        let items = join_prices(items, prices);
        if items.len() < expected {
            info!(
                expected,
                priced = items.len(),
                "Dropped items without a price from bulk read"
            );
        }

        Ok(PricedItems { items, expected })
    }

    /// The submitted category snapshot must match the stored category exactly.
    #[instrument(skip(self))]
    pub async fn ensure_category_matches(&self, category: &Category) -> CatalogResult<()> {
        validate_hex_ids([&category.id])?;

        let stored = self.categories.get(&category.id).await?;
        if stored.name != category.name {
            return Err(CatalogError::CategoryMismatch {
                category_id: stored.id,
            });
        }
        Ok(())
    }

    /// Create an item and its price, returning the new item id.
    pub async fn create_item(&self, ctx: &RequestContext, input: ItemInput) -> CatalogResult<String> {
        self.create_item_steps(ctx, input).await?.into_result()
    }

    /// Pre-conditions fail with `Err` before anything is written. Once the
    /// item is saved, the outcome of each store is recorded.
    #[instrument(skip(self, ctx, input), fields(trace_id = %ctx.trace_id, item_name = %input.name))]
    pub async fn create_item_steps(
        &self,
        ctx: &RequestContext,
        input: ItemInput,
    ) -> CatalogResult<CrossStoreWrite> {
        let user_id = ctx
            .caller()
            .ok_or_else(CatalogError::missing_caller)?
            .to_string();
        let shop = self.shops.get_for_caller(ctx).await?;

        let (mut fields, mut price) = input.into_parts()?;
        self.ensure_category_matches(&fields.category).await?;
        fields.assign_eligible_ids();

        let draft = ItemDraft {
            shop_id: shop.id,
            user_id,
            fields,
        };

        let item_id = self.items.save(&draft).await?;
        let mut saga = CrossStoreWrite::new("items.create", item_id.clone());
        saga.item = StepOutcome::Completed;

        price.item_id = item_id;
        saga.price = StepOutcome::from_result(self.prices.create(ctx, &price).await);

        if saga.is_complete() {
            info!(item_id = %saga.item_id, shop_id = %draft.shop_id, "Item created");
        }
        Ok(saga)
    }

    pub async fn update_item(
        &self,
        ctx: &RequestContext,
        id: &str,
        input: ItemInput,
    ) -> CatalogResult<()> {
        self.update_item_steps(ctx, id, input)
            .await?
            .into_result()
            .map(|_| ())
    }

    /// Replace the item's editable fields and its price. The existing price
    /// record is looked up first so its id survives the update.
    #[instrument(skip(self, ctx, input), fields(trace_id = %ctx.trace_id))]
    pub async fn update_item_steps(
        &self,
        ctx: &RequestContext,
        id: &str,
        input: ItemInput,
    ) -> CatalogResult<CrossStoreWrite> {
        validate_hex_ids([id, input.category.id.as_str()])?;
        ctx.caller().ok_or_else(CatalogError::missing_caller)?;

        let (mut fields, mut price) = input.into_parts()?;
        self.ensure_category_matches(&fields.category).await?;
        fields.assign_eligible_ids();

        let existing = self.prices.get_by_item_id(ctx, id).await?;
        price.id = existing.id;
        price.item_id = id.to_string();

        let mut saga = CrossStoreWrite::new("items.update", id);
        saga.item = StepOutcome::from_result(self.items.update(id, &fields).await);
        if saga.item.is_completed() {
            saga.price = StepOutcome::from_result(self.prices.update(ctx, &price).await);
        }

        if saga.is_complete() {
            info!(item_id = %id, "Item updated");
        }
        Ok(saga)
    }

    pub async fn delete_item(&self, ctx: &RequestContext, id: &str) -> CatalogResult<()> {
        self.delete_item_steps(ctx, id)
            .await?
            .into_result()
            .map(|_| ())
    }

    /// Delete the item, then its price. A missing item fails before either
    /// store is touched.
    #[instrument(skip(self, ctx), fields(trace_id = %ctx.trace_id))]
    pub async fn delete_item_steps(
        &self,
        ctx: &RequestContext,
        id: &str,
    ) -> CatalogResult<CrossStoreWrite> {
        validate_hex_ids([id])?;
        ctx.caller().ok_or_else(CatalogError::missing_caller)?;

        let item = self.items.get_by_id(id).await?;

        let mut saga = CrossStoreWrite::new("items.delete", item.id.clone());
        saga.item = StepOutcome::from_result(self.items.delete(&item.id).await);
        if saga.item.is_completed() {
            saga.price = StepOutcome::from_result(self.prices.delete_by_item_id(ctx, &item.id).await);
        }

        if saga.is_complete() {
            info!(item_id = %id, "Item deleted");
        }
        Ok(saga)
    }
}

impl<R, C, P, S> Clone for ItemService<R, C, P, S>
where
    R: ItemRepository,
    C: CategoryRepository,
    P: PriceGateway,
    S: ShopGateway,
{
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
            categories: Arc::clone(&self.categories),
            prices: Arc::clone(&self.prices),
            shops: Arc::clone(&self.shops),
        }
    }
}
