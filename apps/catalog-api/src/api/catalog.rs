//! Wires the catalog domain to MongoDB and the remote services.

use axum::Router;
use domain_catalog::{
    CategoryService, HttpPriceGateway, HttpShopGateway, ItemService, MongoCategoryRepository,
    MongoItemRepository, handlers,
};
use std::sync::Arc;
use tracing::info;

use crate::state::AppState;

pub fn router(state: &AppState) -> eyre::Result<Router> {
    let gateways = &state.config.gateways;
    let items = Arc::new(MongoItemRepository::new(state.db.clone()));
    let categories = Arc::new(MongoCategoryRepository::new(state.db.clone()));
    let prices = Arc::new(HttpPriceGateway::from_config(gateways)?);
    let shops = Arc::new(HttpShopGateway::from_config(gateways)?);

    info!(
        prices = %gateways.prices_url,
        shops = %gateways.shops_url,
        timeout = ?gateways.timeout,
        "Remote services configured"
    );

    let item_service = ItemService::new(items.clone(), categories.clone(), prices, shops);
    let category_service = CategoryService::new(categories, items);

    Ok(handlers::router(item_service, category_service))
}

pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    MongoItemRepository::new(state.db.clone())
        .init_indexes()
        .await
        .map_err(|e| eyre::eyre!("Failed to create item indexes: {}", e))
}
