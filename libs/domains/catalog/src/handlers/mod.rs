//! HTTP surface for items and categories, mounted under `/items`.

mod categories;
mod items;

use axum::{
    Router,
    routing::{get, post},
};
use axum_helpers::errors::responses::{
    BadRequestIdResponse, BadRequestValidationResponse, ConflictResponse,
    InternalServerErrorResponse, NotFoundResponse, UnauthorizedResponse,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::clients::{PriceGateway, ShopGateway};
use crate::models::{
    Category, CategoryList, CreateCategory, CreatedItem, Eligible, EligibleInput, Item, ItemIds,
    ItemInput, ItemList, ItemStatus, Price, PriceInput, UpdateCategory,
};
use crate::repository::{CategoryRepository, ItemRepository};
use crate::service::{CategoryService, ItemService};

/// Response header set to `false` when a bulk read lost items for lack of a price.
pub const INTEGRITY_HEADER: &str = "integrity";

#[derive(OpenApi)]
#[openapi(
    paths(
        items::items_for_caller,
        items::create_item,
        items::items_by_ids,
        items::get_item,
        items::update_item,
        items::delete_item,
        items::items_by_shop,
        items::items_by_shop_and_category,
        items::items_by_category,
        categories::list_categories,
        categories::get_category,
        categories::create_category,
        categories::rename_category,
        categories::delete_category,
    ),
    components(
        schemas(
            Item, ItemInput, ItemList, ItemIds, ItemStatus, CreatedItem, Eligible, EligibleInput,
            Price, PriceInput, Category, CategoryList, CreateCategory, UpdateCategory
        ),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestIdResponse,
            ConflictResponse,
            UnauthorizedResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Items", description = "Priced catalog items"),
        (name = "Categories", description = "Item categories")
    )
)]
pub struct ApiDoc;

/// Both orchestrators behind one router.
pub struct CatalogState<R, C, P, S>
where
    R: ItemRepository,
    C: CategoryRepository,
    P: PriceGateway,
    S: ShopGateway,
{
    pub items: ItemService<R, C, P, S>,
    pub categories: CategoryService<C, R>,
}

pub fn router<R, C, P, S>(
    items: ItemService<R, C, P, S>,
    categories: CategoryService<C, R>,
) -> Router
where
    R: ItemRepository + 'static,
    C: CategoryRepository + 'static,
    P: PriceGateway + 'static,
    S: ShopGateway + 'static,
{
    let state = Arc::new(CatalogState { items, categories });

    Router::new()
        .route("/", get(items::items_for_caller).post(items::create_item))
        .route("/list", post(items::items_by_ids))
        .route(
            "/{id}",
            get(items::get_item)
                .put(items::update_item)
                .delete(items::delete_item),
        )
        .route("/shop/{shop_id}", get(items::items_by_shop))
        .route(
            "/shop/{shop_id}/category/{category_id}",
            get(items::items_by_shop_and_category),
        )
        .route("/categories", get(categories::list_categories))
        .route(
            "/category",
            post(categories::create_category).put(categories::rename_category),
        )
        .route(
            "/category/{id}",
            get(categories::get_category).delete(categories::delete_category),
        )
        .route("/category/{id}/items", get(items::items_by_category))
        .with_state(state)
}
