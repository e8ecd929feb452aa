use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use axum_helpers::{
    RequestContext, ValidatedJson,
    errors::responses::{
        BadRequestIdResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse, UnauthorizedResponse,
    },
};
use std::sync::Arc;

use super::{CatalogState, INTEGRITY_HEADER};
use crate::clients::{PriceGateway, ShopGateway};
use crate::error::CatalogResult;
use crate::models::{CreatedItem, Item, ItemIds, ItemInput, ItemList};
use crate::repository::{CategoryRepository, ItemRepository};
use crate::service::PricedItems;

type Shared<R, C, P, S> = State<Arc<CatalogState<R, C, P, S>>>;

/// `{items}` body, flagged when some items were dropped.
fn bulk_response(result: PricedItems) -> Response {
    let partial = result.is_partial();
    let mut response = Json(ItemList {
        items: result.items,
    })
    .into_response();

    if partial {
        response
            .headers_mut()
            .insert(INTEGRITY_HEADER, HeaderValue::from_static("false"));
    }
    response
}

/// Items owned by the caller
#[utoipa::path(
    get,
    path = "",
    tag = "Items",
    responses(
        (status = 200, description = "Priced items of the caller", body = ItemList),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn items_for_caller<R, C, P, S>(
    State(state): Shared<R, C, P, S>,
    ctx: RequestContext,
) -> CatalogResult<Response>
where
    R: ItemRepository,
    C: CategoryRepository,
    P: PriceGateway,
    S: ShopGateway,
{
    let result = state.items.items_for_caller(&ctx).await?;
    Ok(bulk_response(result))
}

/// Create an item in the caller's shop
#[utoipa::path(
    post,
    path = "",
    tag = "Items",
    request_body = ItemInput,
    responses(
        (status = 201, description = "Item created", body = CreatedItem),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn create_item<R, C, P, S>(
    State(state): Shared<R, C, P, S>,
    ctx: RequestContext,
    ValidatedJson(input): ValidatedJson<ItemInput>,
) -> CatalogResult<impl IntoResponse>
where
    R: ItemRepository,
    C: CategoryRepository,
    P: PriceGateway,
    S: ShopGateway,
{
    let id = state.items.create_item(&ctx, input).await?;
    Ok((StatusCode::CREATED, Json(CreatedItem { id })))
}

/// Items by id list
///
/// Sets `integrity: false` when fewer items come back than ids were asked for.
#[utoipa::path(
    post,
    path = "/list",
    tag = "Items",
    request_body = ItemIds,
    responses(
        (status = 200, description = "Priced items", body = ItemList),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn items_by_ids<R, C, P, S>(
    State(state): Shared<R, C, P, S>,
    ctx: RequestContext,
    ValidatedJson(body): ValidatedJson<ItemIds>,
) -> CatalogResult<Response>
where
    R: ItemRepository,
    C: CategoryRepository,
    P: PriceGateway,
    S: ShopGateway,
{
    let result = state.items.items_by_ids(&ctx, &body.items).await?;
    Ok(bulk_response(result))
}

/// Get a priced item
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Items",
    params(("id" = String, Path, description = "Item id (24 hex chars)")),
    responses(
        (status = 200, description = "Item found", body = Item),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn get_item<R, C, P, S>(
    State(state): Shared<R, C, P, S>,
    ctx: RequestContext,
    Path(id): Path<String>,
) -> CatalogResult<Json<Item>>
where
    R: ItemRepository,
    C: CategoryRepository,
    P: PriceGateway,
    S: ShopGateway,
{
    let item = state.items.get_item(&ctx, &id).await?;
    Ok(Json(item))
}

/// Replace an item and its price
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Items",
    params(("id" = String, Path, description = "Item id (24 hex chars)")),
    request_body = ItemInput,
    responses(
        (status = 204, description = "Item updated"),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn update_item<R, C, P, S>(
    State(state): Shared<R, C, P, S>,
    ctx: RequestContext,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<ItemInput>,
) -> CatalogResult<StatusCode>
where
    R: ItemRepository,
    C: CategoryRepository,
    P: PriceGateway,
    S: ShopGateway,
{
    state.items.update_item(&ctx, &id, input).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete an item and its price
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Items",
    params(("id" = String, Path, description = "Item id (24 hex chars)")),
    responses(
        (status = 204, description = "Item deleted"),
        (status = 400, response = BadRequestIdResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn delete_item<R, C, P, S>(
    State(state): Shared<R, C, P, S>,
    ctx: RequestContext,
    Path(id): Path<String>,
) -> CatalogResult<StatusCode>
where
    R: ItemRepository,
    C: CategoryRepository,
    P: PriceGateway,
    S: ShopGateway,
{
    state.items.delete_item(&ctx, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Items of a shop
#[utoipa::path(
    get,
    path = "/shop/{shop_id}",
    tag = "Items",
    params(("shop_id" = String, Path, description = "Shop id (24 hex chars)")),
    responses(
        (status = 200, description = "Priced items", body = ItemList),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn items_by_shop<R, C, P, S>(
    State(state): Shared<R, C, P, S>,
    ctx: RequestContext,
    Path(shop_id): Path<String>,
) -> CatalogResult<Response>
where
    R: ItemRepository,
    C: CategoryRepository,
    P: PriceGateway,
    S: ShopGateway,
{
    let result = state.items.items_by_shop(&ctx, &shop_id).await?;
    Ok(bulk_response(result))
}

/// Items of a shop within one category
#[utoipa::path(
    get,
    path = "/shop/{shop_id}/category/{category_id}",
    tag = "Items",
    params(
        ("shop_id" = String, Path, description = "Shop id (24 hex chars)"),
        ("category_id" = String, Path, description = "Category id (24 hex chars)")
    ),
    responses(
        (status = 200, description = "Priced items", body = ItemList),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn items_by_shop_and_category<R, C, P, S>(
    State(state): Shared<R, C, P, S>,
    ctx: RequestContext,
    Path((shop_id, category_id)): Path<(String, String)>,
) -> CatalogResult<Response>
where
    R: ItemRepository,
    C: CategoryRepository,
    P: PriceGateway,
    S: ShopGateway,
{
    let result = state
        .items
        .items_by_shop_and_category(&ctx, &shop_id, &category_id)
        .await?;
    Ok(bulk_response(result))
}

/// Items in a category
#[utoipa::path(
    get,
    path = "/category/{id}/items",
    tag = "Items",
    params(("id" = String, Path, description = "Category id (24 hex chars)")),
    responses(
        (status = 200, description = "Priced items", body = ItemList),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn items_by_category<R, C, P, S>(
    State(state): Shared<R, C, P, S>,
    ctx: RequestContext,
    Path(category_id): Path<String>,
) -> CatalogResult<Response>
where
    R: ItemRepository,
    C: CategoryRepository,
    P: PriceGateway,
    S: ShopGateway,
{
    let result = state.items.items_by_category(&ctx, &category_id).await?;
    Ok(bulk_response(result))
}
