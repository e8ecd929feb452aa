use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use axum_helpers::{
    ValidatedJson,
    errors::responses::{
        BadRequestIdResponse, BadRequestValidationResponse, ConflictResponse,
        InternalServerErrorResponse, NotFoundResponse,
    },
};
use std::sync::Arc;

use super::CatalogState;
use crate::clients::{PriceGateway, ShopGateway};
use crate::error::CatalogResult;
use crate::models::{Category, CategoryList, CreateCategory, UpdateCategory};
use crate::repository::{CategoryRepository, ItemRepository};

type Shared<R, C, P, S> = State<Arc<CatalogState<R, C, P, S>>>;

/// List all categories
#[utoipa::path(
    get,
    path = "/categories",
    tag = "Categories",
    responses(
        (status = 200, description = "All categories", body = CategoryList),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn list_categories<R, C, P, S>(
    State(state): Shared<R, C, P, S>,
) -> CatalogResult<Json<CategoryList>>
where
    R: ItemRepository,
    C: CategoryRepository,
    P: PriceGateway,
    S: ShopGateway,
{
    let categories = state.categories.list().await?;
    Ok(Json(CategoryList { categories }))
}

#[utoipa::path(
    get,
    path = "/category/{id}",
    tag = "Categories",
    params(("id" = String, Path, description = "Category id (24 hex chars)")),
    responses(
        (status = 200, description = "Category found", body = Category),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn get_category<R, C, P, S>(
    State(state): Shared<R, C, P, S>,
    Path(id): Path<String>,
) -> CatalogResult<Json<Category>>
where
    R: ItemRepository,
    C: CategoryRepository,
    P: PriceGateway,
    S: ShopGateway,
{
    let category = state.categories.get(&id).await?;
    Ok(Json(category))
}

/// Create a category with a name no other category carries
#[utoipa::path(
    post,
    path = "/category",
    tag = "Categories",
    request_body = CreateCategory,
    responses(
        (status = 201, description = "Category created", body = Category),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn create_category<R, C, P, S>(
    State(state): Shared<R, C, P, S>,
    ValidatedJson(input): ValidatedJson<CreateCategory>,
) -> CatalogResult<impl IntoResponse>
where
    R: ItemRepository,
    C: CategoryRepository,
    P: PriceGateway,
    S: ShopGateway,
{
    let category = state.categories.create(&input.name).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// Rename a category and every item snapshot of it
#[utoipa::path(
    put,
    path = "/category",
    tag = "Categories",
    request_body = UpdateCategory,
    responses(
        (status = 204, description = "Category renamed"),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn rename_category<R, C, P, S>(
    State(state): Shared<R, C, P, S>,
    ValidatedJson(input): ValidatedJson<UpdateCategory>,
) -> CatalogResult<StatusCode>
where
    R: ItemRepository,
    C: CategoryRepository,
    P: PriceGateway,
    S: ShopGateway,
{
    let category = Category::new(input.id, input.name);
    state.categories.rename(&category).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete a category no item references
#[utoipa::path(
    delete,
    path = "/category/{id}",
    tag = "Categories",
    params(("id" = String, Path, description = "Category id (24 hex chars)")),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(super) async fn delete_category<R, C, P, S>(
    State(state): Shared<R, C, P, S>,
    Path(id): Path<String>,
) -> CatalogResult<StatusCode>
where
    R: ItemRepository,
    C: CategoryRepository,
    P: PriceGateway,
    S: ShopGateway,
{
    state.categories.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
