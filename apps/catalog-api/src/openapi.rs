//! OpenAPI documentation configuration

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Catalog API",
        version = "0.1.0",
        description = "Items and categories with prices and shops joined from their services",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/api/items", api = domain_catalog::ApiDoc)
    ),
    tags(
        (name = "Items", description = "Priced catalog items"),
        (name = "Categories", description = "Item categories")
    )
)]
pub struct ApiDoc;
