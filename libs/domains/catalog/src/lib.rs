//! Catalog Domain
//!
//! Items and their categories, stored in MongoDB. Prices and shop ownership
//! live in two remote services and are joined in on every read.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, integrity header
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │  Services   │  ← Items and categories orchestrators
//! └──┬───────┬──┘
//!    │       │
//! ┌──▼────┐ ┌▼────────┐
//! │ Repos │ │ Clients │  ← MongoDB / pricing + shop services
//! └───────┘ └─────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_catalog::{
//!     CategoryService, GatewayConfig, HttpPriceGateway, HttpShopGateway, ItemService,
//!     MongoCategoryRepository, MongoItemRepository, handlers,
//! };
//! use mongodb::Client;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("catalog");
//! let gateways = GatewayConfig::new("http://prices:8080", "http://shops:8080");
//!
//! let items = Arc::new(MongoItemRepository::new(db.clone()));
//! let categories = Arc::new(MongoCategoryRepository::new(db));
//! let prices = Arc::new(HttpPriceGateway::from_config(&gateways)?);
//! let shops = Arc::new(HttpShopGateway::from_config(&gateways)?);
//!
//! let item_service = ItemService::new(items.clone(), categories.clone(), prices, shops);
//! let category_service = CategoryService::new(categories, items);
//!
//! let router = handlers::router(item_service, category_service);
//! # Ok(())
//! # }
//! ```

pub mod clients;
pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;
pub mod validation;

pub use clients::{GatewayConfig, HttpPriceGateway, HttpShopGateway, PriceGateway, ShopGateway};
pub use error::{CatalogError, CatalogResult};
pub use handlers::ApiDoc;
pub use models::{Category, Item, ItemStatus, Price};
pub use self::mongodb::{MongoCategoryRepository, MongoItemRepository};
pub use repository::{CategoryRepository, ItemRepository};
pub use service::{CategoryService, ItemService};
