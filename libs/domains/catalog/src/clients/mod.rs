//! Clients for the remote pricing and shop services.

mod prices;
mod shops;

pub use prices::HttpPriceGateway;
pub use shops::HttpShopGateway;

use async_trait::async_trait;
use axum_helpers::RequestContext;
use core_config::{ConfigError, FromEnv, env_or_default, env_parse_or};
use std::time::Duration;

use crate::error::{CatalogError, CatalogResult};
use crate::models::{Price, Shop};

/// Header the remote services read the correlation id from.
pub const TRACE_HEADER: &str = "X-Trace-ID";

/// Prices live in a separate service, keyed by item id.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PriceGateway: Send + Sync {
    async fn get_by_item_id(&self, ctx: &RequestContext, item_id: &str) -> CatalogResult<Price>;

    /// Bulk lookup. A 2xx answer may cover only some of `item_ids`.
    async fn get_many(&self, ctx: &RequestContext, item_ids: &[String])
    -> CatalogResult<Vec<Price>>;

    async fn create(&self, ctx: &RequestContext, price: &Price) -> CatalogResult<()>;

    /// Replace the record identified by `price.id`.
    async fn update(&self, ctx: &RequestContext, price: &Price) -> CatalogResult<()>;

    async fn delete_by_item_id(&self, ctx: &RequestContext, item_id: &str) -> CatalogResult<()>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShopGateway: Send + Sync {
    /// The shop owned by the caller the forwarded credentials belong to.
    async fn get_for_caller(&self, ctx: &RequestContext) -> CatalogResult<Shop>;
}

/// Where the remote services live and how long to wait for them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GatewayConfig {
    pub prices_url: String,
    pub shops_url: String,
    pub timeout: Duration,
}

impl GatewayConfig {
    pub fn new(prices_url: impl Into<String>, shops_url: impl Into<String>) -> Self {
        Self {
            prices_url: prices_url.into(),
            shops_url: shops_url.into(),
            timeout: Duration::from_secs(5),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub(crate) fn http_client(&self) -> CatalogResult<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| CatalogError::Internal(format!("failed to build http client: {e}")))
    }
}

impl FromEnv for GatewayConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let timeout_secs: u64 = env_parse_or("GATEWAY_TIMEOUT_SECS", 5)?;

        Ok(Self::new(
            env_or_default("PRICES_API_URL", "http://prices:8080"),
            env_or_default("SHOPS_API_URL", "http://shops:8080"),
        )
        .with_timeout(Duration::from_secs(timeout_secs)))
    }
}

/// Attach the trace id, and the caller's credentials when `authorized`.
pub(crate) fn outbound(
    request: reqwest::RequestBuilder,
    ctx: &RequestContext,
    authorized: bool,
) -> reqwest::RequestBuilder {
    let request = request.header(TRACE_HEADER, ctx.trace_id.as_str());
    match (&ctx.authorization, authorized) {
        (Some(token), true) => request.header(reqwest::header::AUTHORIZATION, token.as_str()),
        _ => request,
    }
}

/// Turn a non-success response into an upstream failure carrying its body.
pub(crate) async fn rejected(op: &'static str, response: reqwest::Response) -> CatalogError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    tracing::warn!(op, status = %status, body = %body, "Remote call rejected");
    CatalogError::upstream(op, format!("unexpected status {status}: {body}"))
}

pub(crate) fn transport(op: &'static str) -> impl FnOnce(reqwest::Error) -> CatalogError {
    move |e| CatalogError::upstream(op, e.to_string())
}
