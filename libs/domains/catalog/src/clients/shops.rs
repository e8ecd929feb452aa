use async_trait::async_trait;
use axum_helpers::RequestContext;
use reqwest::StatusCode;
use tracing::instrument;

use super::{GatewayConfig, ShopGateway, outbound, rejected, transport};
use crate::error::{CatalogError, CatalogResult};
use crate::models::Shop;

/// Shop service over HTTP.
#[derive(Clone)]
pub struct HttpShopGateway {
    client: reqwest::Client,
    base_url: String,
}

impl HttpShopGateway {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &GatewayConfig) -> CatalogResult<Self> {
        Ok(Self::new(config.http_client()?, config.shops_url.clone()))
    }
}

#[async_trait]
impl ShopGateway for HttpShopGateway {
    #[instrument(skip(self, ctx), fields(trace_id = %ctx.trace_id, user_id = ?ctx.user_id))]
    async fn get_for_caller(&self, ctx: &RequestContext) -> CatalogResult<Shop> {
        const OP: &str = "shops.get_for_caller";
        let request = self.client.get(format!("{}/shops", self.base_url));
        let response = outbound(request, ctx, true)
            .send()
            .await
            .map_err(transport(OP))?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(CatalogError::NotFound(
                "shop not found for caller".to_string(),
            )),
            status if status.is_success() => response.json().await.map_err(transport(OP)),
            _ => Err(rejected(OP, response).await),
        }
    }
}
