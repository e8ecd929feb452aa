use async_trait::async_trait;
use axum_helpers::RequestContext;
use reqwest::StatusCode;
use tracing::{info, instrument};

use super::{GatewayConfig, PriceGateway, outbound, rejected, transport};
use crate::error::{CatalogError, CatalogResult};
use crate::models::{Price, PriceList, PriceLookup};

fn price_not_found() -> CatalogError {
    CatalogError::NotFound("price not found".to_string())
}

/// Pricing service over HTTP.
#[derive(Clone)]
pub struct HttpPriceGateway {
    client: reqwest::Client,
    base_url: String,
}

impl HttpPriceGateway {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &GatewayConfig) -> CatalogResult<Self> {
        Ok(Self::new(config.http_client()?, config.prices_url.clone()))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl PriceGateway for HttpPriceGateway {
    #[instrument(skip(self, ctx), fields(trace_id = %ctx.trace_id))]
    async fn get_by_item_id(&self, ctx: &RequestContext, item_id: &str) -> CatalogResult<Price> {
        const OP: &str = "prices.get_by_item_id";
        let request = self.client.get(self.url(&format!("/prices/item/{item_id}")));
        let response = outbound(request, ctx, false)
            .send()
            .await
            .map_err(transport(OP))?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(price_not_found()),
            status if status.is_success() => response.json().await.map_err(transport(OP)),
            _ => Err(rejected(OP, response).await),
        }
    }

    #[instrument(skip(self, ctx, item_ids), fields(trace_id = %ctx.trace_id, count = item_ids.len()))]
    async fn get_many(
        &self,
        ctx: &RequestContext,
        item_ids: &[String],
    ) -> CatalogResult<Vec<Price>> {
        const OP: &str = "prices.get_many";
        let body = PriceLookup {
            items_ids: item_ids.to_vec(),
        };
        let request = self.client.post(self.url("/prices/items")).json(&body);
        let response = outbound(request, ctx, false)
            .send()
            .await
            .map_err(transport(OP))?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(CatalogError::NotFound("prices not found".to_string())),
            status if status.is_success() => {
                let list: PriceList = response.json().await.map_err(transport(OP))?;
                Ok(list.prices)
            }
            _ => Err(rejected(OP, response).await),
        }
    }

    #[instrument(skip(self, ctx, price), fields(trace_id = %ctx.trace_id, item_id = %price.item_id))]
    async fn create(&self, ctx: &RequestContext, price: &Price) -> CatalogResult<()> {
        const OP: &str = "prices.create";
        let request = self.client.post(self.url("/prices")).json(price);
        let response = outbound(request, ctx, true)
            .send()
            .await
            .map_err(transport(OP))?;

        if !response.status().is_success() {
            return Err(rejected(OP, response).await);
        }

        info!("Price created");
        Ok(())
    }

    #[instrument(skip(self, ctx, price), fields(trace_id = %ctx.trace_id, price_id = %price.id))]
    async fn update(&self, ctx: &RequestContext, price: &Price) -> CatalogResult<()> {
        const OP: &str = "prices.update";
        let request = self
            .client
            .put(self.url(&format!("/prices/{}", price.id)))
            .json(price);
        let response = outbound(request, ctx, true)
            .send()
            .await
            .map_err(transport(OP))?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(price_not_found()),
            status if status.is_success() => {
                info!("Price updated");
                Ok(())
            }
            _ => Err(rejected(OP, response).await),
        }
    }

    #[instrument(skip(self, ctx), fields(trace_id = %ctx.trace_id))]
    async fn delete_by_item_id(&self, ctx: &RequestContext, item_id: &str) -> CatalogResult<()> {
        const OP: &str = "prices.delete_by_item_id";
        let request = self
            .client
            .delete(self.url(&format!("/prices/item/{item_id}")));
        let response = outbound(request, ctx, true)
            .send()
            .await
            .map_err(transport(OP))?;

        match response.status() {
            StatusCode::NO_CONTENT => {
                info!("Price deleted");
                Ok(())
            }
            StatusCode::NOT_FOUND => Err(price_not_found()),
            _ => Err(rejected(OP, response).await),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::test_server;
    use axum::{
        Json, Router,
        extract::Path,
        http::{HeaderMap, StatusCode as AxumStatus},
        routing::{delete, get, post, put},
    };
    use serde_json::json;

    fn price(item_id: &str, amount: f64) -> Price {
        Price {
            id: format!("price-{item_id}"),
            item_id: item_id.to_string(),
            amount,
            currency: "EUR".to_string(),
        }
    }

    fn ctx() -> RequestContext {
        RequestContext::anonymous()
            .with_trace_id("trace-123")
            .with_authorization("Bearer token")
    }

    async fn gateway(router: Router) -> HttpPriceGateway {
        let url = test_server::spawn(router).await;
        HttpPriceGateway::new(reqwest::Client::new(), url)
    }

    #[tokio::test]
    async fn test_get_by_item_id_forwards_trace_id() {
        let router = Router::new().route(
            "/prices/item/{id}",
            get(|Path(id): Path<String>, headers: HeaderMap| async move {
                assert_eq!(headers["x-trace-id"], "trace-123");
                assert!(headers.get("authorization").is_none());
                Json(price(&id, 1500.0))
            }),
        );

        let found = gateway(router).await.get_by_item_id(&ctx(), "a1").await.unwrap();
        assert_eq!(found.item_id, "a1");
        assert_eq!(found.amount, 1500.0);
    }

    #[tokio::test]
    async fn test_get_by_item_id_maps_404_to_not_found() {
        let router = Router::new().route(
            "/prices/item/{id}",
            get(|| async { AxumStatus::NOT_FOUND }),
        );

        let err = gateway(router).await.get_by_item_id(&ctx(), "a1").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_get_by_item_id_rejects_malformed_body() {
        let router = Router::new().route("/prices/item/{id}", get(|| async { "not json" }));

        let err = gateway(router).await.get_by_item_id(&ctx(), "a1").await.unwrap_err();
        assert!(matches!(err, CatalogError::Upstream { op: "prices.get_by_item_id", .. }));
    }

    #[tokio::test]
    async fn test_get_many_accepts_partial_answer() {
        let router = Router::new().route(
            "/prices/items",
            post(|Json(body): Json<serde_json::Value>| async move {
                assert_eq!(body, json!({ "items_ids": ["a", "b", "c"] }));
                Json(json!({ "prices": [price("a", 1.0), price("c", 3.0)] }))
            }),
        );

        let ids = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let prices = gateway(router).await.get_many(&ctx(), &ids).await.unwrap();
        let item_ids: Vec<_> = prices.iter().map(|p| p.item_id.as_str()).collect();
        assert_eq!(item_ids, ["a", "c"]);
    }

    #[tokio::test]
    async fn test_get_many_maps_server_error_to_upstream() {
        let router = Router::new().route(
            "/prices/items",
            post(|| async { (AxumStatus::INTERNAL_SERVER_ERROR, "boom") }),
        );

        let err = gateway(router)
            .await
            .get_many(&ctx(), &["a".to_string()])
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Upstream { .. }));
        assert!(err.to_string().contains("boom"));
    }

    #[tokio::test]
    async fn test_create_forwards_authorization() {
        let router = Router::new().route(
            "/prices",
            post(|headers: HeaderMap, Json(body): Json<Price>| async move {
                assert_eq!(headers["authorization"], "Bearer token");
                assert_eq!(body.item_id, "a1");
                AxumStatus::CREATED
            }),
        );

        gateway(router).await.create(&ctx(), &price("a1", 10.0)).await.unwrap();
    }

    #[tokio::test]
    async fn test_update_targets_price_id() {
        let router = Router::new().route(
            "/prices/{id}",
            put(|Path(id): Path<String>, headers: HeaderMap| async move {
                assert_eq!(id, "price-a1");
                assert_eq!(headers["authorization"], "Bearer token");
                AxumStatus::OK
            }),
        );

        gateway(router).await.update(&ctx(), &price("a1", 10.0)).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_requires_no_content() {
        let router = Router::new()
            .route("/prices/item/gone", delete(|| async { AxumStatus::NOT_FOUND }))
            .route("/prices/item/odd", delete(|| async { AxumStatus::OK }))
            .route("/prices/item/ok", delete(|| async { AxumStatus::NO_CONTENT }));
        let gateway = gateway(router).await;

        gateway.delete_by_item_id(&ctx(), "ok").await.unwrap();
        assert!(gateway.delete_by_item_id(&ctx(), "gone").await.unwrap_err().is_not_found());
        assert!(matches!(
            gateway.delete_by_item_id(&ctx(), "odd").await.unwrap_err(),
            CatalogError::Upstream { .. }
        ));
    }
}
