use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A price record owned by the pricing service, keyed by item id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Price {
    /// Assigned by the pricing service
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub item_id: String,
    pub amount: f64,
    #[serde(default)]
    pub currency: String,
}

/// Price as supplied by a client when creating or updating an item.
///
/// An amount of zero means "missing" and is rejected.
#[derive(Debug, Clone, PartialEq, Deserialize, ToSchema)]
pub struct PriceInput {
    pub amount: f64,
    #[serde(default)]
    pub currency: String,
}

impl PriceInput {
    /// Price record not yet bound to an item.
    pub fn into_price(self) -> Price {
        Price {
            id: String::new(),
            item_id: String::new(),
            amount: self.amount,
            currency: self.currency,
        }
    }
}

/// Bulk lookup body sent to the pricing service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceLookup {
    pub items_ids: Vec<String>,
}

/// Bulk lookup answer; may cover only some of the requested items.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PriceList {
    #[serde(default)]
    pub prices: Vec<Price>,
}
