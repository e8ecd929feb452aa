use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum::{Display, EnumString};
use utoipa::ToSchema;
use validator::Validate;

use super::category::Category;
use super::price::{Price, PriceInput};
use crate::error::{CatalogError, CatalogResult};

/// Item status
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Default,
    ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ItemStatus {
    #[default]
    Active,
    Inactive,
    Archived,
}

/// One selectable option group on an item (size, color, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Eligible {
    /// Server-assigned, unique within the item
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub is_required: bool,
    #[serde(default)]
    pub options: Vec<String>,
}

/// A catalog item as served to callers, with its price joined in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Item {
    pub id: String,
    pub name: String,
    pub description: String,
    pub status: ItemStatus,
    pub shop_id: String,
    pub user_id: String,
    pub category: Category,
    /// Joined from the pricing service, never stored with the item
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Price>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    #[serde(default)]
    pub eligible: Vec<Eligible>,
}

impl Item {
    pub fn with_price(mut self, price: Price) -> Self {
        self.price = Some(price);
        self
    }
}

/// Client-editable part of an item.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemFields {
    pub name: String,
    pub description: String,
    /// `None` leaves the stored status untouched on update
    pub status: Option<ItemStatus>,
    pub category: Category,
    pub images: Vec<String>,
    pub attributes: BTreeMap<String, String>,
    pub eligible: Vec<Eligible>,
}

impl ItemFields {
    /// Give every eligible entry a fresh id, discarding anything already there.
    pub fn assign_eligible_ids(&mut self) {
        for entry in &mut self.eligible {
            entry.id = ObjectId::new().to_hex();
        }
    }
}

/// Item ready to be inserted: client fields plus server-derived ownership.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemDraft {
    pub shop_id: String,
    pub user_id: String,
    pub fields: ItemFields,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct EligibleInput {
    #[validate(length(min = 1, max = 120))]
    pub title: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub is_required: bool,
    #[serde(default)]
    pub options: Vec<String>,
}

/// Body for creating or replacing an item.
///
/// `shop_id`, `user_id` and eligible ids are never taken from here.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ItemInput {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[serde(default)]
    pub status: Option<ItemStatus>,
    #[validate(nested)]
    pub category: Category,
    pub price: PriceInput,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    #[serde(default)]
    #[validate(nested)]
    pub eligible: Vec<EligibleInput>,
}

impl ItemInput {
    /// Split into item fields and the price to write through the pricing service.
    pub fn into_parts(self) -> CatalogResult<(ItemFields, Price)> {
        if self.price.amount == 0.0 {
            return Err(CatalogError::Validation(
                "price amount must not be zero".to_string(),
            ));
        }

        let eligible = self
            .eligible
            .into_iter()
            .map(|e| Eligible {
                id: String::new(),
                title: e.title,
                kind: e.kind,
                is_required: e.is_required,
                options: e.options,
            })
            .collect();

        let fields = ItemFields {
            name: self.name,
            description: self.description,
            status: self.status,
            category: self.category,
            images: self.images,
            attributes: self.attributes,
            eligible,
        };

        Ok((fields, self.price.into_price()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ItemList {
    pub items: Vec<Item>,
}

/// Body of the bulk lookup route.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ItemIds {
    #[validate(length(min = 1))]
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatedItem {
    pub id: String,
}
