pub mod category;
pub mod item;
pub mod price;
pub mod shop;

pub use category::{Category, CategoryList, CreateCategory, UpdateCategory};
pub use item::{
    CreatedItem, Eligible, EligibleInput, Item, ItemDraft, ItemFields, ItemIds, ItemInput,
    ItemList, ItemStatus,
};
pub use price::{Price, PriceInput, PriceList, PriceLookup};
pub use shop::Shop;
