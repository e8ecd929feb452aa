//! MongoDB implementations of the catalog repositories.

mod categories;
mod items;

pub use categories::MongoCategoryRepository;
pub use items::MongoItemRepository;

pub const ITEMS_COLLECTION: &str = "items";
pub const CATEGORIES_COLLECTION: &str = "categories";
