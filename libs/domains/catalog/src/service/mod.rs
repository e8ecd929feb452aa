mod categories;
mod guards;
mod items;
mod saga;

pub use categories::CategoryService;
pub use guards::{CategoryCheck, check_name_available, check_unused};
pub use items::{ItemService, PricedItems, join_prices};
pub use saga::{CrossStoreWrite, StepOutcome};
