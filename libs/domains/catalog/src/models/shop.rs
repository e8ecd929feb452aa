use serde::{Deserialize, Serialize};

/// Shop owned by the caller, as answered by the shop service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shop {
    pub id: String,
}
