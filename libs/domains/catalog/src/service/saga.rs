//! Outcome of a write that spans the item store and the pricing service.
//!
//! The two stores are not updated atomically. Every cross-store write
//! records what happened on each side so the caller can tell a clean
//! failure from a partial one.

use tracing::warn;

use crate::error::{CatalogError, CatalogResult};

#[derive(Debug)]
pub enum StepOutcome {
    Completed,
    Failed(CatalogError),
    /// Not attempted because an earlier step failed
    Skipped,
}

impl StepOutcome {
    pub fn from_result<T>(result: CatalogResult<T>) -> Self {
        match result {
            Ok(_) => StepOutcome::Completed,
            Err(err) => StepOutcome::Failed(err),
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, StepOutcome::Completed)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, StepOutcome::Failed(_))
    }
}

/// Item write first, price write second.
#[derive(Debug)]
pub struct CrossStoreWrite {
    pub operation: &'static str,
    pub item_id: String,
    pub item: StepOutcome,
    pub price: StepOutcome,
}

impl CrossStoreWrite {
    pub fn new(operation: &'static str, item_id: impl Into<String>) -> Self {
        Self {
            operation,
            item_id: item_id.into(),
            item: StepOutcome::Skipped,
            price: StepOutcome::Skipped,
        }
    }

    /// The item side was written but the price side was not.
    pub fn is_partial(&self) -> bool {
        self.item.is_completed() && self.price.is_failed()
    }

    pub fn is_complete(&self) -> bool {
        self.item.is_completed() && self.price.is_completed()
    }

    /// Surface the first failure, or the item id when both steps completed.
    ///
    /// A partial write is logged before its price error is returned. Nothing
    /// is rolled back.
    pub fn into_result(self) -> CatalogResult<String> {
        let partial = self.is_partial();
        match (self.item, self.price) {
            (StepOutcome::Failed(err), _) => Err(err),
            (_, StepOutcome::Failed(err)) => {
                if partial {
                    warn!(
                        operation = self.operation,
                        item_id = %self.item_id,
                        error = %err,
                        "Item store written but pricing service was not; stores are out of sync"
                    );
                }
                Err(err)
            }
            (StepOutcome::Completed, StepOutcome::Completed) => Ok(self.item_id),
            _ => Err(CatalogError::Internal(format!(
                "{} for item {} did not run to completion",
                self.operation, self.item_id
            ))),
        }
    }
}
