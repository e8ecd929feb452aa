//! Shape checks for externally supplied identifiers.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{CatalogError, CatalogResult};

static HEX_ID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-fA-F0-9]{24}$").unwrap());

pub fn is_hex_id(candidate: &str) -> bool {
    HEX_ID.is_match(candidate)
}

/// Succeeds iff every id is 24 hex characters.
///
/// The error never names the offending id; one bad id rejects the batch.
pub fn validate_hex_ids<I, S>(ids: I) -> CatalogResult<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    if ids.into_iter().all(|id| is_hex_id(id.as_ref())) {
        Ok(())
    } else {
        Err(CatalogError::InvalidId)
    }
}
