//! Local input checks run before any request is shaped
//!
//! A failed check returns `EasemobError::InvalidInput` and the operation
//! never reaches the transport.

use std::borrow::Cow;

use easemob_domain::constants::{DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use easemob_domain::{EasemobError, Result};
use tracing::warn;

/// Require at least one item
pub fn ensure_some(field: &str, count: usize) -> Result<()> {
    if count == 0 {
        warn!(field, "empty batch rejected");
        return Err(EasemobError::invalid_input(format!("`{field}` must contain at least 1 item")));
    }
    Ok(())
}

/// Require `1 ..= max` items
pub fn ensure_count(field: &str, count: usize, max: usize) -> Result<()> {
    ensure_some(field, count)?;
    if count > max {
        warn!(field, count, max, "oversized batch rejected");
        return Err(EasemobError::invalid_input(format!(
            "`{field}` must contain at most {max} items, got {count}"
        )));
    }
    Ok(())
}

/// Require a non-blank string
pub fn ensure_not_empty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        warn!(field, "empty value rejected");
        return Err(EasemobError::invalid_input(format!("`{field}` must not be empty")));
    }
    Ok(())
}

/// Page size actually sent: `<= 0` becomes the default, `> 100` the maximum
pub fn clamp_limit(limit: i32) -> u32 {
    match u32::try_from(limit) {
        Ok(0) | Err(_) => DEFAULT_PAGE_LIMIT,
        Ok(value) => value.min(MAX_PAGE_LIMIT),
    }
}

/// Percent-encode a value placed in a path segment
pub fn path_segment(value: &str) -> Cow<'_, str> {
    urlencoding::encode(value)
}
