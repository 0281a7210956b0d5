//! Shared query parameter and envelope types for API handlers.

use serde::{Deserialize, Serialize};

/// Generic pagination parameters (`?limit=&offset=`).
///
/// Values are clamped in the repository layer via the core `clamp_limit` /
/// `clamp_offset` helpers.
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Query parameters for substring-search endpoints (`?query=`).
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub query: String,
}

/// Envelope for paginated list responses.
#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Total matching rows, ignoring limit/offset.
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}
