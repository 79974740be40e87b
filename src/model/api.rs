use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of every error response.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct ErrorDto {
    pub error: String,
}

/// Query parameters shared by paginated list endpoints.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct PaginationParams {
    /// Zero-indexed page number.
    #[serde(default)]
    pub page: u64,
    /// Items per page.
    #[serde(default = "default_entries")]
    pub entries: u64,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: 0,
            entries: default_entries(),
        }
    }
}

/// Page size used when a list endpoint gets no `entries` parameter.
pub fn default_entries() -> u64 {
    10
}

/// Largest page a list endpoint returns.
pub const MAX_ENTRIES: u64 = 100;

/// Clamps a requested page size to `1..=MAX_ENTRIES`.
pub fn page_size(entries: u64) -> u64 {
    entries.clamp(1, MAX_ENTRIES)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_page_size() {
        assert_eq!(page_size(0), 1);
        assert_eq!(page_size(25), 25);
        assert_eq!(page_size(u64::MAX), MAX_ENTRIES);
    }
}
