//! Paginated query settings.

use serde::{Deserialize, Serialize};

const fn default_page_length() -> u32 {
    10
}

const fn default_timeout_ms() -> u64 {
    5_000
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QueryConfig {
    /// Page length used when a request asks for zero or fewer rows.
    #[serde(default = "default_page_length")]
    pub default_page_length: u32,

    /// Upper bound on a single paged request, in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            default_page_length: default_page_length(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = QueryConfig::default();
        assert_eq!(config.default_page_length, 10);
        assert_eq!(config.timeout_ms, 5_000);
    }
}
