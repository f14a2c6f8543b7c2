use serde::{Deserialize, Serialize};

pub mod admin;
pub mod auth;
pub mod categories;
pub mod health;
pub mod orders;
pub mod products;

#[derive(Clone, Deserialize, Debug)]
pub struct PaginationParams {
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

impl PaginationParams {
    /// Normalizes the raw query values: page starts at 1, limit falls
    /// back to the endpoint's default and is capped at 100.
    pub fn resolve(&self, default_limit: u64) -> (u64, u64) {
        let page = self.page.unwrap_or(1).max(1);
        let limit = self.limit.unwrap_or(default_limit).clamp(1, 100);
        (page, limit)
    }
}

/// Pagination block echoed alongside every listing. `items_per_page`
/// is only serialized where the endpoint includes it.
#[derive(Clone, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u64,
    pub total_pages: u64,
    pub total_items: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items_per_page: Option<u64>,
}

impl Pagination {
    pub fn new(page: u64, limit: u64, total: u64) -> Self {
        Self {
            current_page: page,
            total_pages: total.div_ceil(limit),
            total_items: total,
            items_per_page: None,
        }
    }

    pub fn with_page_size(page: u64, limit: u64, total: u64) -> Self {
        Self {
            items_per_page: Some(limit),
            ..Self::new(page, limit, total)
        }
    }
}

/// Deserializer for update payloads that must tell "field absent"
/// (`None`) apart from an explicit `null` (`Some(None)`), which clears
/// the column. Use together with `#[serde(default)]`.
pub(crate) mod double_option {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Some)
    }
}

/// Plain `{"message": "..."}` acknowledgement body.
#[derive(Clone, Serialize, Debug)]
pub struct Ack {
    pub message: String,
}

impl Ack {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_math_rounds_up() {
        let p = Pagination::new(2, 12, 25);
        assert_eq!(p.total_pages, 3);
        assert_eq!(p.total_items, 25);

        let p = Pagination::new(1, 10, 30);
        assert_eq!(p.total_pages, 3);

        let p = Pagination::new(1, 10, 0);
        assert_eq!(p.total_pages, 0);
    }

    #[test]
    fn params_are_sanitized() {
        let params = PaginationParams {
            page: Some(0),
            limit: Some(1000),
        };
        assert_eq!(params.resolve(12), (1, 100));

        let params = PaginationParams {
            page: None,
            limit: None,
        };
        assert_eq!(params.resolve(12), (1, 12));
    }
}
