use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::Date;

/// Page size applied when the caller does not send one.
pub const DEFAULT_PAGE_SIZE: i64 = 10;
/// Upper bound a requested page size is clamped to.
pub const MAX_PAGE_SIZE: i64 = 100;

/// A persisted book row.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Book {
    /// Unique identifier, assigned by the database
    pub id: i64,
    /// Title of the book
    pub title: String,
    /// Page count
    pub pages: i64,
    /// Date the record was created; immutable after insert
    pub created_at: Date,
}

/// Query parameters accepted by the create endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBookParams {
    pub title: String,
    pub pages: i64,
}

/// Partial update: absent fields leave the stored value untouched.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateBookParams {
    pub id: i64,
    pub title: Option<String>,
    pub pages: Option<i64>,
}

/// Query parameters accepted by the delete endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteBookParams {
    pub id: i64,
}

/// Pagination window. Out-of-range page sizes are clamped, not rejected.
#[derive(Debug, Clone, Deserialize)]
pub struct ListParams {
    #[serde(default = "ListParams::default_page_size")]
    pub page_size: i64,
    #[serde(default = "ListParams::default_page")]
    pub page: i64,
}

impl ListParams {
    fn default_page_size() -> i64 {
        DEFAULT_PAGE_SIZE
    }

    fn default_page() -> i64 {
        1
    }

    /// Page sizes outside `0..=100` fall back to the maximum.
    pub fn clamped_page_size(&self) -> i64 {
        if self.page_size > MAX_PAGE_SIZE || self.page_size < 0 {
            MAX_PAGE_SIZE
        } else {
            self.page_size
        }
    }

    /// Row offset of the requested page.
    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.clamped_page_size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn in_range_page_size_passes_through() {
        let params = ListParams {
            page_size: 25,
            page: 1,
        };
        assert_eq!(params.clamped_page_size(), 25);
    }

    #[test]
    fn oversized_page_size_clamps_to_max() {
        let params = ListParams {
            page_size: 500,
            page: 1,
        };
        assert_eq!(params.clamped_page_size(), MAX_PAGE_SIZE);
    }

    #[test]
    fn negative_page_size_clamps_to_max() {
        let params = ListParams {
            page_size: -5,
            page: 1,
        };
        assert_eq!(params.clamped_page_size(), MAX_PAGE_SIZE);
    }

    #[test]
    fn zero_page_size_is_kept() {
        let params = ListParams {
            page_size: 0,
            page: 1,
        };
        assert_eq!(params.clamped_page_size(), 0);
    }

    #[test]
    fn offset_uses_clamped_page_size() {
        let params = ListParams {
            page_size: 10,
            page: 3,
        };
        assert_eq!(params.offset(), 20);

        let first_page = ListParams {
            page_size: 10,
            page: 1,
        };
        assert_eq!(first_page.offset(), 0);
    }

    #[test]
    fn list_params_default_when_absent() {
        let params: ListParams = serde_json::from_value(json!({})).unwrap();
        assert_eq!(params.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(params.page, 1);
    }

    #[test]
    fn update_params_track_field_presence() {
        let params: UpdateBookParams =
            serde_json::from_value(json!({"id": 7, "pages": 300})).unwrap();
        assert_eq!(params.id, 7);
        assert!(params.title.is_none());
        assert_eq!(params.pages, Some(300));
    }
}
