//! Pagination query parameters.

use serde::Deserialize;
use serde_with::{DisplayFromStr, serde_as};
use validator::Validate;

/// Largest accepted page size.
pub const MAX_PAGE_SIZE: i64 = 25;

/// `?page=&size=` of list endpoints. Both are required.
///
/// Uses `serde_with` to parse the numbers from query strings.
#[serde_as]
#[derive(Debug, Deserialize, Validate)]
pub struct ListParams {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    #[validate(required, range(min = 1))]
    pub page: Option<i64>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    #[validate(required, range(min = 1, max = 25))]
    pub size: Option<i64>,
}

impl ListParams {
    /// Validated `(page, size)`.
    pub fn page_and_size(&self) -> (i64, i64) {
        (self.page.unwrap_or(1), self.size.unwrap_or(MAX_PAGE_SIZE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::extract::Query;
    use axum::http::Uri;

    fn parse(query: &str) -> Result<ListParams, String> {
        let uri: Uri = format!("http://localhost/api/todos?{query}").parse().unwrap();
        Query::<ListParams>::try_from_uri(&uri)
            .map(|Query(p)| p)
            .map_err(|e| e.body_text())
    }

    fn params(query: &str) -> ListParams {
        parse(query).unwrap()
    }

    #[test]
    fn test_valid_params() {
        let p = params("page=2&size=25");
        assert!(p.validate().is_ok());
        assert_eq!(p.page_and_size(), (2, 25));
    }

    #[test]
    fn test_missing_params_are_errors() {
        let errors = params("").validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("page"));
        assert!(fields.contains_key("size"));
    }

    #[test]
    fn test_page_zero_is_error() {
        assert!(params("page=0&size=10").validate().is_err());
    }

    #[test]
    fn test_size_bounds() {
        assert!(params("page=1&size=1").validate().is_ok());
        assert!(params("page=1&size=26").validate().is_err());
        assert!(params("page=1&size=0").validate().is_err());
    }

    #[test]
    fn test_non_numeric_is_rejected() {
        assert!(parse("page=abc&size=10").is_err());
    }
}
