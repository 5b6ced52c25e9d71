//! Response envelopes shared by every endpoint.

use serde::Serialize;

use crate::application::services::Page;

/// Envelope for single-record and message responses.
///
/// ```json
/// { "success": true, "data": { ... } }
/// { "success": true, "message": "Success delete todo" }
/// ```
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }
}

impl ApiResponse<()> {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            message: Some(message.into()),
        }
    }
}

/// Paging block of a list response.
#[derive(Debug, Serialize)]
pub struct Paging {
    pub size: i64,
    pub current_page: i64,
    pub total_record: i64,
}

/// Envelope for list responses.
#[derive(Debug, Serialize)]
pub struct PagedResponse<T: Serialize> {
    pub data: Vec<T>,
    pub paging: Paging,
}

impl<T: Serialize> PagedResponse<T> {
    /// Builds the response from a service page, converting each item.
    pub fn from_page<E>(page: Page<E>) -> Self
    where
        T: From<E>,
    {
        Self {
            data: page.items.into_iter().map(T::from).collect(),
            paging: Paging {
                size: page.size,
                current_page: page.page,
                total_record: page.total,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_message_envelope_omits_data() {
        let body = serde_json::to_value(ApiResponse::message("Success delete todo")).unwrap();
        assert_eq!(
            body,
            json!({ "success": true, "message": "Success delete todo" })
        );
    }

    #[test]
    fn test_paged_response_shape() {
        let page = Page {
            items: vec![1_i64, 2],
            page: 1,
            size: 10,
            total: 2,
        };

        let body = serde_json::to_value(PagedResponse::<i64>::from_page(page)).unwrap();

        assert_eq!(
            body,
            json!({
                "data": [1, 2],
                "paging": { "size": 10, "current_page": 1, "total_record": 2 }
            })
        );
    }
}
