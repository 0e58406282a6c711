//! Envelope wrapping every response of the news platform API.

use serde::{Deserialize, Serialize};

/// Status text the API reports for a successful call.
pub const STATUS_OK: &str = "Ok";

/// `{message, statusCode, data}` envelope.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status_code: String,
    pub data: Option<T>,
}

impl<T> Default for ApiResponse<T> {
    fn default() -> Self {
        Self {
            message: String::new(),
            status_code: String::new(),
            data: None,
        }
    }
}

impl<T> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            status_code: STATUS_OK.to_string(),
            data: Some(data),
        }
    }

    /// Whether the envelope reports success.
    pub fn is_ok(&self) -> bool {
        self.status_code.eq_ignore_ascii_case(STATUS_OK)
    }

    /// Returns the message when it is non-blank.
    pub fn message(&self) -> Option<&str> {
        let message = self.message.trim();
        (!message.is_empty()).then_some(message)
    }
}

/// Error body the API sends with non-2xx responses.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub status_code: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::PageResult;

    #[test]
    fn decodes_paginated_envelope() {
        let raw = r#"{
            "message": "Success",
            "statusCode": "Ok",
            "data": {
                "items": [1, 2],
                "pageNumber": 1,
                "pageSize": 10,
                "totalCount": 2,
                "totalPages": 1,
                "hasPreviousPage": false,
                "hasNextPage": false
            }
        }"#;

        let response: ApiResponse<PageResult<u32>> = serde_json::from_str(raw).unwrap();

        assert!(response.is_ok());
        let page = response.data.unwrap();
        assert_eq!(page.items, vec![1, 2]);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn tolerates_missing_data() {
        let raw = r#"{"message": "Category deleted", "statusCode": "Ok"}"#;
        let response: ApiResponse<serde_json::Value> = serde_json::from_str(raw).unwrap();
        assert_eq!(response.data, None);
        assert_eq!(response.message(), Some("Category deleted"));
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Headline {
        title: String,
    }

    fn decode<T: serde::de::DeserializeOwned>(raw: &str) -> ApiResponse<T> {
        serde_json::from_str(raw).unwrap()
    }

    #[test]
    fn decodes_payload_without_default() {
        let response: ApiResponse<Headline> =
            decode(r#"{"statusCode": "Ok", "data": {"title": "Budget passed"}}"#);
        assert_eq!(
            response.data,
            Some(Headline {
                title: "Budget passed".into()
            })
        );

        let response: ApiResponse<Headline> = decode(r#"{"statusCode": "Ok"}"#);
        assert_eq!(response.data, None);
    }
}
