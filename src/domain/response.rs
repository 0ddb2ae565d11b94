use std::fmt;

use serde::{Deserialize, Serialize};

use crate::transport::null_as_default;

/// `{ "Meta": ..., "Response": ... }` wrapper around every successful payload.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResponseEnvelope<T> {
    #[serde(default)]
    pub meta: Meta,
    pub response: T,
}

impl<T> ResponseEnvelope<T> {
    pub fn into_response(self) -> T {
        self.response
    }
}

impl<T> ResponseEnvelope<Vec<T>> {
    /// Split into items and paging; missing paging detail means page 1 of 1.
    pub fn into_paged(self) -> PagedResult<T> {
        let paging = self
            .meta
            .paging_details
            .unwrap_or_else(|| PagingDetails::single_page(self.response.len()));
        PagedResult {
            items: self.response,
            paging,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Meta {
    #[serde(default)]
    pub errors: Option<EndpointError>,
    #[serde(default)]
    pub http_status_code: u16,
    #[serde(default)]
    pub paging_details: Option<PagingDetails>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PagingDetails {
    #[serde(default)]
    pub total_items: u32,
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default)]
    pub items_per_page: u32,
}

fn first_page() -> u32 {
    1
}

impl PagingDetails {
    /// Paging for an unpaged list: every item on page 1.
    pub fn single_page(items: usize) -> Self {
        let items = u32::try_from(items).unwrap_or(u32::MAX);
        Self {
            total_items: items,
            page: 1,
            items_per_page: items,
        }
    }

    /// Number of pages, at least one.
    pub fn total_pages(&self) -> u32 {
        if self.items_per_page == 0 {
            return 1;
        }
        self.total_items.div_ceil(self.items_per_page).max(1)
    }

    pub fn has_next_page(&self) -> bool {
        self.page < self.total_pages()
    }
}

/// A page of items together with its paging detail.
#[derive(Debug, Clone, PartialEq)]
pub struct PagedResult<T> {
    pub items: Vec<T>,
    pub paging: PagingDetails,
}

/// Structured failure returned by the API on a non-success status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EndpointError {
    #[serde(deserialize_with = "null_as_default")]
    pub error_code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub trace_code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub error_messages: Vec<ErrorMessage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ErrorMessage {
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
}

impl fmt::Display for EndpointError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.error_code)?;
        for (idx, message) in self.error_messages.iter().enumerate() {
            f.write_str(if idx == 0 { ": " } else { "; " })?;
            match message.field.as_deref() {
                Some(field) if !field.is_empty() => write!(f, "{field}: {}", message.message)?,
                _ => f.write_str(&message.message)?,
            }
        }
        if !self.trace_code.is_empty() {
            write!(f, " (trace {})", self.trace_code)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_decodes_meta_and_response() {
        let json = r#"
        {
          "Meta": {
            "Errors": null,
            "HttpStatusCode": 200,
            "PagingDetails": { "TotalItems": 45, "Page": 2, "ItemsPerPage": 20 }
          },
          "Response": [1, 2, 3]
        }
        "#;
        let envelope: ResponseEnvelope<Vec<u32>> = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.meta.http_status_code, 200);
        assert!(envelope.meta.errors.is_none());

        let paged = envelope.into_paged();
        assert_eq!(paged.items, vec![1, 2, 3]);
        assert_eq!(paged.paging.page, 2);
        assert_eq!(paged.paging.total_pages(), 3);
        assert!(paged.paging.has_next_page());
    }

    #[test]
    fn missing_paging_defaults_to_single_page() {
        let json = r#"{ "Meta": { "HttpStatusCode": 200 }, "Response": ["a", "b"] }"#;
        let envelope: ResponseEnvelope<Vec<String>> = serde_json::from_str(json).unwrap();
        let paged = envelope.into_paged();
        assert_eq!(paged.paging, PagingDetails::single_page(2));
        assert_eq!(paged.paging.page, 1);
        assert_eq!(paged.paging.total_pages(), 1);
        assert!(!paged.paging.has_next_page());
    }

    #[test]
    fn empty_list_is_still_one_page() {
        assert_eq!(PagingDetails::single_page(0).total_pages(), 1);
    }

    #[test]
    fn null_response_decodes_into_option() {
        let json = r#"{ "Meta": { "HttpStatusCode": 200 }, "Response": null }"#;
        let envelope: ResponseEnvelope<Option<u32>> = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.into_response(), None);
    }

    #[test]
    fn endpoint_error_tolerates_nulls_and_displays_messages() {
        let json = r#"
        {
          "ErrorCode": "InvalidInput",
          "TraceCode": null,
          "ErrorMessages": [
            { "Field": "AccountId", "Message": "Account not found" },
            { "Field": null, "Message": "Request rejected" }
          ]
        }
        "#;
        let error: EndpointError = serde_json::from_str(json).unwrap();
        assert_eq!(error.trace_code, "");
        assert_eq!(error.error_messages.len(), 2);
        assert_eq!(
            error.to_string(),
            "InvalidInput: AccountId: Account not found; Request rejected"
        );
    }

    #[test]
    fn endpoint_error_requires_error_code() {
        assert!(serde_json::from_str::<EndpointError>("{}").is_err());
    }

    #[test]
    fn null_error_code_reads_as_empty() {
        let json = r#"{ "ErrorCode": null, "ErrorMessages": [{ "Message": "Declined" }] }"#;
        let error: EndpointError = serde_json::from_str(json).unwrap();
        assert_eq!(error.error_code, "");
        assert_eq!(error.error_messages[0].message, "Declined");
    }
}
