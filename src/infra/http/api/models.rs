use serde::Deserialize;
use serde_json::Value;

use crate::application::structured_data::PageData;

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageIdQuery {
    pub page_id: Option<String>,
}

/// Body of `POST /api/seo/analyze`. Read from any JSON value so that a
/// missing, null or mistyped field all surface as the same 400.
#[derive(Debug, Default, PartialEq)]
pub struct AnalyzeRequest {
    pub url: Option<String>,
    pub content: Option<String>,
}

impl AnalyzeRequest {
    pub fn from_value(value: &Value) -> Self {
        let text = |key: &str| {
            value
                .get(key)
                .and_then(Value::as_str)
                .filter(|text| !text.is_empty())
                .map(str::to_string)
        };
        Self {
            url: text("url"),
            content: text("content"),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WrappedPageData {
    data: Option<PageData>,
}

/// Structured-data request body: `{ "data": {...} }` or the page data itself.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum StructuredDataRequest {
    Wrapped(WrappedPageData),
    Bare(PageData),
}

impl StructuredDataRequest {
    pub fn into_page_data(self) -> Option<PageData> {
        match self {
            StructuredDataRequest::Wrapped(wrapped) => wrapped.data,
            StructuredDataRequest::Bare(data) => Some(data),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn analyze_fields_must_be_non_empty_strings() {
        let full = AnalyzeRequest::from_value(&json!({ "url": "/", "content": "<p/>" }));
        assert_eq!(full.url.as_deref(), Some("/"));
        assert_eq!(full.content.as_deref(), Some("<p/>"));

        for value in [
            Value::Null,
            json!([]),
            json!("text"),
            json!({ "url": 5, "content": "<p/>" }),
            json!({ "url": "", "content": null }),
        ] {
            let request = AnalyzeRequest::from_value(&value);
            assert!(request.url.is_none() || request.content.is_none(), "{value}");
        }
    }

    #[test]
    fn structured_data_body_accepts_both_shapes() {
        let wrapped: StructuredDataRequest =
            serde_json::from_str(r#"{"data":{"title":"Roofing","slug":"roofing"}}"#).unwrap();
        assert_eq!(
            wrapped.into_page_data().map(|data| data.title),
            Some("Roofing".to_string())
        );

        let bare: StructuredDataRequest =
            serde_json::from_str(r#"{"title":"Mall","completedAt":"2023-01-01"}"#).unwrap();
        let data = bare.into_page_data().unwrap();
        assert_eq!(data.completed_at.as_deref(), Some("2023-01-01"));
        assert_eq!(data.title, "Mall");

        let empty: StructuredDataRequest = serde_json::from_str("{}").unwrap();
        assert!(empty.into_page_data().is_none());
    }
}
