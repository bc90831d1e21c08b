//! Kakao Local API response types.
//!
//! Both search endpoints return `{"documents": [...], "meta": {...}}`; only
//! the documents are decoded.
//! Coordinates arrive as decimal strings: `x` is longitude, `y` is latitude.

use serde::Deserialize;

/// Envelope shared by the address and keyword search endpoints.
#[derive(Debug, Deserialize)]
pub struct SearchResponse<D> {
    #[serde(default = "Vec::new")]
    pub documents: Vec<D>,
}

/// One hit from `/v2/local/search/address.json`.
#[derive(Debug, Deserialize)]
pub struct AddressDocument {
    pub x: String,
    pub y: String,
    #[serde(default)]
    pub address_name: Option<String>,
}

/// One hit from `/v2/local/search/keyword.json`.
#[derive(Debug, Deserialize)]
pub struct KeywordDocument {
    pub x: String,
    pub y: String,
    #[serde(default)]
    pub place_name: Option<String>,
    #[serde(default)]
    pub address_name: Option<String>,
    #[serde(default)]
    pub road_address_name: Option<String>,
}

/// Error body Kakao returns on 4xx responses, e.g.
/// `{"errorType":"AccessDeniedError","message":"..."}`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KakaoErrorBody {
    pub error_type: String,
    pub message: String,
}
