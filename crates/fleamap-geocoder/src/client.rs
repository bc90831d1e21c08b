//! HTTP client for the Kakao Local search API.
//!
//! Wraps `reqwest` with Kakao-specific authentication, URL construction, and
//! typed response decoding. Implements [`PlaceSearch`] so the resolver can use
//! it directly.

use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::error::GeocoderError;
use crate::provider::{Candidate, Endpoint, PlaceSearch};
use crate::types::{AddressDocument, KakaoErrorBody, KeywordDocument, SearchResponse};

const DEFAULT_BASE_URL: &str = "https://dapi.kakao.com/";
const ADDRESS_PATH: &str = "v2/local/search/address.json";
const KEYWORD_PATH: &str = "v2/local/search/keyword.json";

/// Client for the Kakao Local REST API.
///
/// Use [`KakaoLocalClient::new`] for production or
/// [`KakaoLocalClient::with_base_url`] to point at a mock server in tests.
pub struct KakaoLocalClient {
    client: Client,
    auth_header: String,
    address_url: Url,
    keyword_url: Url,
}

impl KakaoLocalClient {
    /// Creates a client pointed at the production Kakao API.
    ///
    /// # Errors
    ///
    /// Returns [`GeocoderError::MissingApiKey`] for a blank key, or
    /// [`GeocoderError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, GeocoderError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`GeocoderError::MissingApiKey`] for a blank key,
    /// [`GeocoderError::Http`] if the `reqwest::Client` cannot be built, or
    /// [`GeocoderError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, GeocoderError> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(GeocoderError::MissingApiKey);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs))
            .user_agent("fleamap/0.1 (geocoding)")
            .build()?;

        // A trailing slash makes `join` append to the base path instead of
        // replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let invalid = |e: &dyn std::fmt::Display| GeocoderError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        };
        let base = Url::parse(&normalised).map_err(|e| invalid(&e))?;
        let address_url = base.join(ADDRESS_PATH).map_err(|e| invalid(&e))?;
        let keyword_url = base.join(KEYWORD_PATH).map_err(|e| invalid(&e))?;

        Ok(Self {
            client,
            auth_header: format!("KakaoAK {api_key}"),
            address_url,
            keyword_url,
        })
    }

    /// Calls the structured address search endpoint.
    ///
    /// # Errors
    ///
    /// - [`GeocoderError::Api`] if Kakao returns an error envelope.
    /// - [`GeocoderError::Http`] on network failure, timeout, or other non-2xx status.
    /// - [`GeocoderError::Deserialize`] if the body does not match the expected shape.
    pub async fn address_documents(
        &self,
        query: &str,
    ) -> Result<Vec<AddressDocument>, GeocoderError> {
        let url = self.build_url(Endpoint::Address, query);
        let response: SearchResponse<AddressDocument> = self.request_json(&url).await?;
        Ok(response.documents)
    }

    /// Calls the free-text keyword search endpoint.
    ///
    /// # Errors
    ///
    /// - [`GeocoderError::Api`] if Kakao returns an error envelope.
    /// - [`GeocoderError::Http`] on network failure, timeout, or other non-2xx status.
    /// - [`GeocoderError::Deserialize`] if the body does not match the expected shape.
    pub async fn keyword_documents(
        &self,
        query: &str,
    ) -> Result<Vec<KeywordDocument>, GeocoderError> {
        let url = self.build_url(Endpoint::Keyword, query);
        let response: SearchResponse<KeywordDocument> = self.request_json(&url).await?;
        Ok(response.documents)
    }

    /// Builds the endpoint URL with a percent-encoded `query` parameter.
    fn build_url(&self, endpoint: Endpoint, query: &str) -> Url {
        let mut url = match endpoint {
            Endpoint::Address => self.address_url.clone(),
            Endpoint::Keyword => self.keyword_url.clone(),
        };
        url.query_pairs_mut().append_pair("query", query);
        url
    }

    /// Sends an authenticated GET and decodes the JSON body.
    ///
    /// 4xx responses carrying Kakao's error envelope become
    /// [`GeocoderError::Api`]; every other non-2xx status becomes
    /// [`GeocoderError::Http`].
    async fn request_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T, GeocoderError> {
        let response = self
            .client
            .get(url.clone())
            .header(AUTHORIZATION, &self.auth_header)
            .send()
            .await?;

        let status = response.status();
        if status.is_client_error() {
            let body = response.text().await?;
            return Err(match serde_json::from_str::<KakaoErrorBody>(&body) {
                Ok(err) => GeocoderError::Api {
                    error_type: err.error_type,
                    message: err.message,
                },
                Err(_) => GeocoderError::Api {
                    error_type: format!("HTTP {}", status.as_u16()),
                    message: body.chars().take(200).collect(),
                },
            });
        }

        let body = response.error_for_status()?.text().await?;
        serde_json::from_str(&body).map_err(|e| GeocoderError::Deserialize {
            context: url.path().to_owned(),
            source: e,
        })
    }
}

fn parse_coordinate(raw: &str) -> f64 {
    raw.trim().parse::<f64>().unwrap_or(f64::NAN)
}

impl From<AddressDocument> for Candidate {
    fn from(doc: AddressDocument) -> Self {
        Self {
            lat: parse_coordinate(&doc.y),
            lng: parse_coordinate(&doc.x),
            place_name: None,
            address_name: doc.address_name.filter(|s| !s.is_empty()),
        }
    }
}

impl From<KeywordDocument> for Candidate {
    fn from(doc: KeywordDocument) -> Self {
        let address_name = doc
            .address_name
            .filter(|s| !s.is_empty())
            .or(doc.road_address_name.filter(|s| !s.is_empty()));
        Self {
            lat: parse_coordinate(&doc.y),
            lng: parse_coordinate(&doc.x),
            place_name: doc.place_name.filter(|s| !s.is_empty()),
            address_name,
        }
    }
}

impl PlaceSearch for KakaoLocalClient {
    async fn search_address(&self, query: &str) -> Result<Vec<Candidate>, GeocoderError> {
        let docs = self.address_documents(query).await?;
        Ok(docs.into_iter().map(Candidate::from).collect())
    }

    async fn search_keyword(&self, query: &str) -> Result<Vec<Candidate>, GeocoderError> {
        let docs = self.keyword_documents(query).await?;
        Ok(docs.into_iter().map(Candidate::from).collect())
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
