//! The search-provider seam used by the resolver.

use std::future::Future;

use crate::error::GeocoderError;

/// Which provider operation a cascade step calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Structured address lookup.
    Address,
    /// Free-text keyword / place lookup.
    Keyword,
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Endpoint::Address => write!(f, "address"),
            Endpoint::Keyword => write!(f, "keyword"),
        }
    }
}

/// A provider match, ranked in provider order.
///
/// Coordinates the provider sent in an unparsable form are `NaN`, which no
/// bounds check accepts.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub lat: f64,
    pub lng: f64,
    pub place_name: Option<String>,
    pub address_name: Option<String>,
}

/// A remote place/address search service.
///
/// Implementations return candidates best-first. Errors are reported, not
/// swallowed; the resolver decides how to degrade.
pub trait PlaceSearch: Send + Sync {
    fn search_address(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Vec<Candidate>, GeocoderError>> + Send;

    fn search_keyword(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Vec<Candidate>, GeocoderError>> + Send;
}
