//! Address-to-coordinate resolution for free-text Korean locations.
//!
//! [`Geocoder`] runs a fixed cascade of search strategies against a
//! [`PlaceSearch`] provider (normally [`KakaoLocalClient`]), keeps only
//! in-bounds results, and memoizes every outcome in a [`GeocodeCache`].

pub mod cache;
pub mod classify;
pub mod client;
pub mod error;
pub mod normalize;
pub mod provider;
pub mod resolver;
pub mod strategy;
pub mod types;

pub use cache::{GeocodeCache, MemoryCache};
pub use classify::{classify, AddressKind};
pub use client::KakaoLocalClient;
pub use error::GeocoderError;
pub use provider::{Candidate, Endpoint, PlaceSearch};
pub use resolver::Geocoder;
pub use strategy::{QueryPlan, Strategy, CASCADE};
