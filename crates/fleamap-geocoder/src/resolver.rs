use std::time::Duration;

use fleamap_core::{AppConfig, GeoBounds, ResolvedCoordinate, KOREA_BOUNDS, UNDECIDED_LOCATION};

use crate::cache::{GeocodeCache, MemoryCache};
use crate::client::KakaoLocalClient;
use crate::error::GeocoderError;
use crate::normalize::extract_building_name;
use crate::provider::{Candidate, Endpoint, PlaceSearch};
use crate::strategy::{QueryPlan, CASCADE};

/// Resolves free-text locations to coordinates.
///
/// Owns its provider and cache; wrap it in an `Arc` to share across tasks.
/// Resolution is sequential and never fails loudly: provider errors,
/// empty results, and out-of-bounds coordinates all fall through to the next
/// strategy, and an exhausted cascade yields `None`.
pub struct Geocoder<P, C = MemoryCache> {
    provider: P,
    cache: C,
    bounds: GeoBounds,
}

impl<P: PlaceSearch> Geocoder<P> {
    /// Creates a geocoder with an empty, never-expiring [`MemoryCache`].
    pub fn new(provider: P) -> Self {
        Self::with_cache(provider, MemoryCache::new())
    }
}

impl Geocoder<KakaoLocalClient> {
    /// Builds the production geocoder: Kakao client with the configured key,
    /// base URL and timeout, plus a memory cache honoring the optional
    /// failure TTL.
    ///
    /// # Errors
    ///
    /// Returns [`GeocoderError::MissingApiKey`] or
    /// [`GeocoderError::InvalidBaseUrl`] for unusable settings.
    pub fn from_app_config(config: &AppConfig) -> Result<Self, GeocoderError> {
        let client = KakaoLocalClient::with_base_url(
            &config.kakao_api_key,
            config.geocoder_timeout_secs,
            &config.kakao_base_url,
        )?;
        let cache = match config.geocoder_failure_ttl_secs {
            Some(secs) => MemoryCache::with_failure_ttl(Duration::from_secs(secs)),
            None => MemoryCache::new(),
        };
        Ok(Self::with_cache(client, cache))
    }
}

impl<P: PlaceSearch, C: GeocodeCache> Geocoder<P, C> {
    pub fn with_cache(provider: P, cache: C) -> Self {
        Self {
            provider,
            cache,
            bounds: KOREA_BOUNDS,
        }
    }

    /// Replaces the acceptance box (defaults to [`KOREA_BOUNDS`]).
    #[must_use]
    pub fn with_bounds(mut self, bounds: GeoBounds) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    /// Resolves `location`, optionally using `hint` (an event title) to mine
    /// a building name.
    ///
    /// Returns `None` without touching the cache for empty input or the
    /// "undecided" sentinel. Whitespace-only input is not special: it runs
    /// the cascade like any other text. Otherwise a cached outcome, success or failure,
    /// is returned as-is; on a miss the cascade runs and its outcome is cached
    /// under `location` verbatim.
    pub async fn resolve(&self, location: &str, hint: Option<&str>) -> Option<ResolvedCoordinate> {
        if location.is_empty() || location == UNDECIDED_LOCATION {
            return None;
        }

        if let Some(cached) = self.cache.get(location) {
            tracing::debug!(location, hit = cached.is_some(), "geocode cache hit");
            return cached;
        }

        let plan = QueryPlan::new(location, hint);
        tracing::info!(location, kind = %plan.kind, "geocoding location");

        let mut attempted: Vec<(Endpoint, String)> = Vec::new();
        for strategy in &CASCADE {
            let Some(query) = (strategy.plan)(&plan) else {
                continue;
            };
            if attempted
                .iter()
                .any(|(endpoint, q)| *endpoint == strategy.endpoint && *q == query)
            {
                tracing::debug!(method = %strategy.method, query = %query, "query already tried");
                continue;
            }

            tracing::debug!(method = %strategy.method, query = %query, "trying strategy");
            let found = self.lookup(strategy.endpoint, &query).await;

            if let Some(candidate) = found {
                let address_name = match strategy.endpoint {
                    Endpoint::Address => candidate.address_name.or_else(|| Some(query.clone())),
                    Endpoint::Keyword => candidate.address_name,
                };
                let resolved = ResolvedCoordinate {
                    lat: candidate.lat,
                    lng: candidate.lng,
                    method: strategy.method,
                    place_name: candidate.place_name,
                    address_name,
                };
                tracing::info!(
                    location,
                    method = %strategy.method,
                    query = %query,
                    lat = resolved.lat,
                    lng = resolved.lng,
                    "geocoding succeeded"
                );
                self.cache.set(location, Some(resolved.clone()));
                return Some(resolved);
            }

            attempted.push((strategy.endpoint, query));
        }

        let queries: Vec<String> = attempted
            .iter()
            .map(|(endpoint, q)| format!("{endpoint}:{q}"))
            .collect();
        tracing::warn!(
            location,
            kind = %plan.kind,
            light = %plan.light,
            aggressive = %plan.aggressive,
            place_name = ?plan.place_name,
            hint = ?hint,
            building_name = ?hint.and_then(extract_building_name),
            attempts = ?queries,
            "geocoding failed after exhausting every strategy"
        );
        self.cache.set(location, None);
        None
    }

    /// Empties the cache and returns how many entries were dropped.
    pub fn clear_cache(&self) -> usize {
        let cleared = self.cache.len();
        self.cache.clear();
        tracing::info!(cleared, "geocode cache cleared");
        cleared
    }

    /// One provider call, reduced to the top in-bounds candidate.
    async fn lookup(&self, endpoint: Endpoint, query: &str) -> Option<Candidate> {
        let result = match endpoint {
            Endpoint::Address => self.provider.search_address(query).await,
            Endpoint::Keyword => self.provider.search_keyword(query).await,
        };

        let candidates = match result {
            Ok(candidates) => candidates,
            Err(e) => {
                tracing::warn!(%endpoint, query, error = %e, "place search failed");
                return None;
            }
        };

        let Some(best) = candidates.into_iter().next() else {
            tracing::debug!(%endpoint, query, "no candidates");
            return None;
        };

        if !self.bounds.contains(best.lat, best.lng) {
            tracing::warn!(
                %endpoint,
                query,
                lat = best.lat,
                lng = best.lng,
                "discarding out-of-bounds candidate"
            );
            return None;
        }

        Some(best)
    }
}

#[cfg(test)]
#[path = "resolver_test.rs"]
mod tests;
