use serde::{Deserialize, Serialize};

/// Location text meaning "venue not decided yet". Never geocoded.
pub const UNDECIDED_LOCATION: &str = "미정";

/// Axis-aligned latitude/longitude rectangle. Edges are inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

/// Rough box around the Korean peninsula and Jeju.
pub const KOREA_BOUNDS: GeoBounds = GeoBounds {
    min_lat: 33.0,
    max_lat: 38.5,
    min_lng: 124.0,
    max_lng: 132.0,
};

impl GeoBounds {
    /// Returns `true` when the point lies inside the box. `NaN` coordinates
    /// are never inside.
    #[must_use]
    pub fn contains(&self, lat: f64, lng: f64) -> bool {
        (self.min_lat..=self.max_lat).contains(&lat) && (self.min_lng..=self.max_lng).contains(&lng)
    }
}

/// Which cascade step produced a coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    KeywordSearchOriginal,
    AddressSearch,
    KeywordSearchLight,
    KeywordSearchPlaceName,
    KeywordSearchMedium,
    KeywordSearchAggressive,
    KeywordSearchUpperRegion,
    KeywordSearchBuildingName,
    KeywordSearchWithoutNumber,
    KeywordSearchPlaceNameAggressive,
}

impl Method {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Method::KeywordSearchOriginal => "keyword_search_original",
            Method::AddressSearch => "address_search",
            Method::KeywordSearchLight => "keyword_search_light",
            Method::KeywordSearchPlaceName => "keyword_search_place_name",
            Method::KeywordSearchMedium => "keyword_search_medium",
            Method::KeywordSearchAggressive => "keyword_search_aggressive",
            Method::KeywordSearchUpperRegion => "keyword_search_upper_region",
            Method::KeywordSearchBuildingName => "keyword_search_building_name",
            Method::KeywordSearchWithoutNumber => "keyword_search_without_number",
            Method::KeywordSearchPlaceNameAggressive => "keyword_search_place_name_aggressive",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A successfully geocoded location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedCoordinate {
    pub lat: f64,
    pub lng: f64,
    pub method: Method,
    pub place_name: Option<String>,
    pub address_name: Option<String>,
}
