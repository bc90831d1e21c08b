//! Heuristic classification of free-form location text.

use std::sync::LazyLock;

use regex::RegexSet;

/// Coarse shape of a location string. Decides which fallbacks are worth trying.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressKind {
    /// Carries a road/lot number, e.g. `서울특별시 강남구 테헤란로 123`.
    CompleteAddress,
    /// Administrative units without a number, e.g. `서울특별시 강남구`.
    IncompleteAddress,
    /// A venue or landmark name.
    Place,
    /// Empty input.
    Unknown,
}

impl AddressKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CompleteAddress => "complete_address",
            Self::IncompleteAddress => "incomplete_address",
            Self::Place => "place",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for AddressKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

static COMPLETE_ADDRESS: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new([
        r"로\s*[0-9]+",
        r"길\s*[0-9]+",
        r"번지",
        r"번길",
        r"[0-9]+동\s*[0-9]+호",
        r"[동리]\s*[0-9]+(?:-[0-9]+)?(?:\s|$)",
    ])
    .expect("valid regex set")
});

const ADMIN_ENDINGS: &[char] = &['시', '구', '동', '리', '읍', '면'];

const PLACE_HINTS: &[&str] = &["센터", "빌딩", "타워", "플라자", "몰", "마트", "공원", "광장", "역"];

const ADMIN_MARKERS: &[char] = &['시', '구', '동', '로', '길', '읍', '면', '리'];

/// Classifies `text`. Rules are checked in order; the first that fires wins.
#[must_use]
pub fn classify(text: &str) -> AddressKind {
    if text.is_empty() {
        return AddressKind::Unknown;
    }

    if COMPLETE_ADDRESS.is_match(text) {
        return AddressKind::CompleteAddress;
    }

    if text.trim().ends_with(ADMIN_ENDINGS) {
        return AddressKind::IncompleteAddress;
    }

    if PLACE_HINTS.iter().any(|hint| text.contains(hint)) {
        return AddressKind::Place;
    }

    if text.contains(ADMIN_MARKERS) {
        AddressKind::IncompleteAddress
    } else {
        AddressKind::Place
    }
}
