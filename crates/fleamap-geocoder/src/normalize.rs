//! Rewriting noisy location text into progressively looser search queries.
//!
//! Every function here is pure and returns either a cleaned string or `None`
//! when nothing usable remains. See [`crate::strategy`] for how the cascade
//! combines them.

use std::sync::LazyLock;

use regex::Regex;

/// How much of the input [`clean_search_term`] throws away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanLevel {
    /// Parenthetical asides and a trailing "near/around" word.
    Light,
    /// `Light` plus floor numbers such as `3층`.
    Medium,
    /// `Medium` plus every character that is not Hangul, ASCII alphanumeric,
    /// whitespace, `_` or `-`.
    Aggressive,
}

/// Place-type words, in priority order, for [`extract_place_name`].
const PLACE_KEYWORDS: &[&str] = &[
    "공원", "센터", "빌딩", "타워", "플라자", "몰", "마트", "광장", "역", "학교", "대학교",
    "병원", "시장", "백화점", "아울렛", "캐슬", "파크", "스퀘어", "갤러리", "뮤지엄", "미술관",
    "박물관", "체육관", "경기장", "어린이집",
];

/// Apartment and building brands. A match keeps the brand and what follows it.
const BUILDING_BRANDS: &[&str] = &["아이파크", "래미안", "푸르지오", "자이", "힐스테이트"];

/// Generic building-type suffixes. A match keeps the word ending in the
/// suffix and what follows it.
const BUILDING_SUFFIXES: &[&str] = &[
    "센터", "빌딩", "타워", "플라자", "몰", "마트", "공원", "광장", "역", "캐슬", "파크",
    "스퀘어",
];

/// Event words that never help locate a venue.
const EVENT_WORDS: &[&str] = &["플리마켓", "야시장", "행사", "축제", "페스티벌", "페어", "마켓"];

/// Last-word endings that mark a valid administrative unit.
const ADMIN_UNIT_SUFFIXES: &[char] = &['시', '군', '구', '읍', '면', '동', '리'];

static PARENTHETICAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([^)]*\)").expect("valid regex"));

static VAGUE_PROXIMITY_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s*(?:일대|인근|부근|일원|근처|주변)\s*$").expect("valid regex")
});

static FLOOR_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+층").expect("valid regex"));

static NON_SEARCH_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_\s가-힣\-]").expect("valid regex"));

static CITY_GAP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"시\s+").expect("valid regex"));

static DISTRICT_GAP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"구\s+").expect("valid regex"));

static PLACE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    PLACE_KEYWORDS
        .iter()
        .map(|keyword| Regex::new(&format!("[가-힣0-9]+{keyword}")).expect("valid regex"))
        .collect()
});

static BUILDING_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    let brands = BUILDING_BRANDS
        .iter()
        .map(|brand| format!(r"{brand}[가-힣A-Za-z0-9\s]*"));
    let suffixes = BUILDING_SUFFIXES
        .iter()
        .map(|suffix| format!(r"[가-힣A-Za-z0-9]*{suffix}[가-힣A-Za-z0-9\s]*"));
    brands
        .chain(suffixes)
        .map(|pattern| Regex::new(&pattern).expect("valid regex"))
        .collect()
});

/// Boilerplate stripped from event titles before using them as a query.
static TITLE_NOISE: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"[0-9]{4}\s*년?",
        r"[0-9]+월\s*[0-9]+일?",
        r"시즌\s*[0-9]+",
        r"제\s*[0-9]+회",
        r"셀러\s*모집",
        r"참여자\s*모집",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("valid regex"))
    .collect()
});

static TITLE_PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[:\-\[\]()]").expect("valid regex"));

static LOT_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([동리])\s*[0-9]+(?:-[0-9]+)?(?:\s|$)").expect("valid regex")
});

static ROAD_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([로길])\s*[0-9]+(?:-[0-9]+)?(?:\s|$)").expect("valid regex")
});

static BEONJI_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"번지\s*[0-9]+").expect("valid regex"));

static BEONGIL_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"번길\s*[0-9]+").expect("valid regex"));

static UNIT_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+동\s*[0-9]+호").expect("valid regex"));

/// Collapses whitespace runs to single spaces and trims both ends.
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Cleans `text` at the given level. Returns an empty string for empty input.
#[must_use]
pub fn clean_search_term(text: &str, level: CleanLevel) -> String {
    if text.is_empty() {
        return String::new();
    }

    let mut cleaned = PARENTHETICAL.replace_all(text, "").into_owned();
    if level != CleanLevel::Light {
        cleaned = FLOOR_NUMBER.replace_all(&cleaned, "").into_owned();
    }
    cleaned = VAGUE_PROXIMITY_SUFFIX.replace_all(&cleaned, "").into_owned();
    if level == CleanLevel::Aggressive {
        cleaned = NON_SEARCH_CHARS.replace_all(&cleaned, " ").into_owned();
    }

    collapse_whitespace(&cleaned)
}

/// Finds a `<name><place-type>` token such as `새숲어린이공원`.
///
/// Keywords are tried in priority order; for the first keyword with any
/// match, the longest match wins (ties go to the later one).
#[must_use]
pub fn extract_place_name(text: &str) -> Option<String> {
    PLACE_PATTERNS.iter().find_map(|pattern| {
        pattern
            .find_iter(text)
            .map(|m| m.as_str())
            .reduce(|best, next| {
                if best.chars().count() > next.chars().count() {
                    best
                } else {
                    next
                }
            })
            .map(str::to_owned)
    })
}

/// Reduces an incomplete address to its enclosing region.
///
/// Drops `특별시`/`광역시`, then a trailing word that is not an administrative
/// unit, then a trailing `동`/`리` marker.
#[must_use]
pub fn extract_upper_region(location: &str) -> String {
    let stripped = location.replacen("특별시", "", 1).replacen("광역시", "", 1);
    let stripped = CITY_GAP.replace(&stripped, "시 ");
    let stripped = DISTRICT_GAP.replace(&stripped, "구 ");
    let stripped = stripped.trim();

    let words: Vec<&str> = stripped.split_whitespace().collect();
    let region = match words.split_last() {
        Some((last, rest)) if !rest.is_empty() && !last.ends_with(ADMIN_UNIT_SUFFIXES) => {
            tracing::debug!(dropped = %last, "dropping trailing non-administrative word");
            rest.join(" ")
        }
        _ => stripped.to_owned(),
    };

    let region = region.strip_suffix('동').unwrap_or(&region);
    let region = region.strip_suffix('리').unwrap_or(region);
    region.trim().to_owned()
}

/// Mines an event title for a building or complex name.
///
/// `"영통 아이파크 캐슬 야시장"` yields `"아이파크 캐슬"`. When no brand or
/// building word is present, the title itself is used once dates, episode
/// numbers, recruiting phrases and event words are removed, provided 3 to 30
/// characters remain.
#[must_use]
pub fn extract_building_name(title: &str) -> Option<String> {
    if title.is_empty() {
        return None;
    }

    for pattern in BUILDING_PATTERNS.iter() {
        if let Some(span) = pattern.find(title) {
            let extracted = collapse_whitespace(&strip_event_words(span.as_str()));
            if extracted.chars().count() > 2 {
                return Some(extracted);
            }
        }
    }

    let without_noise = TITLE_NOISE
        .iter()
        .fold(title.to_owned(), |acc, pattern| {
            pattern.replace_all(&acc, "").into_owned()
        });
    let without_events = strip_event_words(&without_noise);
    let cleaned = collapse_whitespace(&TITLE_PUNCTUATION.replace_all(&without_events, " "));

    let len = cleaned.chars().count();
    (3..=30).contains(&len).then_some(cleaned)
}

fn strip_event_words(text: &str) -> String {
    EVENT_WORDS
        .iter()
        .fold(text.to_owned(), |acc, word| acc.replace(word, ""))
}

/// Strips lot, road, and unit numbers so a full address becomes a
/// neighborhood- or street-level query.
///
/// `"서울특별시 마포구 도화동 553-1"` yields `"서울특별시 마포구 도화동"`.
#[must_use]
pub fn strip_house_number(location: &str) -> String {
    if location.is_empty() {
        return String::new();
    }

    let stripped = LOT_NUMBER.replace_all(location, "${1} ");
    let stripped = ROAD_NUMBER.replace_all(&stripped, "${1} ");
    let stripped = BEONJI_NUMBER.replace_all(&stripped, "");
    let stripped = BEONGIL_NUMBER.replace_all(&stripped, "");
    let stripped = UNIT_NUMBER.replace_all(&stripped, "");
    collapse_whitespace(&stripped)
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
