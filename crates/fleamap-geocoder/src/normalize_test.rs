use super::*;

// ---------------------------------------------------------------------------
// clean_search_term
// ---------------------------------------------------------------------------

#[test]
fn light_removes_trailing_proximity_word() {
    assert_eq!(
        clean_search_term("관악구 조원동 새숲어린이공원 일대", CleanLevel::Light),
        "관악구 조원동 새숲어린이공원"
    );
}

#[test]
fn light_removes_parentheticals_but_keeps_floors() {
    assert_eq!(
        clean_search_term("코엑스 (삼성동) 3층", CleanLevel::Light),
        "코엑스 3층"
    );
}

#[test]
fn medium_removes_floor_numbers() {
    assert_eq!(
        clean_search_term("코엑스 (삼성동) 3층", CleanLevel::Medium),
        "코엑스"
    );
}

#[test]
fn medium_removes_suffix_exposed_by_floor_removal() {
    assert_eq!(
        clean_search_term("성수역 2층 근처", CleanLevel::Medium),
        "성수역"
    );
}

#[test]
fn aggressive_replaces_symbols_with_spaces() {
    assert_eq!(
        clean_search_term("성수동 카페거리!#플리", CleanLevel::Aggressive),
        "성수동 카페거리 플리"
    );
}

#[test]
fn aggressive_keeps_hyphens_and_ascii() {
    assert_eq!(
        clean_search_term("Seoul-Forest 2번 출구", CleanLevel::Aggressive),
        "Seoul-Forest 2번 출구"
    );
}

#[test]
fn empty_input_cleans_to_empty() {
    assert_eq!(clean_search_term("", CleanLevel::Aggressive), "");
}

// ---------------------------------------------------------------------------
// extract_place_name
// ---------------------------------------------------------------------------

#[test]
fn place_name_finds_park_token() {
    assert_eq!(
        extract_place_name("관악구 조원동 새숲어린이공원 일대").as_deref(),
        Some("새숲어린이공원")
    );
}

#[test]
fn place_name_prefers_longest_match_for_first_keyword() {
    assert_eq!(
        extract_place_name("시민공원 앞 어린이대공원").as_deref(),
        Some("어린이대공원")
    );
}

#[test]
fn place_name_respects_keyword_priority() {
    // 몰 precedes 역 in the keyword order.
    assert_eq!(
        extract_place_name("잠실역 롯데월드몰").as_deref(),
        Some("롯데월드몰")
    );
}

#[test]
fn place_name_absent_without_keyword() {
    assert_eq!(extract_place_name("성수동 카페거리"), None);
}

// ---------------------------------------------------------------------------
// extract_upper_region
// ---------------------------------------------------------------------------

#[test]
fn upper_region_keeps_city_level_text() {
    assert_eq!(extract_upper_region("경북 경산시"), "경북 경산시");
}

#[test]
fn upper_region_drops_metropolitan_marker_and_trailing_dong() {
    assert_eq!(
        extract_upper_region("서울특별시 강남구 역삼동"),
        "서울 강남구 역삼"
    );
}

#[test]
fn upper_region_drops_non_administrative_last_word() {
    assert_eq!(
        extract_upper_region("부산광역시 해운대구 우동 어딘가"),
        "부산 해운대구 우"
    );
}

#[test]
fn upper_region_keeps_single_word() {
    assert_eq!(extract_upper_region("성수"), "성수");
}

// ---------------------------------------------------------------------------
// extract_building_name
// ---------------------------------------------------------------------------

#[test]
fn building_name_starts_at_brand_token() {
    assert_eq!(
        extract_building_name("영통 아이파크 캐슬 야시장").as_deref(),
        Some("아이파크 캐슬")
    );
}

#[test]
fn building_name_keeps_word_ending_in_suffix() {
    assert_eq!(
        extract_building_name("망원 한강공원 플리마켓").as_deref(),
        Some("한강공원")
    );
}

#[test]
fn building_name_falls_back_to_cleaned_title() {
    assert_eq!(
        extract_building_name("제3회 연남 주말 플리마켓 [셀러 모집]").as_deref(),
        Some("연남 주말")
    );
}

#[test]
fn building_name_rejects_titles_with_nothing_left() {
    assert_eq!(extract_building_name("야시장"), None);
    assert_eq!(extract_building_name("2024년 5월 3일 플리마켓"), None);
}

#[test]
fn building_name_empty_input() {
    assert_eq!(extract_building_name(""), None);
}

// ---------------------------------------------------------------------------
// strip_house_number
// ---------------------------------------------------------------------------

#[test]
fn strips_lot_number_after_dong() {
    assert_eq!(
        strip_house_number("서울특별시 마포구 도화동 553-1"),
        "서울특별시 마포구 도화동"
    );
}

#[test]
fn strips_building_number_after_road() {
    assert_eq!(
        strip_house_number("서울특별시 강남구 테헤란로 123"),
        "서울특별시 강남구 테헤란로"
    );
}

#[test]
fn strips_apartment_unit() {
    assert_eq!(strip_house_number("래미안아파트 101동 202호"), "래미안아파트");
}

#[test]
fn leaves_numberless_text_untouched() {
    assert_eq!(strip_house_number("경북 경산시"), "경북 경산시");
}
