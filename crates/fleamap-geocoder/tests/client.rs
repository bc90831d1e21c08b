//! Integration tests for `KakaoLocalClient` using wiremock HTTP mocks.

use std::time::Duration;

use fleamap_geocoder::{GeocoderError, KakaoLocalClient, PlaceSearch};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> KakaoLocalClient {
    KakaoLocalClient::with_base_url("test-key", 5, base_url)
        .expect("client construction should not fail")
}

#[tokio::test]
async fn keyword_search_sends_auth_header_and_parses_documents() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "documents": [
            {
                "id": "26338954",
                "place_name": "새숲어린이공원",
                "address_name": "서울 관악구 조원동 1619",
                "road_address_name": "서울 관악구 조원중앙로 10",
                "x": "126.92710",
                "y": "37.48120",
                "category_name": "여행 > 공원"
            },
            {
                "place_name": "다른 공원",
                "address_name": "서울 관악구",
                "x": "126.9",
                "y": "37.4"
            }
        ],
        "meta": { "total_count": 2, "pageable_count": 2, "is_end": true }
    });

    Mock::given(method("GET"))
        .and(path("/v2/local/search/keyword.json"))
        .and(query_param("query", "새숲어린이공원"))
        .and(header("Authorization", "KakaoAK test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let candidates = client
        .search_keyword("새숲어린이공원")
        .await
        .expect("should parse documents");

    assert_eq!(candidates.len(), 2);
    assert_eq!(candidates[0].place_name.as_deref(), Some("새숲어린이공원"));
    assert_eq!(
        candidates[0].address_name.as_deref(),
        Some("서울 관악구 조원동 1619")
    );
    assert!((candidates[0].lat - 37.4812).abs() < 1e-9);
    assert!((candidates[0].lng - 126.9271).abs() < 1e-9);
}

#[tokio::test]
async fn address_search_hits_address_endpoint() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "documents": [
            {
                "address_name": "서울 강남구 테헤란로 123",
                "address_type": "ROAD_ADDR",
                "x": "127.0276",
                "y": "37.4979"
            }
        ],
        "meta": { "total_count": 1, "is_end": true }
    });

    Mock::given(method("GET"))
        .and(path("/v2/local/search/address.json"))
        .and(query_param("query", "서울특별시 강남구 테헤란로 123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let candidates = client
        .search_address("서울특별시 강남구 테헤란로 123")
        .await
        .expect("should parse documents");

    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].place_name, None);
    assert_eq!(
        candidates[0].address_name.as_deref(),
        Some("서울 강남구 테헤란로 123")
    );
}

#[tokio::test]
async fn empty_documents_yield_no_candidates() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/local/search/keyword.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "documents": [],
            "meta": { "total_count": 0, "is_end": true }
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let candidates = client
        .search_keyword("존재하지 않는 장소")
        .await
        .expect("empty result is not an error");

    assert!(candidates.is_empty());
}

#[tokio::test]
async fn body_without_meta_still_decodes() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/local/search/address.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "documents": [
                { "x": "127.0276", "y": "37.4979", "address_name": "서울 강남구 역삼동" }
            ]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let candidates = client
        .search_address("서울 강남구 역삼동")
        .await
        .expect("meta is optional");

    assert_eq!(candidates.len(), 1);
    assert!((candidates[0].lat - 37.4979).abs() < 1e-9);
    assert!((candidates[0].lng - 127.0276).abs() < 1e-9);
}

#[tokio::test]
async fn error_envelope_becomes_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "errorType": "AccessDeniedError",
            "message": "cannot find appkey"
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .search_keyword("코엑스")
        .await
        .expect_err("401 should fail");

    match err {
        GeocoderError::Api {
            error_type,
            message,
        } => {
            assert_eq!(error_type, "AccessDeniedError");
            assert_eq!(message, "cannot find appkey");
        }
        other => panic!("expected GeocoderError::Api, got {other:?}"),
    }
}

#[tokio::test]
async fn client_error_without_envelope_reports_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(400).set_body_string("bad request"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .search_address("코엑스")
        .await
        .expect_err("400 should fail");

    assert!(
        matches!(&err, GeocoderError::Api { error_type, .. } if error_type == "HTTP 400"),
        "unexpected error: {err:?}"
    );
}

#[tokio::test]
async fn server_error_becomes_http_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .search_keyword("코엑스")
        .await
        .expect_err("500 should fail");

    assert!(
        matches!(err, GeocoderError::Http(_)),
        "expected GeocoderError::Http, got {err:?}"
    );
}

#[tokio::test]
async fn malformed_body_becomes_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .search_keyword("코엑스")
        .await
        .expect_err("html body should fail");

    match err {
        GeocoderError::Deserialize { context, .. } => {
            assert_eq!(context, "/v2/local/search/keyword.json");
        }
        other => panic!("expected GeocoderError::Deserialize, got {other:?}"),
    }
}

#[tokio::test]
async fn slow_response_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "documents": [] }))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let client = KakaoLocalClient::with_base_url("test-key", 1, &server.uri())
        .expect("client construction should not fail");
    let err = client
        .search_keyword("코엑스")
        .await
        .expect_err("request should time out");

    assert!(matches!(err, GeocoderError::Http(_)), "got {err:?}");
}
