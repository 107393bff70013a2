//! Request pipeline tests against a mock Streamr API.

use crate::client::{ClientConfig, StreamrClient, NO_BODY};
use crate::error::StreamrError;
use crate::streams::StreamService;
use crate::types::{NewStream, SortOrder, Stream, StreamQuery};
use mockito::{Matcher, Server, ServerGuard};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde_json::{json, Value};
use tokio_test::{assert_err, assert_ok};

const API_KEY: &str = "test-api-key";

const STREAM_JSON: &str = r#"{
    "id": "xyz123",
    "name": "foobar",
    "description": "test stream",
    "dateCreated": "2024-01-01T00:00:00Z",
    "lastUpdated": "2024-01-02T00:00:00Z"
}"#;

async fn setup() -> (ServerGuard, StreamService) {
    let server = Server::new_async().await;
    let config = ClientConfig {
        api_key: API_KEY.to_string(),
        base_url: format!("{}/api/v1", server.url()),
        request_timeout_ms: 5_000,
        ..Default::default()
    };
    let service = StreamService::new(StreamrClient::with_config(config).unwrap());
    (server, service)
}

fn expect_api_error(err: StreamrError, expected: u16) {
    match err {
        StreamrError::Api { status, .. } => assert_eq!(status.as_u16(), expected),
        other => panic!("expected API error {}, got {:?}", expected, other),
    }
}

#[tokio::test]
async fn test_produce_to_stream() {
    let (mut server, streams) = setup().await;

    #[derive(Serialize)]
    struct Person {
        name: String,
        age: u32,
    }

    let mock = server
        .mock("POST", "/api/v1/streams/xyz123/data")
        .match_header("authorization", "Token test-api-key")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({"name": "foobar", "age": 99})))
        .with_status(200)
        .create_async()
        .await;

    let data = Person {
        name: "foobar".to_string(),
        age: 99,
    };
    let response = assert_ok!(streams.produce("xyz123", &data).await);
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(*response.method(), Method::POST);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_produce_ignores_response_body() {
    let (mut server, streams) = setup().await;
    let mock = server
        .mock("POST", "/api/v1/streams/xyz123/data")
        .with_status(201)
        .with_body("not json")
        .create_async()
        .await;

    assert_ok!(streams.produce("xyz123", &json!([1, 2, 3])).await);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_produce_encodes_stream_id() {
    let (mut server, streams) = setup().await;
    let mock = server
        .mock("POST", "/api/v1/streams/0xabc%2Fsensors/data")
        .with_status(200)
        .create_async()
        .await;

    assert_ok!(streams.produce("0xabc/sensors", &json!({"v": 1})).await);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_dot_segment_stream_ids_are_rejected() {
    let (mut server, streams) = setup().await;
    let post = server
        .mock("POST", Matcher::Regex("^/api/v1".to_string()))
        .expect(0)
        .create_async()
        .await;
    let get = server
        .mock("GET", Matcher::Regex("^/api/v1".to_string()))
        .expect(0)
        .create_async()
        .await;

    for id in ["", ".", ".."] {
        let err = assert_err!(streams.produce(id, &json!({"v": 1})).await);
        assert!(matches!(err, StreamrError::InvalidStreamId(ref got) if got == id));
        let err = assert_err!(streams.get(id).await);
        assert!(matches!(err, StreamrError::InvalidStreamId(ref got) if got == id));
    }

    post.assert_async().await;
    get.assert_async().await;
}

#[tokio::test]
async fn test_get_stream() {
    let (mut server, streams) = setup().await;
    let mock = server
        .mock("GET", "/api/v1/streams/xyz123")
        .match_header("authorization", "Token test-api-key")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(STREAM_JSON)
        .create_async()
        .await;

    let stream = assert_ok!(streams.get("xyz123").await);
    assert_eq!(stream.id, "xyz123");
    assert_eq!(stream.name, "foobar");
    assert_eq!(stream.description, "test stream");
    assert!(stream.date_created.is_some());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_get_is_idempotent() {
    let (mut server, streams) = setup().await;
    let mock = server
        .mock("GET", "/api/v1/streams/xyz123")
        .with_status(200)
        .with_body(STREAM_JSON)
        .expect(2)
        .create_async()
        .await;

    let first = assert_ok!(streams.get("xyz123").await);
    let second = assert_ok!(streams.get("xyz123").await);
    assert_eq!(first, second);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_get_missing_stream() {
    let (mut server, streams) = setup().await;
    let mock = server
        .mock("GET", "/api/v1/streams/missing")
        .with_status(404)
        .with_body(r#"{"code":"NOT_FOUND","message":"Stream not found"}"#)
        .create_async()
        .await;

    let err = assert_err!(streams.get("missing").await);
    assert!(err.is_not_found());
    match &err {
        StreamrError::Api {
            method,
            url,
            status,
        } => {
            assert_eq!(*method, Method::GET);
            assert!(url.ends_with("/api/v1/streams/missing"));
            assert_eq!(*status, StatusCode::NOT_FOUND);
        }
        other => panic!("unexpected error: {:?}", other),
    }
    mock.assert_async().await;
}

#[tokio::test]
async fn test_get_empty_body_is_empty_response() {
    let (mut server, streams) = setup().await;
    server
        .mock("GET", "/api/v1/streams/xyz123")
        .with_status(204)
        .create_async()
        .await;

    let err = assert_err!(streams.get("xyz123").await);
    assert!(matches!(err, StreamrError::EmptyResponse { .. }));
}

#[tokio::test]
async fn test_get_malformed_body_is_decode_error() {
    let (mut server, streams) = setup().await;
    server
        .mock("GET", "/api/v1/streams/xyz123")
        .with_status(200)
        .with_body(r#"{"id": 42}"#)
        .create_async()
        .await;

    let err = assert_err!(streams.get("xyz123").await);
    assert!(matches!(err, StreamrError::Decode(_)));
}

#[tokio::test]
async fn test_api_error_wins_over_decode_error() {
    let (mut server, streams) = setup().await;
    server
        .mock("GET", "/api/v1/streams/xyz123")
        .with_status(500)
        .with_body("{definitely not json")
        .create_async()
        .await;

    let err = assert_err!(streams.get("xyz123").await);
    expect_api_error(err, 500);
}

#[tokio::test]
async fn test_list_streams() {
    let (mut server, streams) = setup().await;
    let body = format!("[{}, {}]", STREAM_JSON, r#"{"id": "abc", "name": "other"}"#);
    let mock = server
        .mock("GET", "/api/v1/streams")
        .with_status(200)
        .with_body(body)
        .create_async()
        .await;

    let list = assert_ok!(streams.list(&StreamQuery::new()).await);
    assert_eq!(list.len(), 2);
    assert_eq!(list[0].id, "xyz123");
    assert_eq!(list[1], Stream::new("abc", "other"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_list_sends_query_parameters() {
    let (mut server, streams) = setup().await;
    let mock = server
        .mock("GET", "/api/v1/streams")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("search".into(), "temp sensor".into()),
            Matcher::UrlEncoded("public".into(), "false".into()),
            Matcher::UrlEncoded("max".into(), "10".into()),
            Matcher::UrlEncoded("sortBy".into(), "name".into()),
            Matcher::UrlEncoded("order".into(), "asc".into()),
        ]))
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let query = StreamQuery::new()
        .with_search("temp sensor")
        .with_public(false)
        .with_max(10)
        .with_sort_by("name", SortOrder::Asc);
    let list = assert_ok!(streams.list(&query).await);
    assert!(list.is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_list_is_restartable() {
    let (mut server, streams) = setup().await;
    let mock = server
        .mock("GET", "/api/v1/streams")
        .with_status(200)
        .with_body(format!("[{}]", STREAM_JSON))
        .expect(2)
        .create_async()
        .await;

    let first = assert_ok!(streams.list(&StreamQuery::new()).await);
    let second = assert_ok!(streams.list(&StreamQuery::new()).await);
    assert_eq!(first, second);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_list_empty_body() {
    let (mut server, streams) = setup().await;
    server
        .mock("GET", "/api/v1/streams")
        .with_status(200)
        .create_async()
        .await;

    let list = assert_ok!(streams.list(&StreamQuery::new()).await);
    assert!(list.is_empty());
}

#[tokio::test]
async fn test_create_stream() {
    let (mut server, streams) = setup().await;
    let mock = server
        .mock("POST", "/api/v1/streams")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({"name": "foobar"})))
        .with_status(201)
        .with_body(STREAM_JSON)
        .create_async()
        .await;

    let stream = assert_ok!(streams.create("foobar").await);
    assert_eq!(stream.id, "xyz123");
    assert_eq!(stream.name, "foobar");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_create_with_description() {
    let (mut server, streams) = setup().await;
    let mock = server
        .mock("POST", "/api/v1/streams")
        .match_body(Matcher::Json(
            json!({"name": "foobar", "description": "<b>x & y</b>"}),
        ))
        .with_status(200)
        .with_body(STREAM_JSON)
        .create_async()
        .await;

    let request = NewStream::new("foobar").with_description("<b>x & y</b>");
    assert_ok!(streams.create_stream(&request).await);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_create_then_get_round_trip() {
    let (mut server, streams) = setup().await;
    server
        .mock("POST", "/api/v1/streams")
        .match_body(Matcher::Json(json!({"name": "foobar"})))
        .with_status(200)
        .with_body(STREAM_JSON)
        .create_async()
        .await;
    server
        .mock("GET", "/api/v1/streams/xyz123")
        .with_status(200)
        .with_body(STREAM_JSON)
        .create_async()
        .await;

    let created = assert_ok!(streams.create("foobar").await);
    let fetched = assert_ok!(streams.get(&created.id).await);
    assert_eq!(fetched.name, "foobar");
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_get_by_name() {
    let (mut server, streams) = setup().await;
    let body = json!([
        {"id": "a1", "name": "foobar-archive"},
        {"id": "a2", "name": "foobar"},
    ]);
    let mock = server
        .mock("GET", "/api/v1/streams")
        .match_query(Matcher::UrlEncoded("name".into(), "foobar".into()))
        .with_status(200)
        .with_body(body.to_string())
        .create_async()
        .await;

    let found = assert_ok!(streams.get_by_name("foobar").await);
    assert_eq!(found.map(|s| s.id), Some("a2".to_string()));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_get_by_name_not_found() {
    let (mut server, streams) = setup().await;
    server
        .mock("GET", "/api/v1/streams")
        .match_query(Matcher::UrlEncoded("name".into(), "nothing".into()))
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let found = assert_ok!(streams.get_by_name("nothing").await);
    assert!(found.is_none());
}

#[tokio::test]
async fn test_get_or_create_existing() {
    let (mut server, streams) = setup().await;
    server
        .mock("GET", "/api/v1/streams")
        .match_query(Matcher::UrlEncoded("name".into(), "foobar".into()))
        .with_status(200)
        .with_body(format!("[{}]", STREAM_JSON))
        .create_async()
        .await;
    let create = server
        .mock("POST", "/api/v1/streams")
        .expect(0)
        .create_async()
        .await;

    let stream = assert_ok!(streams.get_or_create("foobar").await);
    assert_eq!(stream.id, "xyz123");
    create.assert_async().await;
}

#[tokio::test]
async fn test_get_or_create_missing() {
    let (mut server, streams) = setup().await;
    server
        .mock("GET", "/api/v1/streams")
        .match_query(Matcher::UrlEncoded("name".into(), "foobar".into()))
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;
    let create = server
        .mock("POST", "/api/v1/streams")
        .match_body(Matcher::Json(json!({"name": "foobar"})))
        .with_status(201)
        .with_body(STREAM_JSON)
        .create_async()
        .await;

    let stream = assert_ok!(streams.get_or_create("foobar").await);
    assert_eq!(stream.name, "foobar");
    create.assert_async().await;
}

#[tokio::test]
async fn test_status_classification() {
    let (mut server, streams) = setup().await;
    let client = streams.client();

    for status in [200u16, 201, 202, 204, 299] {
        let path = format!("/api/v1/status/{}", status);
        server
            .mock("GET", path.as_str())
            .with_status(status as usize)
            .with_body("whatever")
            .create_async()
            .await;
        let request = client
            .build_request(Method::GET, &format!("status/{}", status), NO_BODY)
            .unwrap();
        let response = assert_ok!(client.execute(request).await);
        assert_eq!(response.status().as_u16(), status);
        assert!(response.is_success());
    }

    for status in [400u16, 401, 403, 404, 409, 429, 500, 503] {
        let path = format!("/api/v1/status/{}", status);
        server
            .mock("GET", path.as_str())
            .with_status(status as usize)
            .create_async()
            .await;
        let request = client
            .build_request(Method::GET, &format!("status/{}", status), NO_BODY)
            .unwrap();
        let err = assert_err!(client.execute(request).await);
        expect_api_error(err, status);
    }
}

#[tokio::test]
async fn test_redirects_are_not_followed() {
    let (mut server, streams) = setup().await;
    let location = format!("{}/elsewhere", server.url());
    let target = server
        .mock("GET", "/elsewhere")
        .expect(0)
        .create_async()
        .await;
    server
        .mock("GET", "/api/v1/streams/xyz123")
        .with_status(302)
        .with_header("location", &location)
        .create_async()
        .await;

    let err = assert_err!(streams.get("xyz123").await);
    expect_api_error(err, 302);
    target.assert_async().await;
}

#[tokio::test]
async fn test_execute_json_empty_body() {
    let (mut server, streams) = setup().await;
    server
        .mock("DELETE", "/api/v1/streams/xyz123")
        .with_status(204)
        .create_async()
        .await;

    let client = streams.client();
    let request = client
        .build_request(Method::DELETE, "streams/xyz123", NO_BODY)
        .unwrap();
    let (response, value) = assert_ok!(client.execute_json::<Value>(request).await);
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(value.is_none());
}

#[tokio::test]
async fn test_envelope_exposes_headers() {
    let (mut server, streams) = setup().await;
    server
        .mock("GET", "/api/v1/streams/xyz123")
        .with_status(200)
        .with_header("x-request-id", "req-42")
        .with_body(STREAM_JSON)
        .create_async()
        .await;

    let client = streams.client();
    let request = client
        .build_request(Method::GET, "streams/xyz123", NO_BODY)
        .unwrap();
    let (response, stream) = assert_ok!(client.execute_json::<Stream>(request).await);
    assert_eq!(response.headers()["x-request-id"], "req-42");
    assert_eq!(stream.unwrap().id, "xyz123");
}

#[tokio::test]
async fn test_subscribe_sends_no_request() {
    let (mut server, streams) = setup().await;
    let any = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;
    let any_post = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let sub = assert_ok!(streams.subscribe("xyz123", |_| {}));
    assert_eq!(streams.subscriptions().list_by_stream("xyz123"), vec![sub]);
    any.assert_async().await;
    any_post.assert_async().await;
}
