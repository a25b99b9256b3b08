//! Router tests driven through `tower::ServiceExt::oneshot`.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use hashlink::core::MIN_KEY_BITS;
use hashlink::{Chain, ChainConfig, Record};
use hashlink_node::error::{ErrorBody, REJECTED_MESSAGE};
use hashlink_node::server::app;
use hashlink_node::{AppState, NodeConfig};
use http_body_util::BodyExt;
use tower::ServiceExt;

fn test_chain() -> Chain {
    Chain::bootstrap(ChainConfig {
        difficulty: 1,
        key_bits: MIN_KEY_BITS,
    })
    .unwrap()
}

fn test_app(chain: &Chain) -> Router {
    app(AppState::new(chain.clone()), &NodeConfig::default())
}

async fn body_bytes(resp: axum::response::Response) -> Vec<u8> {
    resp.into_body().collect().await.unwrap().to_bytes().to_vec()
}

async fn body_json<T: serde::de::DeserializeOwned>(resp: axum::response::Response) -> T {
    serde_json::from_slice(&body_bytes(resp).await).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}

#[tokio::test]
async fn chain_is_unavailable_before_genesis() {
    let chain = test_chain();
    let app = test_app(&chain);

    let resp = app.clone().oneshot(get("/")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: ErrorBody = body_json(resp).await;
    assert_eq!(body.error.code, "NOT_INITIALIZED");

    let resp = app
        .oneshot(post_json("/mine", r#"{"payload": 1}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn get_returns_pretty_chain() {
    let chain = test_chain();
    let genesis = chain.initialize_genesis().unwrap();

    let resp = test_app(&chain).oneshot(get("/")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/json"
    );

    let bytes = body_bytes(resp).await;
    let text = String::from_utf8(bytes.clone()).unwrap();
    assert!(text.contains('\n'), "expected indented output");

    let records: Vec<Record> = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(records, vec![genesis]);
}

#[tokio::test]
async fn submit_accepts_then_rejects_resubmission() {
    let chain = test_chain();
    chain.initialize_genesis().unwrap();
    let app = test_app(&chain);

    let candidate = chain.produce(42).unwrap();
    let wire = serde_json::to_string(&candidate).unwrap();

    let resp = app.clone().oneshot(post_json("/", wire.clone())).await.unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let accepted: Record = body_json(resp).await;
    assert_eq!(accepted, candidate);
    assert_eq!(chain.len().unwrap(), 2);

    let resp = app.oneshot(post_json("/", wire)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: ErrorBody = body_json(resp).await;
    assert_eq!(body.error.code, "REJECTED");
    assert_eq!(body.error.message, REJECTED_MESSAGE);
    assert_eq!(chain.len().unwrap(), 2);
}

#[tokio::test]
async fn tampered_record_is_a_conflict() {
    let chain = test_chain();
    chain.initialize_genesis().unwrap();

    let mut candidate = chain.produce(42).unwrap();
    candidate.payload = 43;
    let wire = serde_json::to_string(&candidate).unwrap();

    let resp = test_app(&chain).oneshot(post_json("/", wire)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    assert_eq!(chain.len().unwrap(), 1);
}

#[tokio::test]
async fn malformed_bodies_are_bad_requests() {
    let chain = test_chain();
    chain.initialize_genesis().unwrap();
    let app = test_app(&chain);

    for body in [
        "not json",
        r#"{"index": 1}"#,
        r#"{"index":"one","timestamp":"1","payload":1,"digest":"","previous_digest":"","difficulty":1,"nonce":"0","signature":""}"#,
    ] {
        let resp = app.clone().oneshot(post_json("/", body)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "body: {}", body);
        let err: ErrorBody = body_json(resp).await;
        assert_eq!(err.error.code, "BAD_REQUEST");
    }

    let resp = app
        .oneshot(post_json("/mine", r#"{"payload": "x"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(chain.len().unwrap(), 1);
}

#[tokio::test]
async fn mine_appends_a_record() {
    let chain = test_chain();
    let genesis = chain.initialize_genesis().unwrap();
    let app = test_app(&chain);

    let resp = app
        .clone()
        .oneshot(post_json("/mine", r#"{"payload": -5}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let record: Record = body_json(resp).await;
    assert_eq!(record.index, 1);
    assert_eq!(record.payload, -5);
    assert_eq!(record.previous_digest, genesis.digest);

    let resp = app.oneshot(get("/")).await.unwrap();
    let records: Vec<Record> = body_json(resp).await;
    assert_eq!(records.len(), 2);
    chain.verify().unwrap();
}

#[tokio::test]
async fn public_key_is_pem() {
    let chain = test_chain();
    let resp = test_app(&chain).oneshot(get("/public-key")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let pem = String::from_utf8(body_bytes(resp).await).unwrap();
    assert!(pem.starts_with("-----BEGIN PUBLIC KEY-----"));
    assert_eq!(pem, chain.public_key().to_pem().unwrap());
}

#[tokio::test]
async fn oversized_body_is_refused() {
    let chain = test_chain();
    chain.initialize_genesis().unwrap();
    let config = NodeConfig {
        max_body_bytes: 64,
        ..NodeConfig::default()
    };
    let app = app(AppState::new(chain.clone()), &config);

    let resp = app
        .oneshot(post_json("/", "x".repeat(1024)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
}
