//! `POST /calculate-shipping`: o escopo de outlet é checado antes de qualquer consulta.

mod common;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    routing::post,
    Extension, Router,
};
use http_body_util::BodyExt;
use laundry_pos::{
    handlers::shipping::calculate_shipping,
    models::{auth::Actor, rbac::Role},
};
use tower::ServiceExt;
use uuid::Uuid;

async fn quote(actor: Actor, outlet_id: Uuid) -> (StatusCode, serde_json::Value) {
    let app = Router::new()
        .route("/calculate-shipping", post(calculate_shipping))
        .layer(Extension(actor))
        .with_state(common::lazy_state());

    let body = serde_json::json!({
        "outletId": outlet_id,
        "latitude": -6.2088,
        "longitude": 106.8456
    });
    let request = Request::builder()
        .method(Method::POST)
        .uri("/calculate-shipping")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}

#[tokio::test]
async fn kasir_gets_forbidden_for_foreign_or_unknown_outlet() {
    // O banco é preguiçoso e inalcançável: um 403 aqui prova que nada foi consultado,
    // então um id inexistente não pode ser distinguido de um outlet alheio.
    let kasir = Actor::new(Uuid::new_v4(), vec![Role::Kasir], Some(Uuid::new_v4()));
    let (status, json) = quote(kasir, Uuid::new_v4()).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn kasir_without_outlet_is_forbidden() {
    let kasir = Actor::new(Uuid::new_v4(), vec![Role::Kasir], None);
    let (status, _) = quote(kasir, Uuid::new_v4()).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
