//! `AppError` -> resposta HTTP.
//!
//! Não sobe servidor: chama `IntoResponse` direto nos valores de erro.

use axum::{http::StatusCode, response::IntoResponse};
use http_body_util::BodyExt;
use laundry_pos::{
    common::error::AppError,
    models::{outlet::OutletPayload, transaction::TransactionStatus},
    services::access_control::KASIR_WITHOUT_OUTLET,
};
use validator::Validate;

async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn bad_request_returns_400() {
    let (status, json) = error_to_response(AppError::BadRequest("diskon terlalu besar".into())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "diskon terlalu besar");
}

#[tokio::test]
async fn validation_error_carries_field_details() {
    let payload: OutletPayload = serde_json::from_value(serde_json::json!({
        "name": "",
        "address": "Jl. Kemang Raya 10",
        "pricePerKm": 3000
    }))
    .unwrap();
    let errors = payload.validate().unwrap_err();

    let (status, json) = error_to_response(AppError::from(errors)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["details"]["name"][0], "Nama outlet wajib diisi.");
}

#[tokio::test]
async fn missing_token_returns_401() {
    let (status, json) = error_to_response(AppError::InvalidToken).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(json["error"].is_string());

    let (status, _) = error_to_response(AppError::InvalidCredentials).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unauthorized_returns_403_with_message() {
    let (status, json) =
        error_to_response(AppError::Unauthorized(KASIR_WITHOUT_OUTLET.to_string())).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["error"], "Kasir harus ditugaskan ke outlet tertentu");
}

#[tokio::test]
async fn not_found_returns_404() {
    let (status, json) = error_to_response(AppError::NotFound("Outlet tidak ditemukan.".into())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "Outlet tidak ditemukan.");
}

#[tokio::test]
async fn conflicts_return_409() {
    let (status, _) = error_to_response(AppError::UniqueConstraintViolation("email".into())).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, json) = error_to_response(AppError::InvalidStatusTransition {
        from: TransactionStatus::Baru,
        to: TransactionStatus::Diterima,
    })
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    let msg = json["error"].as_str().unwrap();
    assert!(msg.contains("Baru") && msg.contains("Diterima"), "{msg}");
}

#[tokio::test]
async fn precondition_returns_422() {
    let (status, json) =
        error_to_response(AppError::Precondition("Outlet location not configured".into())).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["error"], "Outlet location not configured");
}

#[tokio::test]
async fn internal_error_is_sanitized() {
    let err = AppError::InternalServerError(anyhow::anyhow!("connection reset by peer at 10.0.0.3"));
    let (status, json) = error_to_response(err).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "Terjadi kesalahan pada server.");
    assert!(json.get("details").is_none());
}
