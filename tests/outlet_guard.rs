//! `outlet_guard` num `Router` de verdade.
//!
//! O ator é injetado com `Extension`, no lugar do `auth_guard`.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    middleware::from_fn,
    routing::get,
    Extension, Router,
};
use http_body_util::BodyExt;
use laundry_pos::{
    middleware::{auth::AuthenticatedUser, outlet::outlet_guard},
    models::{auth::Actor, rbac::Role},
};
use tower::ServiceExt;
use uuid::Uuid;

async fn whoami(AuthenticatedUser(actor): AuthenticatedUser) -> String {
    actor.id.to_string()
}

fn app(actor: Option<Actor>) -> Router {
    let router = Router::new()
        .route("/api/outlets", get(whoami))
        .route("/api/reports/transactions", get(whoami))
        .layer(from_fn(outlet_guard));
    match actor {
        Some(actor) => router.layer(Extension(actor)),
        None => router,
    }
}

async fn call(actor: Option<Actor>, uri: &str) -> (StatusCode, String) {
    let response = app(actor)
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn kasir_without_outlet_is_rejected_on_every_scoped_route() {
    for uri in ["/api/outlets", "/api/reports/transactions"] {
        let kasir = Actor::new(Uuid::new_v4(), vec![Role::Kasir], None);
        let (status, body) = call(Some(kasir), uri).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{uri}");
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["error"], "Kasir harus ditugaskan ke outlet tertentu");
    }
}

#[tokio::test]
async fn kasir_with_outlet_reaches_handler() {
    let kasir = Actor::new(Uuid::new_v4(), vec![Role::Kasir], Some(Uuid::new_v4()));
    let id = kasir.id;
    let (status, body) = call(Some(kasir), "/api/outlets").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, id.to_string());
}

#[tokio::test]
async fn admin_and_owner_pass_without_outlet() {
    for role in [Role::Admin, Role::Owner] {
        let actor = Actor::new(Uuid::new_v4(), vec![role], None);
        let (status, _) = call(Some(actor), "/api/reports/transactions").await;
        assert_eq!(status, StatusCode::OK, "{role:?}");
    }
}

#[tokio::test]
async fn request_without_actor_is_unauthenticated() {
    let (status, _) = call(None, "/api/outlets").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
