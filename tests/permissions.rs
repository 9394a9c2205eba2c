//! `RequirePermission<P>` decidido só pelo catálogo estático.

mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    routing::get,
    Extension, Router,
};
use http_body_util::BodyExt;
use laundry_pos::{
    middleware::rbac::{PermOutletCreate, PermReportExport, PermUserView, RequirePermission},
    models::{auth::Actor, rbac::Role},
};
use tower::ServiceExt;
use uuid::Uuid;

async fn create_outlet(_perm: RequirePermission<PermOutletCreate>) -> &'static str {
    "ok"
}

async fn export(perm: RequirePermission<PermReportExport>) -> String {
    perm.actor.id.to_string()
}

async fn users(_perm: RequirePermission<PermUserView>) -> &'static str {
    "ok"
}

async fn call(actor: Actor, uri: &str) -> (StatusCode, serde_json::Value) {
    let app = Router::new()
        .route("/outlets", get(create_outlet))
        .route("/export", get(export))
        .route("/users", get(users))
        .layer(Extension(actor))
        .with_state(common::lazy_state());

    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}

#[tokio::test]
async fn owner_cannot_write_outlets() {
    let owner = Actor::new(Uuid::new_v4(), vec![Role::Owner], None);
    let (status, json) = call(owner, "/outlets").await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(json["error"].as_str().unwrap().contains("outlet.create"));
}

#[tokio::test]
async fn admin_can_write_outlets() {
    let admin = Actor::new(Uuid::new_v4(), vec![Role::Admin], None);
    let (status, _) = call(admin, "/outlets").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn every_role_can_export_reports() {
    for role in [Role::Admin, Role::Kasir, Role::Owner] {
        let actor = Actor::new(Uuid::new_v4(), vec![role], Some(Uuid::new_v4()));
        let (status, _) = call(actor, "/export").await;
        assert_eq!(status, StatusCode::OK, "{role:?}");
    }
}

#[tokio::test]
async fn kasir_cannot_manage_users() {
    let kasir = Actor::new(Uuid::new_v4(), vec![Role::Kasir], Some(Uuid::new_v4()));
    let (status, json) = call(kasir, "/users").await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(json["error"].as_str().unwrap().contains("user.view"));
}

#[tokio::test]
async fn actor_without_roles_is_denied() {
    let nobody = Actor::new(Uuid::new_v4(), vec![], None);
    let (status, _) = call(nobody, "/export").await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
