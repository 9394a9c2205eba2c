// src/handlers/outlets.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::rbac::{
        PermOutletCreate, PermOutletDelete, PermOutletEdit, PermOutletView, RequirePermission,
    },
    models::outlet::{Outlet, OutletPayload},
};

// GET /api/outlets
#[utoipa::path(
    get,
    path = "/api/outlets",
    tag = "Outlets",
    responses(
        (status = 200, description = "Outlets visíveis ao usuário", body = Vec<Outlet>),
        (status = 403, description = "Sem permissão ou kasir sem outlet")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_outlets(
    State(app_state): State<AppState>,
    perm: RequirePermission<PermOutletView>,
) -> Result<impl IntoResponse, AppError> {
    let outlets = app_state.outlet_service.list_outlets(&perm.actor).await?;
    Ok((StatusCode::OK, Json(outlets)))
}

// GET /api/outlets/{id}
#[utoipa::path(
    get,
    path = "/api/outlets/{id}",
    tag = "Outlets",
    params(("id" = Uuid, Path, description = "ID do outlet")),
    responses(
        (status = 200, description = "Outlet", body = Outlet),
        (status = 403, description = "Outlet fora do escopo"),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_outlet(
    State(app_state): State<AppState>,
    perm: RequirePermission<PermOutletView>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let outlet = app_state.outlet_service.get_outlet(&perm.actor, id).await?;
    Ok((StatusCode::OK, Json(outlet)))
}

// POST /api/outlets
#[utoipa::path(
    post,
    path = "/api/outlets",
    tag = "Outlets",
    request_body = OutletPayload,
    responses(
        (status = 201, description = "Outlet criado", body = Outlet),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_outlet(
    State(app_state): State<AppState>,
    _perm: RequirePermission<PermOutletCreate>,
    Json(payload): Json<OutletPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let outlet = app_state.outlet_service.create_outlet(&payload).await?;
    Ok((StatusCode::CREATED, Json(outlet)))
}

// PUT /api/outlets/{id}
#[utoipa::path(
    put,
    path = "/api/outlets/{id}",
    tag = "Outlets",
    params(("id" = Uuid, Path, description = "ID do outlet")),
    request_body = OutletPayload,
    responses(
        (status = 200, description = "Outlet atualizado", body = Outlet),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_outlet(
    State(app_state): State<AppState>,
    perm: RequirePermission<PermOutletEdit>,
    Path(id): Path<Uuid>,
    Json(payload): Json<OutletPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let outlet = app_state
        .outlet_service
        .update_outlet(&perm.actor, id, &payload)
        .await?;
    Ok((StatusCode::OK, Json(outlet)))
}

// DELETE /api/outlets/{id}
#[utoipa::path(
    delete,
    path = "/api/outlets/{id}",
    tag = "Outlets",
    params(("id" = Uuid, Path, description = "ID do outlet")),
    responses(
        (status = 204, description = "Outlet removido"),
        (status = 404, description = "Não encontrado"),
        (status = 422, description = "Outlet ainda referenciado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_outlet(
    State(app_state): State<AppState>,
    perm: RequirePermission<PermOutletDelete>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    app_state.outlet_service.delete_outlet(&perm.actor, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
