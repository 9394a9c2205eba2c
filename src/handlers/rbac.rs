// src/handlers/rbac.rs

use axum::{extract::State, Json};

use crate::{
    config::AppState,
    middleware::rbac::{PermUserView, RequirePermission},
    models::rbac::{PermissionInfo, RoleResponse},
};

// GET /api/permissions
#[utoipa::path(
    get,
    path = "/api/permissions",
    tag = "RBAC",
    responses((status = 200, description = "Catálogo de permissões do sistema", body = Vec<PermissionInfo>)),
    security(("api_jwt" = []))
)]
pub async fn list_permissions(State(app_state): State<AppState>) -> Json<Vec<PermissionInfo>> {
    Json(app_state.rbac_service.list_system_permissions())
}

// GET /api/roles
#[utoipa::path(
    get,
    path = "/api/roles",
    tag = "RBAC",
    responses(
        (status = 200, description = "Cargos e suas permissões", body = Vec<RoleResponse>),
        (status = 403, description = "Sem permissão")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_roles(
    State(app_state): State<AppState>,
    _perm: RequirePermission<PermUserView>,
) -> Json<Vec<RoleResponse>> {
    Json(app_state.rbac_service.list_roles())
}
