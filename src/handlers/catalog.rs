// src/handlers/catalog.rs

use axum::{
    extract::{Path, Query, State},
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
        PermPackageCreate, PermPackageDelete, PermPackageEdit, PermPackageTypeCreate,
        PermPackageTypeDelete, PermPackageTypeEdit, PermPackageTypeView, PermPackageView,
        RequirePermission,
    },
    models::catalog::{Package, PackageFilter, PackagePayload, PackageType, PackageTypePayload},
};

// =============================================================================
//  ÁREA 1: JENIS PAKET (catálogo global)
// =============================================================================

// GET /api/package-types
#[utoipa::path(
    get,
    path = "/api/package-types",
    tag = "Catalog",
    responses((status = 200, description = "Tipos de pacote", body = Vec<PackageType>)),
    security(("api_jwt" = []))
)]
pub async fn list_package_types(
    State(app_state): State<AppState>,
    _perm: RequirePermission<PermPackageTypeView>,
) -> Result<impl IntoResponse, AppError> {
    let types = app_state.catalog_service.list_package_types().await?;
    Ok((StatusCode::OK, Json(types)))
}

// POST /api/package-types
#[utoipa::path(
    post,
    path = "/api/package-types",
    tag = "Catalog",
    request_body = PackageTypePayload,
    responses(
        (status = 201, description = "Tipo criado", body = PackageType),
        (status = 409, description = "Nome duplicado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_package_type(
    State(app_state): State<AppState>,
    _perm: RequirePermission<PermPackageTypeCreate>,
    Json(payload): Json<PackageTypePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let created = app_state.catalog_service.create_package_type(&payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

// PUT /api/package-types/{id}
#[utoipa::path(
    put,
    path = "/api/package-types/{id}",
    tag = "Catalog",
    params(("id" = Uuid, Path, description = "ID do tipo")),
    request_body = PackageTypePayload,
    responses(
        (status = 200, description = "Tipo atualizado", body = PackageType),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_package_type(
    State(app_state): State<AppState>,
    _perm: RequirePermission<PermPackageTypeEdit>,
    Path(id): Path<Uuid>,
    Json(payload): Json<PackageTypePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let updated = app_state.catalog_service.update_package_type(id, &payload).await?;
    Ok((StatusCode::OK, Json(updated)))
}

// DELETE /api/package-types/{id}
#[utoipa::path(
    delete,
    path = "/api/package-types/{id}",
    tag = "Catalog",
    params(("id" = Uuid, Path, description = "ID do tipo")),
    responses(
        (status = 204, description = "Tipo removido"),
        (status = 422, description = "Tipo ainda usado por pacotes")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_package_type(
    State(app_state): State<AppState>,
    _perm: RequirePermission<PermPackageTypeDelete>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    app_state.catalog_service.delete_package_type(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  ÁREA 2: PAKET (por outlet)
// =============================================================================

// GET /api/packages
#[utoipa::path(
    get,
    path = "/api/packages",
    tag = "Catalog",
    params(PackageFilter),
    responses(
        (status = 200, description = "Pacotes dos outlets visíveis", body = Vec<Package>),
        (status = 403, description = "Outlet fora do escopo")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_packages(
    State(app_state): State<AppState>,
    perm: RequirePermission<PermPackageView>,
    Query(filter): Query<PackageFilter>,
) -> Result<impl IntoResponse, AppError> {
    let packages = app_state.catalog_service.list_packages(&perm.actor, &filter).await?;
    Ok((StatusCode::OK, Json(packages)))
}

// GET /api/packages/{id}
#[utoipa::path(
    get,
    path = "/api/packages/{id}",
    tag = "Catalog",
    params(("id" = Uuid, Path, description = "ID do pacote")),
    responses(
        (status = 200, description = "Pacote", body = Package),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_package(
    State(app_state): State<AppState>,
    perm: RequirePermission<PermPackageView>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let package = app_state.catalog_service.get_package(&perm.actor, id).await?;
    Ok((StatusCode::OK, Json(package)))
}

// POST /api/packages
#[utoipa::path(
    post,
    path = "/api/packages",
    tag = "Catalog",
    request_body = PackagePayload,
    responses(
        (status = 201, description = "Pacote criado", body = Package),
        (status = 404, description = "Outlet ou tipo inexistente"),
        (status = 409, description = "Nome duplicado no outlet")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_package(
    State(app_state): State<AppState>,
    perm: RequirePermission<PermPackageCreate>,
    Json(payload): Json<PackagePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let package = app_state.catalog_service.create_package(&perm.actor, &payload).await?;
    Ok((StatusCode::CREATED, Json(package)))
}

// PUT /api/packages/{id}
#[utoipa::path(
    put,
    path = "/api/packages/{id}",
    tag = "Catalog",
    params(("id" = Uuid, Path, description = "ID do pacote")),
    request_body = PackagePayload,
    responses(
        (status = 200, description = "Pacote atualizado", body = Package),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_package(
    State(app_state): State<AppState>,
    perm: RequirePermission<PermPackageEdit>,
    Path(id): Path<Uuid>,
    Json(payload): Json<PackagePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let package = app_state
        .catalog_service
        .update_package(&perm.actor, id, &payload)
        .await?;
    Ok((StatusCode::OK, Json(package)))
}

// DELETE /api/packages/{id}
#[utoipa::path(
    delete,
    path = "/api/packages/{id}",
    tag = "Catalog",
    params(("id" = Uuid, Path, description = "ID do pacote")),
    responses(
        (status = 204, description = "Pacote removido"),
        (status = 422, description = "Pacote usado em transações")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_package(
    State(app_state): State<AppState>,
    perm: RequirePermission<PermPackageDelete>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    app_state.catalog_service.delete_package(&perm.actor, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
