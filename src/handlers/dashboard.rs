// src/handlers/dashboard.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::rbac::{PermDashboardView, RequirePermission},
    models::dashboard::DashboardSummary,
};

// GET /api/dashboard/summary
#[utoipa::path(
    get,
    path = "/api/dashboard/summary",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Resumo do dia nos outlets visíveis", body = DashboardSummary),
        (status = 401, description = "Não autorizado"),
        (status = 403, description = "Kasir sem outlet")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_summary(
    State(app_state): State<AppState>,
    perm: RequirePermission<PermDashboardView>,
) -> Result<impl IntoResponse, AppError> {
    let summary = app_state.dashboard_service.get_summary(&perm.actor).await?;
    Ok((StatusCode::OK, Json(summary)))
}
