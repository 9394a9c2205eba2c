// src/handlers/reports.rs

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::rbac::{PermReportExport, PermReportView, RequirePermission},
    models::{report::TransactionReport, transaction::TransactionFilter},
};

const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

// GET /api/reports/transactions
#[utoipa::path(
    get,
    path = "/api/reports/transactions",
    tag = "Reports",
    params(TransactionFilter),
    responses(
        (status = 200, description = "Linhas e resumo do relatório", body = TransactionReport),
        (status = 403, description = "Sem permissão ou outlet fora do escopo")
    ),
    security(("api_jwt" = []))
)]
pub async fn transaction_report(
    State(app_state): State<AppState>,
    perm: RequirePermission<PermReportView>,
    Query(filter): Query<TransactionFilter>,
) -> Result<impl IntoResponse, AppError> {
    let report = app_state
        .report_service
        .transaction_report(&perm.actor, &filter)
        .await?;
    Ok((StatusCode::OK, Json(report)))
}

// GET /api/reports/transactions/export
#[utoipa::path(
    get,
    path = "/api/reports/transactions/export",
    tag = "Reports",
    params(TransactionFilter),
    responses(
        (status = 200, description = "Planilha .xlsx", content_type = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"),
        (status = 403, description = "Sem permissão ou outlet fora do escopo")
    ),
    security(("api_jwt" = []))
)]
pub async fn export_transactions(
    State(app_state): State<AppState>,
    perm: RequirePermission<PermReportExport>,
    Query(filter): Query<TransactionFilter>,
) -> Result<impl IntoResponse, AppError> {
    let (filename, bytes) = app_state
        .report_service
        .export_transactions(&perm.actor, &filter)
        .await?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, XLSX_MIME.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    ))
}
