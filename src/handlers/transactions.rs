// src/handlers/transactions.rs

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
        PermTransactionCreate, PermTransactionDelete, PermTransactionEdit, PermTransactionView,
        RequirePermission,
    },
    models::transaction::{
        CreateTransactionPayload, Transaction, TransactionDetail, TransactionFilter,
        UpdateStatusPayload,
    },
};

// POST /api/transactions
#[utoipa::path(
    post,
    path = "/api/transactions",
    tag = "Transactions",
    request_body = CreateTransactionPayload,
    responses(
        (status = 201, description = "Transação criada", body = TransactionDetail),
        (status = 400, description = "Dados inválidos (ex.: desconto maior que subtotal)"),
        (status = 403, description = "Outlet fora do escopo"),
        (status = 404, description = "Cliente ou pacote inexistente"),
        (status = 422, description = "Entrega sem coordenadas")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_transaction(
    State(app_state): State<AppState>,
    perm: RequirePermission<PermTransactionCreate>,
    Json(payload): Json<CreateTransactionPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let detail = app_state
        .transaction_service
        .create_transaction(&perm.actor, &payload)
        .await?;
    Ok((StatusCode::CREATED, Json(detail)))
}

// GET /api/transactions
#[utoipa::path(
    get,
    path = "/api/transactions",
    tag = "Transactions",
    params(TransactionFilter),
    responses(
        (status = 200, description = "Transações visíveis", body = Vec<Transaction>),
        (status = 403, description = "Outlet fora do escopo")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_transactions(
    State(app_state): State<AppState>,
    perm: RequirePermission<PermTransactionView>,
    Query(filter): Query<TransactionFilter>,
) -> Result<impl IntoResponse, AppError> {
    let transactions = app_state
        .transaction_service
        .list_transactions(&perm.actor, &filter)
        .await?;
    Ok((StatusCode::OK, Json(transactions)))
}

// GET /api/transactions/{id}
#[utoipa::path(
    get,
    path = "/api/transactions/{id}",
    tag = "Transactions",
    params(("id" = Uuid, Path, description = "ID da transação")),
    responses(
        (status = 200, description = "Transação com itens", body = TransactionDetail),
        (status = 404, description = "Não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_transaction(
    State(app_state): State<AppState>,
    perm: RequirePermission<PermTransactionView>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let detail = app_state.transaction_service.get_transaction(&perm.actor, id).await?;
    Ok((StatusCode::OK, Json(detail)))
}

// PATCH /api/transactions/{id}/status
#[utoipa::path(
    patch,
    path = "/api/transactions/{id}/status",
    tag = "Transactions",
    params(("id" = Uuid, Path, description = "ID da transação")),
    request_body = UpdateStatusPayload,
    responses(
        (status = 200, description = "Status alterado", body = Transaction),
        (status = 409, description = "Transição não permitida")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_status(
    State(app_state): State<AppState>,
    perm: RequirePermission<PermTransactionEdit>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStatusPayload>,
) -> Result<impl IntoResponse, AppError> {
    let updated = app_state
        .transaction_service
        .update_status(&perm.actor, id, payload.status)
        .await?;
    Ok((StatusCode::OK, Json(updated)))
}

// POST /api/transactions/{id}/pay
#[utoipa::path(
    post,
    path = "/api/transactions/{id}/pay",
    tag = "Transactions",
    params(("id" = Uuid, Path, description = "ID da transação")),
    responses(
        (status = 200, description = "Pagamento registrado", body = Transaction),
        (status = 409, description = "Já paga ou cancelada")
    ),
    security(("api_jwt" = []))
)]
pub async fn pay_transaction(
    State(app_state): State<AppState>,
    perm: RequirePermission<PermTransactionEdit>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let updated = app_state.transaction_service.pay(&perm.actor, id).await?;
    Ok((StatusCode::OK, Json(updated)))
}

// DELETE /api/transactions/{id}
#[utoipa::path(
    delete,
    path = "/api/transactions/{id}",
    tag = "Transactions",
    params(("id" = Uuid, Path, description = "ID da transação")),
    responses(
        (status = 204, description = "Transação removida"),
        (status = 404, description = "Não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_transaction(
    State(app_state): State<AppState>,
    perm: RequirePermission<PermTransactionDelete>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    app_state
        .transaction_service
        .delete_transaction(&perm.actor, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
