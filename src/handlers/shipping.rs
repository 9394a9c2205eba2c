// src/handlers/shipping.rs

use axum::{extract::State, Json};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::shipping::{ShippingQuote, ShippingRequest},
    services::access_control::authorize_outlet,
};

// POST /api/calculate-shipping
#[utoipa::path(
    post,
    path = "/api/calculate-shipping",
    tag = "Shipping",
    request_body = ShippingRequest,
    responses(
        (status = 200, description = "Distância (km) e custo do frete", body = ShippingQuote),
        (status = 403, description = "Outlet fora do escopo ou kasir sem outlet"),
        (status = 404, description = "Outlet não encontrado"),
        (status = 422, description = "Outlet sem coordenadas configuradas")
    ),
    security(("api_jwt" = []))
)]
pub async fn calculate_shipping(
    State(app_state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    Json(payload): Json<ShippingRequest>,
) -> Result<Json<ShippingQuote>, AppError> {
    authorize_outlet(&actor, payload.outlet_id)?;

    let quote = app_state
        .shipping_service
        .shipping_for(payload.outlet_id, payload.latitude, payload.longitude)
        .await?;

    Ok(Json(quote))
}
