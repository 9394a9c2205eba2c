// src/middleware/outlet.rs

use axum::{extract::Request, middleware::Next, response::Response};

use crate::{
    common::error::AppError, models::auth::Actor, services::access_control::check_outlet_assignment,
};

/// Guard aplicado depois do `auth_guard`: barra kasir sem outlet vinculado
/// antes de chegar em qualquer handler.
pub async fn outlet_guard(request: Request, next: Next) -> Result<Response, AppError> {
    let actor = request
        .extensions()
        .get::<Actor>()
        .ok_or(AppError::InvalidToken)?;

    if let Err(e) = check_outlet_assignment(actor) {
        tracing::info!(actor_id = %actor.id, "kasir sem outlet barrado");
        return Err(e);
    }

    Ok(next.run(request).await)
}
