// src/lib.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, patch, post, put},
    Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod common;
pub mod config;
pub mod db;
pub mod docs;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

use crate::config::AppState;
use crate::docs::ApiDoc;
use crate::middleware::{auth::auth_guard, outlet::outlet_guard};

/// Monta o router completo (rotas, guards e Swagger).
pub fn build_router(app_state: AppState) -> Router {
    // Rotas públicas
    let auth_routes = Router::new().route("/login", post(handlers::auth::login));

    // Só autenticação: gestão de usuários e catálogo de permissões
    let user_routes = Router::new()
        .route("/me", get(handlers::auth::get_me))
        .route(
            "/",
            get(handlers::users::list_users).post(handlers::users::create_user),
        )
        .route(
            "/{id}",
            get(handlers::users::get_user)
                .put(handlers::users::update_user)
                .delete(handlers::users::delete_user),
        );

    let account_routes = Router::new()
        .nest("/users", user_routes)
        .route("/permissions", get(handlers::rbac::list_permissions))
        .route("/roles", get(handlers::rbac::list_roles))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Rotas restritas por outlet: auth_guard roda primeiro, depois outlet_guard
    let scoped_routes = Router::new()
        .route(
            "/outlets",
            get(handlers::outlets::list_outlets).post(handlers::outlets::create_outlet),
        )
        .route(
            "/outlets/{id}",
            get(handlers::outlets::get_outlet)
                .put(handlers::outlets::update_outlet)
                .delete(handlers::outlets::delete_outlet),
        )
        .route(
            "/package-types",
            get(handlers::catalog::list_package_types).post(handlers::catalog::create_package_type),
        )
        .route(
            "/package-types/{id}",
            put(handlers::catalog::update_package_type)
                .delete(handlers::catalog::delete_package_type),
        )
        .route(
            "/packages",
            get(handlers::catalog::list_packages).post(handlers::catalog::create_package),
        )
        .route(
            "/packages/{id}",
            get(handlers::catalog::get_package)
                .put(handlers::catalog::update_package)
                .delete(handlers::catalog::delete_package),
        )
        .route(
            "/customers",
            get(handlers::crm::list_customers).post(handlers::crm::create_customer),
        )
        .route(
            "/customers/{id}",
            get(handlers::crm::get_customer)
                .put(handlers::crm::update_customer)
                .delete(handlers::crm::delete_customer),
        )
        .route(
            "/transactions",
            get(handlers::transactions::list_transactions)
                .post(handlers::transactions::create_transaction),
        )
        .route(
            "/transactions/{id}",
            get(handlers::transactions::get_transaction)
                .delete(handlers::transactions::delete_transaction),
        )
        .route(
            "/transactions/{id}/status",
            patch(handlers::transactions::update_status),
        )
        .route(
            "/transactions/{id}/pay",
            post(handlers::transactions::pay_transaction),
        )
        .route(
            "/calculate-shipping",
            post(handlers::shipping::calculate_shipping),
        )
        .route(
            "/reports/transactions",
            get(handlers::reports::transaction_report),
        )
        .route(
            "/reports/transactions/export",
            get(handlers::reports::export_transactions),
        )
        .route("/dashboard/summary", get(handlers::dashboard::get_summary))
        .layer(axum_middleware::from_fn(outlet_guard))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let api_routes = Router::new()
        .route("/health", get(|| async { "OK" }))
        .nest("/auth", auth_routes)
        .merge(account_routes)
        .merge(scoped_routes);

    // Combina tudo no router principal
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api", api_routes)
        .with_state(app_state)
}
