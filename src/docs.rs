// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::login,
        handlers::auth::get_me,

        // --- Users ---
        handlers::users::list_users,
        handlers::users::get_user,
        handlers::users::create_user,
        handlers::users::update_user,
        handlers::users::delete_user,

        // --- RBAC ---
        handlers::rbac::list_permissions,
        handlers::rbac::list_roles,

        // --- Outlets ---
        handlers::outlets::list_outlets,
        handlers::outlets::get_outlet,
        handlers::outlets::create_outlet,
        handlers::outlets::update_outlet,
        handlers::outlets::delete_outlet,

        // --- Catalog ---
        handlers::catalog::list_package_types,
        handlers::catalog::create_package_type,
        handlers::catalog::update_package_type,
        handlers::catalog::delete_package_type,
        handlers::catalog::list_packages,
        handlers::catalog::get_package,
        handlers::catalog::create_package,
        handlers::catalog::update_package,
        handlers::catalog::delete_package,

        // --- Customers ---
        handlers::crm::list_customers,
        handlers::crm::get_customer,
        handlers::crm::create_customer,
        handlers::crm::update_customer,
        handlers::crm::delete_customer,

        // --- Transactions ---
        handlers::transactions::create_transaction,
        handlers::transactions::list_transactions,
        handlers::transactions::get_transaction,
        handlers::transactions::update_status,
        handlers::transactions::pay_transaction,
        handlers::transactions::delete_transaction,

        // --- Shipping ---
        handlers::shipping::calculate_shipping,

        // --- Reports ---
        handlers::reports::transaction_report,
        handlers::reports::export_transactions,

        // --- Dashboard ---
        handlers::dashboard::get_summary,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::User,
            models::auth::Actor,
            models::auth::MeResponse,
            models::auth::LoginUserPayload,
            models::auth::CreateUserPayload,
            models::auth::UpdateUserPayload,
            models::auth::AuthResponse,

            // --- RBAC ---
            models::rbac::Role,
            models::rbac::PermissionInfo,
            models::rbac::RoleResponse,

            // --- Outlets ---
            models::outlet::Outlet,
            models::outlet::OutletPayload,

            // --- Catalog ---
            models::catalog::PackageUnit,
            models::catalog::PackageType,
            models::catalog::PackageTypePayload,
            models::catalog::Package,
            models::catalog::PackagePayload,

            // --- Customers ---
            models::crm::Gender,
            models::crm::Customer,
            models::crm::CustomerPayload,

            // --- Transactions ---
            models::transaction::TransactionStatus,
            models::transaction::PaymentStatus,
            models::transaction::Transaction,
            models::transaction::TransactionItem,
            models::transaction::TransactionDetail,
            models::transaction::TransactionItemPayload,
            models::transaction::CreateTransactionPayload,
            models::transaction::UpdateStatusPayload,

            // --- Shipping ---
            models::shipping::ShippingRequest,
            models::shipping::ShippingQuote,

            // --- Reports / Dashboard ---
            models::report::ReportRow,
            models::report::ReportSummary,
            models::report::TransactionReport,
            models::dashboard::DashboardSummary,
        )
    ),
    tags(
        (name = "Auth", description = "Login e perfil do usuário"),
        (name = "Users", description = "Gestão de usuários (admin)"),
        (name = "RBAC", description = "Cargos e permissões"),
        (name = "Outlets", description = "Outlets e tarifa por km"),
        (name = "Catalog", description = "Jenis paket e paket"),
        (name = "Customers", description = "Pelanggan"),
        (name = "Transactions", description = "Transações, status e pagamento"),
        (name = "Shipping", description = "Cálculo de frete (Haversine)"),
        (name = "Reports", description = "Relatório e exportação .xlsx"),
        (name = "Dashboard", description = "Indicadores do dia")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_core_routes() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/calculate-shipping",
            "/api/reports/transactions/export",
            "/api/transactions/{id}/status",
            "/api/users/me",
        ] {
            assert!(doc.paths.paths.contains_key(path), "rota ausente: {path}");
        }
    }
}
