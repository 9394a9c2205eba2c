// src/middleware/rbac.rs

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use std::marker::PhantomData;

use crate::{
    common::error::AppError,
    config::AppState,
    models::{auth::Actor, rbac::Permission},
    services::access_control::authorize_permission,
};

/// 1. O Trait que define o que é uma Permissão
pub trait PermissionDef: Send + Sync + 'static {
    fn permission() -> Permission;
}

/// 2. O Extractor (Guardião). Se passar, entrega o ator ao handler.
pub struct RequirePermission<T> {
    pub actor: Actor,
    _perm: PhantomData<T>,
}

// 3. Implementação do FromRequestParts
impl<T, S> FromRequestParts<S> for RequirePermission<T>
where
    T: PermissionDef,
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        // A. Extrai o ator colocado pelo auth_guard
        let actor = parts
            .extensions
            .get::<Actor>()
            .cloned()
            .ok_or(AppError::InvalidToken)?;

        // B. Consulta o catálogo estático (sem ida ao banco)
        authorize_permission(&app_state.catalog, &actor, T::permission())?;

        Ok(RequirePermission {
            actor,
            _perm: PhantomData,
        })
    }
}

// ---
// DEFINIÇÃO DAS PERMISSÕES (TIPOS)
// ---

pub struct PermOutletView;
impl PermissionDef for PermOutletView {
    fn permission() -> Permission { Permission::OutletView }
}

pub struct PermOutletCreate;
impl PermissionDef for PermOutletCreate {
    fn permission() -> Permission { Permission::OutletCreate }
}

pub struct PermOutletEdit;
impl PermissionDef for PermOutletEdit {
    fn permission() -> Permission { Permission::OutletEdit }
}

pub struct PermOutletDelete;
impl PermissionDef for PermOutletDelete {
    fn permission() -> Permission { Permission::OutletDelete }
}

pub struct PermPackageTypeView;
impl PermissionDef for PermPackageTypeView {
    fn permission() -> Permission { Permission::PackageTypeView }
}

pub struct PermPackageTypeCreate;
impl PermissionDef for PermPackageTypeCreate {
    fn permission() -> Permission { Permission::PackageTypeCreate }
}

pub struct PermPackageTypeEdit;
impl PermissionDef for PermPackageTypeEdit {
    fn permission() -> Permission { Permission::PackageTypeEdit }
}

pub struct PermPackageTypeDelete;
impl PermissionDef for PermPackageTypeDelete {
    fn permission() -> Permission { Permission::PackageTypeDelete }
}

pub struct PermPackageView;
impl PermissionDef for PermPackageView {
    fn permission() -> Permission { Permission::PackageView }
}

pub struct PermPackageCreate;
impl PermissionDef for PermPackageCreate {
    fn permission() -> Permission { Permission::PackageCreate }
}

pub struct PermPackageEdit;
impl PermissionDef for PermPackageEdit {
    fn permission() -> Permission { Permission::PackageEdit }
}

pub struct PermPackageDelete;
impl PermissionDef for PermPackageDelete {
    fn permission() -> Permission { Permission::PackageDelete }
}

pub struct PermCustomerView;
impl PermissionDef for PermCustomerView {
    fn permission() -> Permission { Permission::CustomerView }
}

pub struct PermCustomerCreate;
impl PermissionDef for PermCustomerCreate {
    fn permission() -> Permission { Permission::CustomerCreate }
}

pub struct PermCustomerEdit;
impl PermissionDef for PermCustomerEdit {
    fn permission() -> Permission { Permission::CustomerEdit }
}

pub struct PermCustomerDelete;
impl PermissionDef for PermCustomerDelete {
    fn permission() -> Permission { Permission::CustomerDelete }
}

pub struct PermTransactionView;
impl PermissionDef for PermTransactionView {
    fn permission() -> Permission { Permission::TransactionView }
}

pub struct PermTransactionCreate;
impl PermissionDef for PermTransactionCreate {
    fn permission() -> Permission { Permission::TransactionCreate }
}

pub struct PermTransactionEdit;
impl PermissionDef for PermTransactionEdit {
    fn permission() -> Permission { Permission::TransactionEdit }
}

pub struct PermTransactionDelete;
impl PermissionDef for PermTransactionDelete {
    fn permission() -> Permission { Permission::TransactionDelete }
}

pub struct PermReportView;
impl PermissionDef for PermReportView {
    fn permission() -> Permission { Permission::ReportView }
}

pub struct PermReportExport;
impl PermissionDef for PermReportExport {
    fn permission() -> Permission { Permission::ReportExport }
}

pub struct PermUserView;
impl PermissionDef for PermUserView {
    fn permission() -> Permission { Permission::UserView }
}

pub struct PermUserCreate;
impl PermissionDef for PermUserCreate {
    fn permission() -> Permission { Permission::UserCreate }
}

pub struct PermUserEdit;
impl PermissionDef for PermUserEdit {
    fn permission() -> Permission { Permission::UserEdit }
}

pub struct PermUserDelete;
impl PermissionDef for PermUserDelete {
    fn permission() -> Permission { Permission::UserDelete }
}

pub struct PermDashboardView;
impl PermissionDef for PermDashboardView {
    fn permission() -> Permission { Permission::DashboardView }
}
