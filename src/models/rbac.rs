// src/models/rbac.rs

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ---
// 1. Role (conjunto fechado)
// ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Kasir,
    Owner,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Kasir, Role::Owner];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Kasir => "kasir",
            Role::Owner => "owner",
        }
    }

    /// Permissões estáticas concedidas a cada cargo.
    fn grants(self) -> &'static [Permission] {
        use Permission::*;
        match self {
            Role::Admin => &Permission::ALL,
            Role::Kasir => &[
                OutletView,
                PackageTypeView,
                PackageView,
                CustomerView,
                CustomerCreate,
                CustomerEdit,
                TransactionView,
                TransactionCreate,
                TransactionEdit,
                ReportView,
                ReportExport,
                DashboardView,
            ],
            // Owner só lê: visibilidade global igual ao admin, mas sem escrita.
            Role::Owner => &[
                OutletView,
                PackageTypeView,
                PackageView,
                TransactionView,
                ReportView,
                ReportExport,
                DashboardView,
            ],
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("cargo desconhecido: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "kasir" => Ok(Role::Kasir),
            "owner" => Ok(Role::Owner),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

// ---
// 2. Permission (catálogo estático)
// ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Permission {
    OutletView,
    OutletCreate,
    OutletEdit,
    OutletDelete,
    PackageTypeView,
    PackageTypeCreate,
    PackageTypeEdit,
    PackageTypeDelete,
    PackageView,
    PackageCreate,
    PackageEdit,
    PackageDelete,
    CustomerView,
    CustomerCreate,
    CustomerEdit,
    CustomerDelete,
    TransactionView,
    TransactionCreate,
    TransactionEdit,
    TransactionDelete,
    ReportView,
    ReportExport,
    UserView,
    UserCreate,
    UserEdit,
    UserDelete,
    DashboardView,
}

impl Permission {
    pub const ALL: [Permission; 27] = [
        Permission::OutletView,
        Permission::OutletCreate,
        Permission::OutletEdit,
        Permission::OutletDelete,
        Permission::PackageTypeView,
        Permission::PackageTypeCreate,
        Permission::PackageTypeEdit,
        Permission::PackageTypeDelete,
        Permission::PackageView,
        Permission::PackageCreate,
        Permission::PackageEdit,
        Permission::PackageDelete,
        Permission::CustomerView,
        Permission::CustomerCreate,
        Permission::CustomerEdit,
        Permission::CustomerDelete,
        Permission::TransactionView,
        Permission::TransactionCreate,
        Permission::TransactionEdit,
        Permission::TransactionDelete,
        Permission::ReportView,
        Permission::ReportExport,
        Permission::UserView,
        Permission::UserCreate,
        Permission::UserEdit,
        Permission::UserDelete,
        Permission::DashboardView,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            Permission::OutletView => "outlet.view",
            Permission::OutletCreate => "outlet.create",
            Permission::OutletEdit => "outlet.edit",
            Permission::OutletDelete => "outlet.delete",
            Permission::PackageTypeView => "jenis-paket.view",
            Permission::PackageTypeCreate => "jenis-paket.create",
            Permission::PackageTypeEdit => "jenis-paket.edit",
            Permission::PackageTypeDelete => "jenis-paket.delete",
            Permission::PackageView => "paket.view",
            Permission::PackageCreate => "paket.create",
            Permission::PackageEdit => "paket.edit",
            Permission::PackageDelete => "paket.delete",
            Permission::CustomerView => "pelanggan.view",
            Permission::CustomerCreate => "pelanggan.create",
            Permission::CustomerEdit => "pelanggan.edit",
            Permission::CustomerDelete => "pelanggan.delete",
            Permission::TransactionView => "transaksi.view",
            Permission::TransactionCreate => "transaksi.create",
            Permission::TransactionEdit => "transaksi.edit",
            Permission::TransactionDelete => "transaksi.delete",
            Permission::ReportView => "laporan.view",
            Permission::ReportExport => "laporan.export",
            Permission::UserView => "user.view",
            Permission::UserCreate => "user.create",
            Permission::UserEdit => "user.edit",
            Permission::UserDelete => "user.delete",
            Permission::DashboardView => "dashboard.view",
        }
    }

    /// Módulo ao qual a permissão pertence (prefixo do slug).
    pub fn module(self) -> &'static str {
        let slug = self.slug();
        slug.split('.').next().unwrap_or(slug)
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

// ---
// 3. Catálogo imutável (montado uma vez na inicialização)
// ---
#[derive(Debug, Clone)]
pub struct PermissionCatalog {
    grants: HashMap<Role, HashSet<Permission>>,
}

impl PermissionCatalog {
    pub fn load() -> Self {
        let grants = Role::ALL
            .into_iter()
            .map(|role| (role, role.grants().iter().copied().collect()))
            .collect();
        Self { grants }
    }

    pub fn role_grants(&self, role: Role, permission: Permission) -> bool {
        self.grants
            .get(&role)
            .is_some_and(|perms| perms.contains(&permission))
    }

    pub fn permissions_of(&self, role: Role) -> Vec<Permission> {
        let mut perms: Vec<Permission> = self
            .grants
            .get(&role)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default();
        perms.sort();
        perms
    }
}

impl Default for PermissionCatalog {
    fn default() -> Self {
        Self::load()
    }
}

// O que sai na API (GET /api/permissions)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PermissionInfo {
    #[schema(example = "transaksi.view")]
    pub slug: String,
    #[schema(example = "transaksi")]
    pub module: String,
}

impl From<Permission> for PermissionInfo {
    fn from(p: Permission) -> Self {
        Self {
            slug: p.slug().to_string(),
            module: p.module().to_string(),
        }
    }
}

// Resposta completa (Cargo + Lista de Permissões)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoleResponse {
    pub role: Role,
    pub permissions: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugs_are_unique() {
        let slugs: HashSet<&str> = Permission::ALL.iter().map(|p| p.slug()).collect();
        assert_eq!(slugs.len(), Permission::ALL.len());
        assert_eq!(Permission::TransactionView.slug(), "transaksi.view");
    }

    #[test]
    fn unknown_role_string_is_rejected() {
        assert_eq!("kasir".parse::<Role>().unwrap(), Role::Kasir);
        assert!("Admin".parse::<Role>().is_err());
        assert!("superuser".parse::<Role>().is_err());
    }

    #[test]
    fn admin_holds_every_permission() {
        let catalog = PermissionCatalog::load();
        for p in Permission::ALL {
            assert!(catalog.role_grants(Role::Admin, p), "admin sem {p}");
        }
    }

    #[test]
    fn owner_is_read_only() {
        let catalog = PermissionCatalog::load();
        assert!(catalog.role_grants(Role::Owner, Permission::ReportExport));
        assert!(catalog.role_grants(Role::Owner, Permission::OutletView));
        assert!(!catalog.role_grants(Role::Owner, Permission::OutletCreate));
        assert!(!catalog.role_grants(Role::Owner, Permission::TransactionCreate));
    }

    #[test]
    fn kasir_cannot_manage_outlets_or_users() {
        let catalog = PermissionCatalog::load();
        assert!(catalog.role_grants(Role::Kasir, Permission::TransactionCreate));
        assert!(!catalog.role_grants(Role::Kasir, Permission::OutletEdit));
        assert!(!catalog.role_grants(Role::Kasir, Permission::UserCreate));
        assert!(!catalog.role_grants(Role::Kasir, Permission::TransactionDelete));
    }

    #[test]
    fn module_is_slug_prefix() {
        assert_eq!(Permission::PackageTypeEdit.module(), "jenis-paket");
        assert_eq!(Permission::DashboardView.module(), "dashboard");
    }
}
