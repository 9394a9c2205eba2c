// src/services/rbac_service.rs

use std::sync::Arc;

use crate::models::{
    auth::Actor,
    rbac::{Permission, PermissionCatalog, PermissionInfo, Role, RoleResponse},
};

#[derive(Clone)]
pub struct RbacService {
    catalog: Arc<PermissionCatalog>,
}

impl RbacService {
    pub fn new(catalog: Arc<PermissionCatalog>) -> Self {
        Self { catalog }
    }

    pub fn list_system_permissions(&self) -> Vec<PermissionInfo> {
        Permission::ALL.into_iter().map(PermissionInfo::from).collect()
    }

    pub fn list_roles(&self) -> Vec<RoleResponse> {
        Role::ALL.into_iter().map(|role| self.role_response(role)).collect()
    }

    /// Permissões efetivas do ator (união dos cargos), ordenadas e sem repetição.
    pub fn permissions_of_actor(&self, actor: &Actor) -> Vec<String> {
        let mut perms: Vec<Permission> = actor
            .roles
            .iter()
            .flat_map(|role| self.catalog.permissions_of(*role))
            .collect();
        perms.sort();
        perms.dedup();
        perms.into_iter().map(|p| p.slug().to_string()).collect()
    }

    fn role_response(&self, role: Role) -> RoleResponse {
        RoleResponse {
            role,
            permissions: self
                .catalog
                .permissions_of(role)
                .into_iter()
                .map(|p| p.slug().to_string())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn service() -> RbacService {
        RbacService::new(Arc::new(PermissionCatalog::load()))
    }

    #[test]
    fn lists_every_permission_once() {
        let perms = service().list_system_permissions();
        assert_eq!(perms.len(), Permission::ALL.len());
        assert!(perms.iter().any(|p| p.slug == "laporan.export" && p.module == "laporan"));
    }

    #[test]
    fn roles_listing_covers_all_roles() {
        let roles = service().list_roles();
        assert_eq!(roles.len(), 3);
        let admin = roles.iter().find(|r| r.role == Role::Admin).unwrap();
        assert_eq!(admin.permissions.len(), Permission::ALL.len());
    }

    #[test]
    fn actor_permissions_are_the_union_of_roles() {
        let actor = Actor::new(Uuid::new_v4(), vec![Role::Kasir, Role::Owner], Some(Uuid::new_v4()));
        let perms = service().permissions_of_actor(&actor);
        assert!(perms.contains(&"transaksi.create".to_string()));
        assert!(perms.contains(&"laporan.export".to_string()));
        assert!(!perms.contains(&"outlet.delete".to_string()));
        let mut deduped = perms.clone();
        deduped.dedup();
        assert_eq!(perms, deduped);
    }
}
