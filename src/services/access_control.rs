// src/services/access_control.rs

//! Verificações de acesso por cargo e por outlet.
//!
//! Tudo aqui é síncrono e sem efeitos colaterais: recebe o `Actor`
//! explicitamente e devolve `bool`, um conjunto de ids, ou `AppError::Unauthorized`.
//! Toda consulta restrita por outlet deve passar por [`OutletScope`].

use std::collections::HashSet;

use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        auth::Actor,
        rbac::{Permission, PermissionCatalog, Role},
    },
};

pub const KASIR_WITHOUT_OUTLET: &str = "Kasir harus ditugaskan ke outlet tertentu";

/// Quais outlets o ator enxerga.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutletScope {
    All,
    Only(Uuid),
    Nothing,
}

impl OutletScope {
    pub fn of(actor: &Actor) -> Self {
        if has_global_access(actor) {
            OutletScope::All
        } else {
            match actor.outlet_id {
                Some(id) => OutletScope::Only(id),
                None => OutletScope::Nothing,
            }
        }
    }

    pub fn contains(&self, outlet_id: Uuid) -> bool {
        match self {
            OutletScope::All => true,
            OutletScope::Only(id) => *id == outlet_id,
            OutletScope::Nothing => false,
        }
    }

    /// Filtro para `($n::uuid[] IS NULL OR outlet_id = ANY($n))`.
    /// `None` significa sem restrição.
    pub fn as_filter(&self) -> Option<Vec<Uuid>> {
        match self {
            OutletScope::All => None,
            OutletScope::Only(id) => Some(vec![*id]),
            OutletScope::Nothing => Some(Vec::new()),
        }
    }

    /// Combina o escopo com um outlet pedido explicitamente num filtro.
    /// Pedir um outlet fora do escopo é recusado, não ignorado.
    pub fn narrow(self, requested: Option<Uuid>) -> Result<Self, AppError> {
        match requested {
            None => Ok(self),
            Some(id) if self.contains(id) => Ok(OutletScope::Only(id)),
            Some(_) => Err(outlet_forbidden()),
        }
    }
}

pub fn is_authenticated(actor: Option<&Actor>) -> bool {
    actor.is_some()
}

pub fn has_role(actor: &Actor, roles: &[Role]) -> bool {
    actor.roles.iter().any(|r| roles.contains(r))
}

pub fn has_permission(catalog: &PermissionCatalog, actor: &Actor, permission: Permission) -> bool {
    actor
        .roles
        .iter()
        .any(|role| catalog.role_grants(*role, permission))
}

/// Admin ou owner sem outlet vinculado enxergam todos os outlets.
pub fn has_global_access(actor: &Actor) -> bool {
    has_role(actor, &[Role::Admin, Role::Owner]) && actor.outlet_id.is_none()
}

pub fn accessible_outlet_ids<I>(actor: &Actor, all_outlet_ids: I) -> HashSet<Uuid>
where
    I: IntoIterator<Item = Uuid>,
{
    match OutletScope::of(actor) {
        OutletScope::All => all_outlet_ids.into_iter().collect(),
        OutletScope::Only(id) => HashSet::from([id]),
        OutletScope::Nothing => HashSet::new(),
    }
}

pub fn authorize_role(actor: &Actor, roles: &[Role]) -> Result<(), AppError> {
    if has_role(actor, roles) {
        return Ok(());
    }
    let names: Vec<&str> = roles.iter().map(|r| r.as_str()).collect();
    Err(AppError::Unauthorized(format!(
        "Akses ditolak: memerlukan role {}.",
        names.join(" / ")
    )))
}

pub fn authorize_permission(
    catalog: &PermissionCatalog,
    actor: &Actor,
    permission: Permission,
) -> Result<(), AppError> {
    if has_permission(catalog, actor, permission) {
        return Ok(());
    }
    Err(AppError::Unauthorized(format!(
        "Akses ditolak: memerlukan izin '{}'.",
        permission.slug()
    )))
}

pub fn authorize_outlet(actor: &Actor, outlet_id: Uuid) -> Result<(), AppError> {
    if OutletScope::of(actor).contains(outlet_id) {
        Ok(())
    } else {
        Err(outlet_forbidden())
    }
}

/// Decisão do guard de requisição: admin e owner passam sempre;
/// kasir sem outlet é barrado antes de qualquer handler.
pub fn check_outlet_assignment(actor: &Actor) -> Result<(), AppError> {
    if has_role(actor, &[Role::Admin, Role::Owner]) {
        return Ok(());
    }
    if has_role(actor, &[Role::Kasir]) && actor.outlet_id.is_none() {
        return Err(AppError::Unauthorized(KASIR_WITHOUT_OUTLET.to_string()));
    }
    Ok(())
}

fn outlet_forbidden() -> AppError {
    AppError::Unauthorized("Anda tidak memiliki akses ke outlet ini.".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actor(roles: &[Role], outlet_id: Option<Uuid>) -> Actor {
        Actor::new(Uuid::new_v4(), roles.to_vec(), outlet_id)
    }

    #[test]
    fn authentication_is_presence_of_actor() {
        let a = actor(&[Role::Kasir], Some(Uuid::new_v4()));
        assert!(is_authenticated(Some(&a)));
        assert!(!is_authenticated(None));
    }

    #[test]
    fn has_role_matches_any_of_the_set() {
        let a = actor(&[Role::Kasir], None);
        assert!(has_role(&a, &[Role::Admin, Role::Kasir]));
        assert!(!has_role(&a, &[Role::Admin, Role::Owner]));
        assert!(!has_role(&a, &[]));
    }

    #[test]
    fn global_access_requires_admin_or_owner_without_outlet() {
        assert!(has_global_access(&actor(&[Role::Admin], None)));
        assert!(has_global_access(&actor(&[Role::Owner], None)));
        assert!(!has_global_access(&actor(&[Role::Admin], Some(Uuid::new_v4()))));
        assert!(!has_global_access(&actor(&[Role::Kasir], None)));
        assert!(!has_global_access(&actor(&[], None)));
    }

    #[test]
    fn admin_sees_every_outlet() {
        let ids = vec![Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4()];
        let visible = accessible_outlet_ids(&actor(&[Role::Admin], None), ids.clone());
        assert_eq!(visible, ids.into_iter().collect::<HashSet<_>>());
    }

    #[test]
    fn kasir_sees_only_own_outlet() {
        let own = Uuid::new_v4();
        let ids = vec![own, Uuid::new_v4()];
        let visible = accessible_outlet_ids(&actor(&[Role::Kasir], Some(own)), ids);
        assert_eq!(visible, HashSet::from([own]));
    }

    #[test]
    fn admin_bound_to_outlet_is_scoped_like_kasir() {
        let own = Uuid::new_v4();
        let visible = accessible_outlet_ids(&actor(&[Role::Admin], Some(own)), vec![own, Uuid::new_v4()]);
        assert_eq!(visible, HashSet::from([own]));
    }

    #[test]
    fn kasir_without_outlet_sees_nothing() {
        let visible = accessible_outlet_ids(&actor(&[Role::Kasir], None), vec![Uuid::new_v4()]);
        assert!(visible.is_empty());
        assert_eq!(OutletScope::of(&actor(&[Role::Kasir], None)).as_filter(), Some(vec![]));
    }

    #[test]
    fn permission_is_granted_by_any_role() {
        let catalog = PermissionCatalog::load();
        let kasir_owner = actor(&[Role::Kasir, Role::Owner], Some(Uuid::new_v4()));
        assert!(has_permission(&catalog, &kasir_owner, Permission::TransactionCreate));
        assert!(has_permission(&catalog, &kasir_owner, Permission::ReportExport));
        assert!(!has_permission(&catalog, &kasir_owner, Permission::OutletDelete));
    }

    #[test]
    fn authorize_permission_fails_with_unauthorized() {
        let catalog = PermissionCatalog::load();
        let owner = actor(&[Role::Owner], None);
        let err = authorize_permission(&catalog, &owner, Permission::OutletCreate).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(msg) if msg.contains("outlet.create")));
        assert!(authorize_permission(&catalog, &owner, Permission::OutletView).is_ok());
    }

    #[test]
    fn authorize_role_guards_operation() {
        let kasir = actor(&[Role::Kasir], Some(Uuid::new_v4()));
        assert!(authorize_role(&kasir, &[Role::Kasir]).is_ok());
        assert!(matches!(
            authorize_role(&kasir, &[Role::Admin]),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn authorize_outlet_respects_scope() {
        let own = Uuid::new_v4();
        let kasir = actor(&[Role::Kasir], Some(own));
        assert!(authorize_outlet(&kasir, own).is_ok());
        assert!(authorize_outlet(&kasir, Uuid::new_v4()).is_err());
        assert!(authorize_outlet(&actor(&[Role::Owner], None), Uuid::new_v4()).is_ok());
    }

    #[test]
    fn guard_lets_admin_and_owner_through_regardless_of_outlet() {
        assert!(check_outlet_assignment(&actor(&[Role::Admin], None)).is_ok());
        assert!(check_outlet_assignment(&actor(&[Role::Owner], None)).is_ok());
        assert!(check_outlet_assignment(&actor(&[Role::Owner], Some(Uuid::new_v4()))).is_ok());
        // Admin que também é kasir continua passando
        assert!(check_outlet_assignment(&actor(&[Role::Kasir, Role::Admin], None)).is_ok());
    }

    #[test]
    fn guard_rejects_kasir_without_outlet() {
        let err = check_outlet_assignment(&actor(&[Role::Kasir], None)).unwrap_err();
        match err {
            AppError::Unauthorized(msg) => assert_eq!(msg, KASIR_WITHOUT_OUTLET),
            other => panic!("erro inesperado: {other:?}"),
        }
        assert!(check_outlet_assignment(&actor(&[Role::Kasir], Some(Uuid::new_v4()))).is_ok());
    }

    #[test]
    fn narrowing_scope_to_foreign_outlet_is_refused() {
        let own = Uuid::new_v4();
        let scope = OutletScope::Only(own);
        assert_eq!(scope.narrow(None).unwrap(), scope);
        assert_eq!(scope.narrow(Some(own)).unwrap(), OutletScope::Only(own));
        assert!(scope.narrow(Some(Uuid::new_v4())).is_err());

        let other = Uuid::new_v4();
        assert_eq!(OutletScope::All.narrow(Some(other)).unwrap(), OutletScope::Only(other));
    }
}
