// src/services/outlet_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::OutletRepository,
    models::{auth::Actor, outlet::{Outlet, OutletPayload}},
    services::access_control::{self, OutletScope},
};

#[derive(Clone)]
pub struct OutletService {
    repo: OutletRepository,
}

impl OutletService {
    pub fn new(repo: OutletRepository) -> Self {
        Self { repo }
    }

    pub async fn list_outlets(&self, actor: &Actor) -> Result<Vec<Outlet>, AppError> {
        self.repo.list(OutletScope::of(actor).as_filter()).await
    }

    /// Ids que o ator enxerga (todos, para acesso global).
    pub async fn accessible_outlet_ids(&self, actor: &Actor) -> Result<Vec<Uuid>, AppError> {
        let all_ids = match OutletScope::of(actor) {
            OutletScope::All => self.repo.all_ids().await?,
            _ => Vec::new(),
        };
        let mut ids: Vec<Uuid> = access_control::accessible_outlet_ids(actor, all_ids)
            .into_iter()
            .collect();
        ids.sort();
        Ok(ids)
    }

    pub async fn get_outlet(&self, actor: &Actor, id: Uuid) -> Result<Outlet, AppError> {
        access_control::authorize_outlet(actor, id)?;
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Outlet tidak ditemukan.".to_string()))
    }

    pub async fn create_outlet(&self, payload: &OutletPayload) -> Result<Outlet, AppError> {
        let outlet = self.repo.create(payload).await?;
        tracing::info!(outlet_id = %outlet.id, name = %outlet.name, "outlet criado");
        Ok(outlet)
    }

    pub async fn update_outlet(&self, actor: &Actor, id: Uuid, payload: &OutletPayload) -> Result<Outlet, AppError> {
        access_control::authorize_outlet(actor, id)?;
        self.repo
            .update(id, payload)
            .await?
            .ok_or_else(|| AppError::NotFound("Outlet tidak ditemukan.".to_string()))
    }

    pub async fn delete_outlet(&self, actor: &Actor, id: Uuid) -> Result<(), AppError> {
        access_control::authorize_outlet(actor, id)?;
        if !self.repo.delete(id).await? {
            return Err(AppError::NotFound("Outlet tidak ditemukan.".to_string()));
        }
        tracing::info!(outlet_id = %id, "outlet removido");
        Ok(())
    }
}
