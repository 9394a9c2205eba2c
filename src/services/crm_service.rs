// src/services/crm_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::CrmRepository,
    models::crm::{Customer, CustomerFilter, CustomerPayload},
};

// Clientes são globais: qualquer outlet atende qualquer pelanggan.
#[derive(Clone)]
pub struct CrmService {
    repo: CrmRepository,
    pool: PgPool,
}

impl CrmService {
    pub fn new(repo: CrmRepository, pool: PgPool) -> Self {
        Self { repo, pool }
    }

    pub async fn list_customers(&self, filter: &CustomerFilter) -> Result<Vec<Customer>, AppError> {
        self.repo.list_customers(filter).await
    }

    pub async fn get_customer(&self, id: Uuid) -> Result<Customer, AppError> {
        self.repo
            .find_customer(&self.pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Pelanggan tidak ditemukan.".to_string()))
    }

    pub async fn create_customer(&self, payload: &CustomerPayload) -> Result<Customer, AppError> {
        let customer = self.repo.create_customer(payload).await?;
        tracing::info!(customer_id = %customer.id, "pelanggan cadastrado");
        Ok(customer)
    }

    pub async fn update_customer(&self, id: Uuid, payload: &CustomerPayload) -> Result<Customer, AppError> {
        self.repo
            .update_customer(id, payload)
            .await?
            .ok_or_else(|| AppError::NotFound("Pelanggan tidak ditemukan.".to_string()))
    }

    pub async fn delete_customer(&self, id: Uuid) -> Result<(), AppError> {
        if !self.repo.delete_customer(id).await? {
            return Err(AppError::NotFound("Pelanggan tidak ditemukan.".to_string()));
        }
        Ok(())
    }
}
