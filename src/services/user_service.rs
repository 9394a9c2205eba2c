// src/services/user_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{OutletRepository, UserRepository},
    models::{
        auth::{CreateUserPayload, UpdateUserPayload, User},
        rbac::Role,
    },
    services::auth::hash_password,
};

#[derive(Clone)]
pub struct UserService {
    user_repo: UserRepository,
    outlet_repo: OutletRepository,
}

impl UserService {
    pub fn new(user_repo: UserRepository, outlet_repo: OutletRepository) -> Self {
        Self { user_repo, outlet_repo }
    }

    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        self.user_repo.list().await
    }

    pub async fn get_user(&self, id: Uuid) -> Result<User, AppError> {
        self.user_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("User tidak ditemukan.".to_string()))
    }

    // Um kasir sem outlet é aceito aqui; quem barra é o guard da requisição.
    pub async fn create_user(&self, payload: &CreateUserPayload) -> Result<User, AppError> {
        self.ensure_outlet_exists(payload.outlet_id).await?;

        let password_hash = hash_password(&payload.password).await?;
        let user = self
            .user_repo
            .create_user(
                &payload.name,
                &payload.email,
                &password_hash,
                &payload.roles,
                payload.outlet_id,
            )
            .await?;

        tracing::info!(user_id = %user.id, roles = ?payload.roles, "usuário criado");
        Ok(user)
    }

    pub async fn update_user(&self, id: Uuid, payload: &UpdateUserPayload) -> Result<User, AppError> {
        self.ensure_outlet_exists(payload.outlet_id).await?;

        let password_hash = match payload.password.as_deref() {
            Some(password) => Some(hash_password(password).await?),
            None => None,
        };

        self.user_repo
            .update_user(
                id,
                &payload.name,
                &payload.email,
                password_hash.as_deref(),
                &payload.roles,
                payload.outlet_id,
            )
            .await?
            .ok_or_else(|| AppError::NotFound("User tidak ditemukan.".to_string()))
    }

    pub async fn delete_user(&self, id: Uuid, acting_user: Uuid) -> Result<(), AppError> {
        if id == acting_user {
            return Err(AppError::BadRequest("Tidak dapat menghapus akun sendiri.".to_string()));
        }
        if !self.user_repo.delete_user(id).await? {
            return Err(AppError::NotFound("User tidak ditemukan.".to_string()));
        }
        Ok(())
    }

    /// Cria o primeiro admin (sem outlet) se o email ainda não existir.
    /// Devolve `true` quando criou.
    pub async fn bootstrap_admin(&self, name: &str, email: &str, password: &str) -> Result<bool, AppError> {
        if self.user_repo.find_by_email(email).await?.is_some() {
            return Ok(false);
        }

        let password_hash = hash_password(password).await?;
        let user = self
            .user_repo
            .create_user(name, email, &password_hash, &[Role::Admin], None)
            .await?;

        tracing::info!(user_id = %user.id, %email, "admin inicial criado");
        Ok(true)
    }

    async fn ensure_outlet_exists(&self, outlet_id: Option<Uuid>) -> Result<(), AppError> {
        if let Some(id) = outlet_id {
            if self.outlet_repo.find_by_id(id).await?.is_none() {
                return Err(AppError::NotFound("Outlet tidak ditemukan.".to_string()));
            }
        }
        Ok(())
    }
}
