// src/db/user_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::{db_utils::map_unique_violation, error::AppError},
    models::{auth::User, rbac::Role},
};

const USER_COLUMNS: &str =
    "id, name, email, password_hash, roles, outlet_id, created_at, updated_at";

fn role_strings(roles: &[Role]) -> Vec<String> {
    roles.iter().map(|r| r.as_str().to_string()).collect()
}

// O repositório de usuários, responsável por todas as interações com a tabela 'users'
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Busca um usuário pelo seu e-mail
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    // Busca um usuário pelo seu ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    pub async fn list(&self) -> Result<Vec<User>, AppError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users ORDER BY name ASC");
        let users = sqlx::query_as::<_, User>(&sql).fetch_all(&self.pool).await?;
        Ok(users)
    }

    // Cria um novo usuário no banco de dados
    pub async fn create_user(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
        roles: &[Role],
        outlet_id: Option<Uuid>,
    ) -> Result<User, AppError> {
        let sql = format!(
            "INSERT INTO users (name, email, password_hash, roles, outlet_id) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {USER_COLUMNS}"
        );
        sqlx::query_as::<_, User>(&sql)
            .bind(name)
            .bind(email)
            .bind(password_hash)
            .bind(role_strings(roles))
            .bind(outlet_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_unique_violation(e, "Email sudah digunakan."))
    }

    /// Atualiza dados; `password_hash = None` mantém a senha atual.
    pub async fn update_user(
        &self,
        id: Uuid,
        name: &str,
        email: &str,
        password_hash: Option<&str>,
        roles: &[Role],
        outlet_id: Option<Uuid>,
    ) -> Result<Option<User>, AppError> {
        let sql = format!(
            "UPDATE users SET name = $2, email = $3, \
                 password_hash = COALESCE($4, password_hash), \
                 roles = $5, outlet_id = $6, updated_at = NOW() \
             WHERE id = $1 RETURNING {USER_COLUMNS}"
        );
        sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .bind(name)
            .bind(email)
            .bind(password_hash)
            .bind(role_strings(roles))
            .bind(outlet_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_unique_violation(e, "Email sudah digunakan."))
    }

    pub async fn delete_user(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
