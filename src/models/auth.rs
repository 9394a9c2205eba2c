// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::rbac::Role;

// Representa um usuário vindo do banco de dados
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    #[schema(example = "Siti Kasir")]
    pub name: String,
    #[schema(example = "kasir@laundry.test")]
    pub email: String,

    #[serde(skip_serializing)] // IMPORTANTE para segurança
    #[schema(ignore)]
    pub password_hash: String,

    // Guardado como TEXT[]; convertido para `Role` ao montar o Actor
    #[schema(example = json!(["kasir"]))]
    pub roles: Vec<String>,

    pub outlet_id: Option<Uuid>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ---
// Actor: o usuário autenticado, passado explicitamente a cada verificação
// ---
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub roles: Vec<Role>,
    pub outlet_id: Option<Uuid>,
}

impl Actor {
    pub fn new(id: Uuid, roles: Vec<Role>, outlet_id: Option<Uuid>) -> Self {
        Self {
            id,
            name: String::new(),
            email: String::new(),
            roles,
            outlet_id,
        }
    }
}

impl From<&User> for Actor {
    fn from(user: &User) -> Self {
        let roles = user
            .roles
            .iter()
            .filter_map(|raw| match raw.parse::<Role>() {
                Ok(role) => Some(role),
                Err(e) => {
                    // Nunca conceder acesso por um cargo que não reconhecemos
                    tracing::warn!(user_id = %user.id, "{}", e);
                    None
                }
            })
            .collect();

        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            roles,
            outlet_id: user.outlet_id,
        }
    }
}

// Dados para login
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginUserPayload {
    #[validate(email(message = "Email tidak valid."))]
    #[schema(example = "admin@laundry.test")]
    pub email: String,
    #[validate(length(min = 6, message = "Password minimal 6 karakter."))]
    #[schema(example = "rahasia123")]
    pub password: String,
}

// Criação de usuário (somente admin)
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserPayload {
    #[validate(length(min = 1, message = "Nama wajib diisi."))]
    pub name: String,
    #[validate(email(message = "Email tidak valid."))]
    pub email: String,
    #[validate(length(min = 6, message = "Password minimal 6 karakter."))]
    pub password: String,
    #[validate(length(min = 1, message = "Minimal satu role."))]
    pub roles: Vec<Role>,
    pub outlet_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserPayload {
    #[validate(length(min = 1, message = "Nama wajib diisi."))]
    pub name: String,
    #[validate(email(message = "Email tidak valid."))]
    pub email: String,
    // Opcional: só troca a senha quando enviada
    #[validate(length(min = 6, message = "Password minimal 6 karakter."))]
    pub password: Option<String>,
    #[validate(length(min = 1, message = "Minimal satu role."))]
    pub roles: Vec<Role>,
    pub outlet_id: Option<Uuid>,
}

// Resposta de autenticação com o token
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
}

// GET /api/users/me: perfil do ator + permissões efetivas
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    #[serde(flatten)]
    pub actor: Actor,
    pub permissions: Vec<String>,
    // Todos os outlets para acesso global; só o próprio para quem é vinculado
    pub accessible_outlet_ids: Vec<Uuid>,
}

// Estrutura de dados ("claims") dentro do JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,  // Subject (ID do usuário)
    pub exp: usize, // Expiration time (quando o token expira)
    pub iat: usize, // Issued At (quando o token foi criado)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_with_roles(roles: &[&str]) -> User {
        User {
            id: Uuid::new_v4(),
            name: "Budi".into(),
            email: "budi@laundry.test".into(),
            password_hash: String::new(),
            roles: roles.iter().map(|r| r.to_string()).collect(),
            outlet_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn actor_keeps_known_roles_only() {
        let user = user_with_roles(&["kasir", "adm1n", "owner"]);
        let actor = Actor::from(&user);
        assert_eq!(actor.roles, vec![Role::Kasir, Role::Owner]);
        assert_eq!(actor.outlet_id, None);
    }
}
