// src/services/auth.rs

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::UserRepository,
    models::auth::{Actor, Claims},
};

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    jwt_secret: String,
    token_ttl_hours: i64,
}

/// Hash bcrypt fora do runtime async.
pub async fn hash_password(password: &str) -> Result<String, AppError> {
    let password_clone = password.to_owned();
    let hashed = tokio::task::spawn_blocking(move || hash(&password_clone, bcrypt::DEFAULT_COST))
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;
    Ok(hashed)
}

impl AuthService {
    pub fn new(user_repo: UserRepository, jwt_secret: String, token_ttl_hours: i64) -> Self {
        Self { user_repo, jwt_secret, token_ttl_hours }
    }

    pub async fn login_user(&self, email: &str, password: &str) -> Result<String, AppError> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let password_clone = password.to_owned();
        let password_hash_clone = user.password_hash.clone();

        // Executa a verificação em um thread separado
        let is_password_valid = tokio::task::spawn_blocking(move || {
            verify(&password_clone, &password_hash_clone)
        })
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !is_password_valid {
            tracing::info!(%email, "login recusado");
            return Err(AppError::InvalidCredentials);
        }

        tracing::info!(user_id = %user.id, "login efetuado");
        self.create_token(user.id)
    }

    /// Valida o JWT e monta o Actor a partir do usuário atual no banco,
    /// para que mudanças de cargo/outlet valham na próxima requisição.
    pub async fn validate_token(&self, token: &str) -> Result<Actor, AppError> {
        let claims = self.decode_token(token)?;

        let user = self
            .user_repo
            .find_by_id(claims.sub)
            .await?
            .ok_or(AppError::InvalidToken)?;

        Ok(Actor::from(&user))
    }

    pub fn decode_token(&self, token: &str) -> Result<Claims, AppError> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &Validation::default(),
        )
        .map_err(|_| AppError::InvalidToken)?;
        Ok(token_data.claims)
    }

    pub fn create_token(&self, user_id: Uuid) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::hours(self.token_ttl_hours);

        let claims = Claims {
            sub: user_id,
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::postgres::PgPoolOptions;

    fn service(secret: &str, ttl_hours: i64) -> AuthService {
        // Pool preguiçoso: nenhum teste aqui toca no banco
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/laundry_test")
            .expect("url válida");
        AuthService::new(UserRepository::new(pool), secret.to_string(), ttl_hours)
    }

    #[tokio::test]
    async fn token_round_trips_subject() {
        let svc = service("segredo", 1);
        let user_id = Uuid::new_v4();
        let token = svc.create_token(user_id).unwrap();
        let claims = svc.decode_token(&token).unwrap();
        assert_eq!(claims.sub, user_id);
        assert!(claims.exp > claims.iat);
    }

    #[tokio::test]
    async fn token_signed_with_other_secret_is_rejected() {
        let token = service("segredo-a", 1).create_token(Uuid::new_v4()).unwrap();
        let err = service("segredo-b", 1).decode_token(&token).unwrap_err();
        assert!(matches!(err, AppError::InvalidToken));
    }

    #[tokio::test]
    async fn expired_token_is_rejected() {
        let svc = service("segredo", -2);
        let token = svc.create_token(Uuid::new_v4()).unwrap();
        assert!(matches!(svc.decode_token(&token), Err(AppError::InvalidToken)));
    }

    #[tokio::test]
    async fn hashed_password_verifies() {
        let hashed = hash_password("rahasia123").await.unwrap();
        assert!(verify("rahasia123", &hashed).unwrap());
        assert!(!verify("salah", &hashed).unwrap());
    }
}
