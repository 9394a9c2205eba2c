// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::models::transaction::TransactionStatus;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("{0}")]
    BadRequest(String),

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    // 403: o ator está autenticado, mas não pode fazer isso
    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    UniqueConstraintViolation(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Transição de status inválida: {from:?} -> {to:?}")]
    InvalidStatusTransition {
        from: TransactionStatus,
        to: TransactionStatus,
    },

    // O recurso existe, mas não está configurado para a operação
    #[error("{0}")]
    Precondition(String),

    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),

    #[error("Erro ao gerar planilha: {0}")]
    ExportError(#[from] rust_xlsxwriter::XlsxError),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials | AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            AppError::Unauthorized(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::UniqueConstraintViolation(_)
            | AppError::Conflict(_)
            | AppError::InvalidStatusTransition { .. } => StatusCode::CONFLICT,
            AppError::Precondition(_) => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let error_message = match self {
            // Retorna todos os detalhes da validação.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Data yang dikirim tidak valid.",
                    "details": details,
                }));
                return (status, body).into_response();
            }
            AppError::InvalidCredentials => "Email atau password salah.".to_string(),
            AppError::InvalidToken => "Token autentikasi tidak valid atau tidak ada.".to_string(),
            AppError::InvalidStatusTransition { from, to } => format!(
                "Status tidak dapat diubah dari {} ke {}.",
                from.label(),
                to.label()
            ),
            AppError::BadRequest(msg)
            | AppError::Unauthorized(msg)
            | AppError::NotFound(msg)
            | AppError::UniqueConstraintViolation(msg)
            | AppError::Conflict(msg)
            | AppError::Precondition(msg) => msg,

            // Todos os outros erros viram 500; o detalhe só vai para o log.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {:?}", e);
                "Terjadi kesalahan pada server.".to_string()
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
