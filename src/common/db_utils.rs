use crate::common::error::AppError;

// ---
// Helper: tradução de erros do Postgres
// ---
/// Converte violação de chave única em um erro amigável; o resto vira DatabaseError.
pub(crate) fn map_unique_violation(e: sqlx::Error, message: impl Into<String>) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            return AppError::UniqueConstraintViolation(message.into());
        }
    }
    e.into()
}

/// Violação de FK (ex.: excluir outlet que ainda tem transações).
pub(crate) fn map_fk_violation(e: sqlx::Error, message: impl Into<String>) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_foreign_key_violation() {
            return AppError::Precondition(message.into());
        }
    }
    e.into()
}
