#![allow(dead_code)]

use chrono::FixedOffset;
use laundry_pos::config::{AppState, Config};
use sqlx::{postgres::PgPoolOptions, PgPool};

pub fn test_config() -> Config {
    Config {
        database_url: "postgres://localhost/laundry_test".into(),
        jwt_secret: "segredo-de-teste".into(),
        app_addr: "127.0.0.1:0".into(),
        db_max_connections: 1,
        jwt_ttl_hours: 1,
        report_utc_offset: FixedOffset::east_opt(7 * 3600).unwrap(),
        bootstrap_admin: None,
    }
}

/// Estado completo sobre um pool preguiçoso: nada aqui abre conexão.
pub fn lazy_state() -> AppState {
    let config = test_config();
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect_lazy(&config.database_url)
        .unwrap();
    AppState::from_pool(pool, config)
}

/// Estado sobre o banco descartável criado por `#[sqlx::test]`.
pub fn state_with_pool(pool: PgPool) -> AppState {
    AppState::from_pool(pool, test_config())
}
