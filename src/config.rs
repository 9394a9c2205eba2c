// src/config.rs

use std::{env, sync::Arc, time::Duration};

use anyhow::Context;
use chrono::FixedOffset;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    db::{
        CatalogRepository, CrmRepository, DashboardRepository, OutletRepository, ReportRepository,
        TransactionRepository, UserRepository,
    },
    models::rbac::PermissionCatalog,
    services::{
        auth::AuthService, catalog_service::CatalogService, crm_service::CrmService,
        dashboard_service::DashboardService, outlet_service::OutletService,
        rbac_service::RbacService, report_service::ReportService,
        shipping_service::ShippingService, transaction_service::TransactionService,
        user_service::UserService,
    },
};

const DEFAULT_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_TOKEN_TTL_HOURS: i64 = 168;
// WIB
const DEFAULT_REPORT_UTC_OFFSET_HOURS: i32 = 7;

/// Configuração lida do ambiente (e do `.env`, se existir).
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub app_addr: String,
    pub db_max_connections: u32,
    pub jwt_ttl_hours: i64,
    pub report_utc_offset: FixedOffset,
    /// (nome, email, senha) do admin inicial, quando `ADMIN_EMAIL` e `ADMIN_PASSWORD` existem.
    pub bootstrap_admin: Option<(String, String, String)>,
}

fn var_or<T>(name: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{name} inválida: {raw:?}")),
        Err(_) => Ok(default),
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL deve ser definida")?;
        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET deve ser definido")?;
        if jwt_secret.trim().is_empty() {
            anyhow::bail!("JWT_SECRET não pode ser vazio");
        }

        let offset_hours: i32 = var_or("REPORT_UTC_OFFSET_HOURS", DEFAULT_REPORT_UTC_OFFSET_HOURS)?;
        let report_utc_offset = FixedOffset::east_opt(offset_hours * 3600)
            .with_context(|| format!("REPORT_UTC_OFFSET_HOURS fora da faixa: {offset_hours}"))?;

        let bootstrap_admin = match (env::var("ADMIN_EMAIL"), env::var("ADMIN_PASSWORD")) {
            (Ok(email), Ok(password)) => {
                let name = env::var("ADMIN_NAME").unwrap_or_else(|_| "Administrator".to_string());
                Some((name, email, password))
            }
            _ => None,
        };

        Ok(Self {
            database_url,
            jwt_secret,
            app_addr: env::var("APP_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string()),
            db_max_connections: var_or("DB_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?,
            jwt_ttl_hours: var_or("JWT_TTL_HOURS", DEFAULT_TOKEN_TTL_HOURS)?,
            report_utc_offset,
            bootstrap_admin,
        })
    }
}

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub config: Arc<Config>,
    pub catalog: Arc<PermissionCatalog>,

    pub auth_service: AuthService,
    pub user_service: UserService,
    pub outlet_service: OutletService,
    pub catalog_service: CatalogService,
    pub crm_service: CrmService,
    pub transaction_service: TransactionService,
    pub shipping_service: ShippingService,
    pub report_service: ReportService,
    pub dashboard_service: DashboardService,
    pub rbac_service: RbacService,
}

impl AppState {
    /// Conecta ao banco e monta o estado.
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let db_pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&config.database_url)
            .await
            .context("Falha ao conectar ao banco de dados")?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        Ok(Self::from_pool(db_pool, config))
    }

    /// Monta o gráfico de dependências sobre um pool já existente.
    pub fn from_pool(db_pool: PgPool, config: Config) -> Self {
        let catalog = Arc::new(PermissionCatalog::load());

        // --- Repositórios ---
        let user_repo = UserRepository::new(db_pool.clone());
        let outlet_repo = OutletRepository::new(db_pool.clone());
        let catalog_repo = CatalogRepository::new(db_pool.clone());
        let crm_repo = CrmRepository::new(db_pool.clone());
        let transaction_repo = TransactionRepository::new(db_pool.clone());
        let report_repo = ReportRepository::new(db_pool.clone());
        let dashboard_repo = DashboardRepository::new(db_pool.clone());

        // --- Serviços ---
        let auth_service = AuthService::new(
            user_repo.clone(),
            config.jwt_secret.clone(),
            config.jwt_ttl_hours,
        );
        let user_service = UserService::new(user_repo, outlet_repo.clone());
        let outlet_service = OutletService::new(outlet_repo.clone());
        let catalog_service = CatalogService::new(catalog_repo.clone(), outlet_repo.clone());
        let crm_service = CrmService::new(crm_repo.clone(), db_pool.clone());
        let transaction_service = TransactionService::new(
            transaction_repo,
            catalog_repo,
            crm_repo,
            outlet_repo.clone(),
            db_pool.clone(),
            config.report_utc_offset,
        );
        let shipping_service = ShippingService::new(outlet_repo.clone());
        let report_service =
            ReportService::new(report_repo, outlet_repo, config.report_utc_offset);
        let dashboard_service = DashboardService::new(dashboard_repo, config.report_utc_offset);
        let rbac_service = RbacService::new(catalog.clone());

        Self {
            db_pool,
            config: Arc::new(config),
            catalog,
            auth_service,
            user_service,
            outlet_service,
            catalog_service,
            crm_service,
            transaction_service,
            shipping_service,
            report_service,
            dashboard_service,
            rbac_service,
        }
    }
}
