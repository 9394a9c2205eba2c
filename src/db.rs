pub mod user_repo;
pub use user_repo::UserRepository;
pub mod outlet_repo;
pub use outlet_repo::OutletRepository;
pub mod catalog_repo;
pub use catalog_repo::CatalogRepository;
pub mod crm_repo;
pub use crm_repo::CrmRepository;
pub mod transaction_repo;
pub use transaction_repo::TransactionRepository;
pub mod report_repo;
pub use report_repo::ReportRepository;
pub mod dashboard_repo;
pub use dashboard_repo::DashboardRepository;
