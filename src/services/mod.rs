pub mod access_control;
pub mod auth;
pub mod catalog_service;
pub mod crm_service;
pub mod dashboard_service;
pub mod outlet_service;
pub mod rbac_service;
pub mod report_service;
pub mod shipping_service;
pub mod transaction_service;
pub mod user_service;
