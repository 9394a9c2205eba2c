pub mod auth;
pub mod catalog;
pub mod crm;
pub mod dashboard;
pub mod outlets;
pub mod rbac;
pub mod reports;
pub mod shipping;
pub mod transactions;
pub mod users;
