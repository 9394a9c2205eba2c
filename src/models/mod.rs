pub mod auth;
pub mod catalog;
pub mod crm;
pub mod dashboard;
pub mod outlet;
pub mod rbac;
pub mod report;
pub mod shipping;
pub mod transaction;
