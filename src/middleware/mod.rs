pub mod auth;
pub mod outlet;
pub mod rbac;
