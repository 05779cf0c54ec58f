pub mod auth;
pub mod usage_log;
