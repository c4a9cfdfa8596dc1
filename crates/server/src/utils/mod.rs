pub mod auth;
pub mod shutdown;
