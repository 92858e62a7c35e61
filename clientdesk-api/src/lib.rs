pub mod auth;
pub mod config;
pub mod database;
pub mod handlers;
pub mod helpers;
pub mod store;

pub use database::Database;
