pub mod database;
pub mod listeners;
pub mod password;
