//! External concerns: persistence and cryptography

pub mod crypto;
pub mod database;

pub use database::{init_database, DatabaseConfig};
