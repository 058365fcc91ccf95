//! # Roombook
//!
//! Conference room booking service with an approval workflow.
//! Employees submit bookings; administrators approve or reject them
//! and manage the room catalogue and user accounts.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core business entities, the booking lifecycle and
//!   repository traits
//! - **application**: Services carrying business rules and every
//!   authorization decision
//! - **infrastructure**: External concerns (SeaORM persistence,
//!   password hashing, JWT)
//! - **interfaces**: REST API with Swagger documentation

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;

pub use config::AppConfig;

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig};

// Re-export API router
pub use interfaces::http::create_api_router;
