//! Identity use-cases: authentication and user management

pub mod service;

pub use service::{AuthResult, CreateUserInput, IdentityService, UpdateUserInput};
