//! User domain entity and repository interface

mod model;
mod repository;

pub use model::{Caller, NewUser, UpdateUserFields, User};
pub use repository::UserRepository;
