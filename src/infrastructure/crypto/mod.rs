//! Cryptographic helpers: password hashing and JWT handling

pub mod jwt;
pub mod password;
