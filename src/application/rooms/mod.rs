//! Room management use-cases

pub mod service;

pub use service::{RoomService, RoomStats};
