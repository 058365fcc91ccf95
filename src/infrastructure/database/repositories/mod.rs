//! SeaORM repository implementations

pub mod booking_repository;
pub mod room_repository;
pub mod user_repository;

pub use booking_repository::SeaOrmBookingRepository;
pub use room_repository::SeaOrmRoomRepository;
pub use user_repository::SeaOrmUserRepository;
