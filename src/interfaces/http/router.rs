//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{BookingService, IdentityService, RoomService};
use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::infrastructure::database::repositories::{
    SeaOrmBookingRepository, SeaOrmRoomRepository, SeaOrmUserRepository,
};
use crate::interfaces::http::common::ApiResponse;
use crate::interfaces::http::middleware::{auth_middleware, AuthState};
use crate::interfaces::http::modules::{auth, bookings, health, rooms, users};

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer token"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::handlers::health_check,
        // Auth
        auth::handlers::login,
        auth::handlers::register,
        auth::handlers::get_current_user,
        // Users
        users::handlers::list_users,
        users::handlers::get_user,
        users::handlers::create_user,
        users::handlers::update_user,
        users::handlers::delete_user,
        // Rooms
        rooms::handlers::list_rooms,
        rooms::handlers::get_room_stats,
        rooms::handlers::get_room,
        rooms::handlers::create_room,
        rooms::handlers::update_room,
        rooms::handlers::delete_room,
        // Bookings
        bookings::handlers::list_bookings,
        bookings::handlers::get_booking_stats,
        bookings::handlers::get_booking,
        bookings::handlers::create_booking,
        bookings::handlers::update_booking,
        bookings::handlers::approve_booking,
        bookings::handlers::reject_booking,
        bookings::handlers::delete_booking,
    ),
    components(
        schemas(
            // Common
            ApiResponse<String>,
            // Health
            health::handlers::HealthResponse,
            health::handlers::ComponentHealth,
            // Auth
            auth::dto::LoginRequest,
            auth::dto::LoginResponse,
            auth::dto::RegisterRequest,
            // Users
            users::dto::UserDto,
            users::dto::CreateUserRequest,
            users::dto::UpdateUserRequest,
            // Rooms
            rooms::dto::RoomDto,
            rooms::dto::CreateRoomRequest,
            rooms::dto::UpdateRoomRequest,
            rooms::dto::RoomStatsDto,
            // Bookings
            bookings::dto::BookingDto,
            bookings::dto::CreateBookingRequest,
            bookings::dto::UpdateBookingRequest,
            bookings::dto::BookingStatsDto,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Server health check endpoints"),
        (name = "Authentication", description = "Login (JWT), self-registration, current user"),
        (name = "Users", description = "User account management (admin only)"),
        (name = "Rooms", description = "Conference room catalogue management"),
        (name = "Bookings", description = "Room booking lifecycle: create, approve, reject"),
    ),
    info(
        title = "Roombook API",
        version = "1.0.0",
        description = "REST API for conference room booking and approval",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(db: DatabaseConnection, jwt_config: JwtConfig) -> Router {
    let user_repo = Arc::new(SeaOrmUserRepository::new(db.clone()));
    let room_repo = Arc::new(SeaOrmRoomRepository::new(db.clone()));
    let booking_repo = Arc::new(SeaOrmBookingRepository::new(db.clone()));

    let middleware_state = AuthState {
        jwt_config: jwt_config.clone(),
    };

    let auth_state = auth::handlers::AuthHandlerState {
        identity: Arc::new(IdentityService::new(user_repo.clone(), jwt_config)),
    };

    let user_state = users::handlers::UserHandlerState {
        identity: auth_state.identity.clone(),
    };

    let room_state = rooms::handlers::RoomHandlerState {
        rooms: Arc::new(RoomService::new(room_repo.clone())),
    };

    let booking_state = bookings::handlers::BookingHandlerState {
        bookings: Arc::new(BookingService::new(booking_repo, room_repo)),
    };

    let health_state = health::handlers::HealthState {
        db,
        started_at: Arc::new(Instant::now()),
    };

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Auth routes (public)
    let auth_routes = Router::new()
        .route("/login", post(auth::handlers::login))
        .route("/register", post(auth::handlers::register))
        .with_state(auth_state.clone());

    // Auth routes (protected)
    let auth_protected_routes = Router::new()
        .route("/me", get(auth::handlers::get_current_user))
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(auth_state);

    // User management routes (protected; admin checks in handlers)
    let user_routes = Router::new()
        .route(
            "/",
            get(users::handlers::list_users).post(users::handlers::create_user),
        )
        .route(
            "/{id}",
            get(users::handlers::get_user)
                .put(users::handlers::update_user)
                .delete(users::handlers::delete_user),
        )
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(user_state);

    // Room routes (protected; mutations admin-only in handlers)
    let room_routes = Router::new()
        .route(
            "/",
            get(rooms::handlers::list_rooms).post(rooms::handlers::create_room),
        )
        .route("/stats", get(rooms::handlers::get_room_stats))
        .route(
            "/{id}",
            get(rooms::handlers::get_room)
                .put(rooms::handlers::update_room)
                .delete(rooms::handlers::delete_room),
        )
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(room_state);

    // Booking routes (protected)
    let booking_routes = Router::new()
        .route(
            "/",
            get(bookings::handlers::list_bookings).post(bookings::handlers::create_booking),
        )
        .route("/stats", get(bookings::handlers::get_booking_stats))
        .route(
            "/{id}",
            get(bookings::handlers::get_booking)
                .put(bookings::handlers::update_booking)
                .delete(bookings::handlers::delete_booking),
        )
        .route("/{id}/approve", post(bookings::handlers::approve_booking))
        .route("/{id}/reject", post(bookings::handlers::reject_booking))
        .layer(middleware::from_fn_with_state(
            middleware_state,
            auth_middleware,
        ))
        .with_state(booking_state);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    // Build router
    Router::new()
        // Swagger UI
        .merge(swagger_routes)
        // Health
        .route("/health", get(health::handlers::health_check))
        .with_state(health_state)
        // Auth
        .nest("/api/v1/auth", auth_routes)
        .nest("/api/v1/auth", auth_protected_routes)
        // Users
        .nest("/api/v1/users", user_routes)
        // Rooms
        .nest("/api/v1/rooms", room_routes)
        // Bookings
        .nest("/api/v1/bookings", booking_routes)
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
