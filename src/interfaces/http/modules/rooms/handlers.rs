//! Room management API handlers
//!
//! Reads are open to any authenticated user (the booking form needs
//! the room list); mutations are admin-only.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};

use super::dto::{
    CreateRoomRequest, ListRoomsParams, RoomDto, RoomStatsDto, UpdateRoomRequest,
};
use crate::application::rooms::RoomService;
use crate::domain::{NewRoom, UpdateRoomFields};
use crate::infrastructure::database::repositories::SeaOrmRoomRepository;
use crate::interfaces::http::common::{domain_error, require_admin, ApiResponse, ValidatedJson};
use crate::interfaces::http::middleware::AuthenticatedUser;

/// Room handler state — concrete over the SeaORM repository for Axum
/// compatibility.
#[derive(Clone)]
pub struct RoomHandlerState {
    pub rooms: Arc<RoomService<SeaOrmRoomRepository>>,
}

#[utoipa::path(
    get,
    path = "/api/v1/rooms",
    tag = "Rooms",
    security(("bearer_auth" = [])),
    params(ListRoomsParams),
    responses(
        (status = 200, description = "Room list", body = ApiResponse<Vec<RoomDto>>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_rooms(
    State(state): State<RoomHandlerState>,
    Query(params): Query<ListRoomsParams>,
) -> Result<Json<ApiResponse<Vec<RoomDto>>>, (StatusCode, Json<ApiResponse<Vec<RoomDto>>>)> {
    let rooms = state
        .rooms
        .list_rooms(params.search.as_deref())
        .await
        .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(
        rooms.into_iter().map(RoomDto::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/rooms/stats",
    tag = "Rooms",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Aggregate room figures", body = ApiResponse<RoomStatsDto>)
    )
)]
pub async fn get_room_stats(
    State(state): State<RoomHandlerState>,
) -> Result<Json<ApiResponse<RoomStatsDto>>, (StatusCode, Json<ApiResponse<RoomStatsDto>>)> {
    let stats = state.rooms.stats().await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(RoomStatsDto::from(stats))))
}

#[utoipa::path(
    get,
    path = "/api/v1/rooms/{id}",
    tag = "Rooms",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Room ID")),
    responses(
        (status = 200, description = "Room details", body = ApiResponse<RoomDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_room(
    State(state): State<RoomHandlerState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<RoomDto>>, (StatusCode, Json<ApiResponse<RoomDto>>)> {
    match state.rooms.get_room(id).await.map_err(domain_error)? {
        Some(room) => Ok(Json(ApiResponse::success(RoomDto::from(room)))),
        None => Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(format!("Room {} not found", id))),
        )),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/rooms",
    tag = "Rooms",
    security(("bearer_auth" = [])),
    request_body = CreateRoomRequest,
    responses(
        (status = 201, description = "Room created", body = ApiResponse<RoomDto>),
        (status = 403, description = "Administrator access required")
    )
)]
pub async fn create_room(
    State(state): State<RoomHandlerState>,
    Extension(user): Extension<AuthenticatedUser>,
    ValidatedJson(request): ValidatedJson<CreateRoomRequest>,
) -> Result<(StatusCode, Json<ApiResponse<RoomDto>>), (StatusCode, Json<ApiResponse<RoomDto>>)> {
    require_admin(&user)?;

    let room = state
        .rooms
        .create_room(NewRoom {
            room_name: request.room_name,
            capacity: request.capacity,
        })
        .await
        .map_err(domain_error)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(RoomDto::from(room))),
    ))
}

#[utoipa::path(
    put,
    path = "/api/v1/rooms/{id}",
    tag = "Rooms",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Room ID")),
    request_body = UpdateRoomRequest,
    responses(
        (status = 200, description = "Room updated", body = ApiResponse<RoomDto>),
        (status = 404, description = "Not found"),
        (status = 403, description = "Administrator access required")
    )
)]
pub async fn update_room(
    State(state): State<RoomHandlerState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<UpdateRoomRequest>,
) -> Result<Json<ApiResponse<RoomDto>>, (StatusCode, Json<ApiResponse<RoomDto>>)> {
    require_admin(&user)?;

    let room = state
        .rooms
        .update_room(
            id,
            UpdateRoomFields {
                room_name: request.room_name,
                capacity: request.capacity,
            },
        )
        .await
        .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(RoomDto::from(room))))
}

#[utoipa::path(
    delete,
    path = "/api/v1/rooms/{id}",
    tag = "Rooms",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Room ID")),
    responses(
        (status = 200, description = "Room deleted"),
        (status = 404, description = "Not found"),
        (status = 403, description = "Administrator access required")
    )
)]
pub async fn delete_room(
    State(state): State<RoomHandlerState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<()>>, (StatusCode, Json<ApiResponse<()>>)> {
    require_admin(&user)?;

    state.rooms.delete_room(id).await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(())))
}
