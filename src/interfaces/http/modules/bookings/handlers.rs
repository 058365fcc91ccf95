//! Booking API handlers
//!
//! All authorization decisions (ownership, admin-only transitions)
//! live in `BookingService`; the handlers pass in the `Caller` derived
//! from the verified JWT claims and translate errors to HTTP statuses.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};

use super::dto::{
    BookingDto, BookingStatsDto, CreateBookingRequest, ListBookingsParams, UpdateBookingRequest,
};
use crate::application::booking::{BookingQuery, BookingService};
use crate::domain::{BookingStatus, NewBooking, UpdateBookingFields};
use crate::infrastructure::database::repositories::{
    SeaOrmBookingRepository, SeaOrmRoomRepository,
};
use crate::interfaces::http::common::{domain_error, ApiResponse, ValidatedJson};
use crate::interfaces::http::middleware::AuthenticatedUser;

/// Booking handler state — concrete over the SeaORM repositories for
/// Axum compatibility.
#[derive(Clone)]
pub struct BookingHandlerState {
    pub bookings: Arc<BookingService<SeaOrmBookingRepository, SeaOrmRoomRepository>>,
}

/// Parse the `status` query parameter. Absent or `all` means no
/// filter; anything other than the three known statuses is a 400, so
/// a typo never silently turns into a pending-only view.
fn parse_status_param<T>(
    param: Option<&str>,
) -> Result<Option<BookingStatus>, (StatusCode, Json<ApiResponse<T>>)> {
    match param {
        None | Some("all") | Some("") => Ok(None),
        Some(raw) => match BookingStatus::parse_strict(raw) {
            Some(status) => Ok(Some(status)),
            None => Err((
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error(format!(
                    "Unknown status filter '{}'",
                    raw
                ))),
            )),
        },
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/bookings",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    params(ListBookingsParams),
    responses(
        (status = 200, description = "Bookings visible to the caller", body = ApiResponse<Vec<BookingDto>>),
        (status = 400, description = "Unknown status filter")
    )
)]
pub async fn list_bookings(
    State(state): State<BookingHandlerState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(params): Query<ListBookingsParams>,
) -> Result<Json<ApiResponse<Vec<BookingDto>>>, (StatusCode, Json<ApiResponse<Vec<BookingDto>>>)> {
    let status = parse_status_param(params.status.as_deref())?;
    let query = BookingQuery {
        search: params.search,
        status,
    };

    let items = state
        .bookings
        .list(&user.caller(), &query)
        .await
        .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(
        items.into_iter().map(BookingDto::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/bookings/stats",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Dashboard counters", body = ApiResponse<BookingStatsDto>)
    )
)]
pub async fn get_booking_stats(
    State(state): State<BookingHandlerState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<BookingStatsDto>>, (StatusCode, Json<ApiResponse<BookingStatsDto>>)> {
    let stats = state
        .bookings
        .stats(&user.caller())
        .await
        .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(BookingStatsDto::from(stats))))
}

#[utoipa::path(
    get,
    path = "/api/v1/bookings/{id}",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking details", body = ApiResponse<BookingDto>),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_booking(
    State(state): State<BookingHandlerState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<BookingDto>>, (StatusCode, Json<ApiResponse<BookingDto>>)> {
    let item = state
        .bookings
        .get(&user.caller(), id)
        .await
        .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(BookingDto::from(item))))
}

#[utoipa::path(
    post,
    path = "/api/v1/bookings",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Booking created (pending)", body = ApiResponse<BookingDto>),
        (status = 400, description = "Room does not exist")
    )
)]
pub async fn create_booking(
    State(state): State<BookingHandlerState>,
    Extension(user): Extension<AuthenticatedUser>,
    ValidatedJson(request): ValidatedJson<CreateBookingRequest>,
) -> Result<(StatusCode, Json<ApiResponse<BookingDto>>), (StatusCode, Json<ApiResponse<BookingDto>>)>
{
    let caller = user.caller();
    let booking = state
        .bookings
        .create(
            &caller,
            NewBooking {
                project_name: request.project_name,
                manager_name: request.manager_name,
                room_id: request.room_id,
                booking_date: request.booking_date,
                start_time: request.start_time,
                end_time: request.end_time,
            },
        )
        .await
        .map_err(domain_error)?;

    let item = state
        .bookings
        .get(&caller, booking.id)
        .await
        .map_err(domain_error)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(BookingDto::from(item))),
    ))
}

#[utoipa::path(
    put,
    path = "/api/v1/bookings/{id}",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Booking ID")),
    request_body = UpdateBookingRequest,
    responses(
        (status = 200, description = "Booking updated", body = ApiResponse<BookingDto>),
        (status = 403, description = "Not the owner, or no longer pending"),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_booking(
    State(state): State<BookingHandlerState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<UpdateBookingRequest>,
) -> Result<Json<ApiResponse<BookingDto>>, (StatusCode, Json<ApiResponse<BookingDto>>)> {
    let caller = user.caller();
    state
        .bookings
        .update(
            &caller,
            id,
            UpdateBookingFields {
                project_name: request.project_name,
                manager_name: request.manager_name,
                room_id: request.room_id,
                booking_date: request.booking_date,
                start_time: request.start_time,
                end_time: request.end_time,
            },
        )
        .await
        .map_err(domain_error)?;

    let item = state.bookings.get(&caller, id).await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(BookingDto::from(item))))
}

#[utoipa::path(
    post,
    path = "/api/v1/bookings/{id}/approve",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking approved", body = ApiResponse<BookingDto>),
        (status = 403, description = "Administrator access required"),
        (status = 409, description = "Booking is not pending")
    )
)]
pub async fn approve_booking(
    State(state): State<BookingHandlerState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<BookingDto>>, (StatusCode, Json<ApiResponse<BookingDto>>)> {
    let caller = user.caller();
    state
        .bookings
        .approve(&caller, id)
        .await
        .map_err(domain_error)?;

    let item = state.bookings.get(&caller, id).await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(BookingDto::from(item))))
}

#[utoipa::path(
    post,
    path = "/api/v1/bookings/{id}/reject",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking rejected", body = ApiResponse<BookingDto>),
        (status = 403, description = "Administrator access required"),
        (status = 409, description = "Booking is not pending")
    )
)]
pub async fn reject_booking(
    State(state): State<BookingHandlerState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<BookingDto>>, (StatusCode, Json<ApiResponse<BookingDto>>)> {
    let caller = user.caller();
    state
        .bookings
        .reject(&caller, id)
        .await
        .map_err(domain_error)?;

    let item = state.bookings.get(&caller, id).await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(BookingDto::from(item))))
}

#[utoipa::path(
    delete,
    path = "/api/v1/bookings/{id}",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking deleted"),
        (status = 403, description = "Not the owner, or no longer pending"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_booking(
    State(state): State<BookingHandlerState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<()>>, (StatusCode, Json<ApiResponse<()>>)> {
    state
        .bookings
        .delete(&user.caller(), id)
        .await
        .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_param_accepts_known_values() {
        assert_eq!(
            parse_status_param::<()>(Some("pending")).unwrap(),
            Some(BookingStatus::Pending)
        );
        assert_eq!(
            parse_status_param::<()>(Some("approved")).unwrap(),
            Some(BookingStatus::Approved)
        );
        assert_eq!(parse_status_param::<()>(Some("all")).unwrap(), None);
        assert_eq!(parse_status_param::<()>(None).unwrap(), None);
    }

    #[test]
    fn status_param_rejects_typos() {
        assert!(parse_status_param::<()>(Some("pneding")).is_err());
        assert!(parse_status_param::<()>(Some("Pending")).is_err());
    }
}
