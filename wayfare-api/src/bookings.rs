use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Form, Json, Router,
};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;
use wayfare_booking::{Address, Booking, BookingForm, BookingStatus};

use crate::error::AppError;
use crate::middleware::{CurrentUser, MaybeUser};
use crate::state::AppState;

// ============================================================================
// Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct BookingSubmittedResponse {
    pub booking_id: Uuid,
    pub status: BookingStatus,
    pub confirmation_url: String,
}

#[derive(Debug, Serialize)]
pub struct BookingResponse {
    pub id: Uuid,
    pub package_id: Uuid,
    pub status: BookingStatus,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub travel_date: NaiveDate,
    pub number_of_adults: u32,
    pub number_of_children: u32,
    pub special_requirements: Option<String>,
    pub total_price: Decimal,
    #[serde(skip_serializing_if = "Address::is_empty")]
    pub address: Address,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl From<Booking> for BookingResponse {
    fn from(booking: Booking) -> Self {
        Self {
            id: booking.id,
            package_id: booking.package_id,
            status: booking.status,
            name: booking.contact.name,
            email: booking.contact.email.into_inner(),
            phone: booking.contact.phone.map(|p| p.into_inner()),
            travel_date: booking.travel_date,
            number_of_adults: booking.adults,
            number_of_children: booking.children,
            special_requirements: booking.special_requirements,
            total_price: booking.total_price,
            address: booking.address,
            created_at: booking.created_at,
            modified_at: booking.modified_at,
        }
    }
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/packages/{id}/bookings", post(submit_booking))
        .route("/v1/bookings/{id}/confirmation", get(booking_confirmation))
        .route("/v1/me/bookings", get(list_my_bookings))
        .route("/v1/me/bookings/{id}", get(my_booking_detail))
        .route("/v1/me/bookings/{id}/cancel", post(cancel_booking))
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /v1/packages/{id}/bookings
/// Guest checkout is allowed; a signed-in caller becomes the owner.
async fn submit_booking(
    State(state): State<AppState>,
    Path(package_id): Path<Uuid>,
    MaybeUser(caller): MaybeUser,
    Form(form): Form<BookingForm>,
) -> Result<(StatusCode, Json<BookingSubmittedResponse>), AppError> {
    let booking_id = state.engine.submit_booking(package_id, &form, caller.as_ref()).await?;

    Ok((
        StatusCode::CREATED,
        Json(BookingSubmittedResponse {
            booking_id,
            status: BookingStatus::Pending,
            confirmation_url: format!("/v1/bookings/{}/confirmation", booking_id),
        }),
    ))
}

/// GET /v1/bookings/{id}/confirmation
async fn booking_confirmation(
    State(state): State<AppState>,
    Path(booking_id): Path<Uuid>,
    MaybeUser(caller): MaybeUser,
) -> Result<Json<BookingResponse>, AppError> {
    let booking = state
        .engine
        .get_booking_for_confirmation(booking_id, caller.as_ref())
        .await?;
    Ok(Json(booking.into()))
}

/// GET /v1/me/bookings
async fn list_my_bookings(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
) -> Result<Json<Vec<BookingResponse>>, AppError> {
    let bookings = state.engine.list_my_bookings(&caller).await?;
    Ok(Json(bookings.into_iter().map(BookingResponse::from).collect()))
}

/// GET /v1/me/bookings/{id}
async fn my_booking_detail(
    State(state): State<AppState>,
    Path(booking_id): Path<Uuid>,
    CurrentUser(caller): CurrentUser,
) -> Result<Json<BookingResponse>, AppError> {
    let booking = state.engine.get_my_booking_detail(booking_id, &caller).await?;
    Ok(Json(booking.into()))
}

/// POST /v1/me/bookings/{id}/cancel
async fn cancel_booking(
    State(state): State<AppState>,
    Path(booking_id): Path<Uuid>,
    CurrentUser(caller): CurrentUser,
) -> Result<Json<BookingResponse>, AppError> {
    let booking = state.engine.cancel_booking(booking_id, &caller).await?;
    Ok(Json(booking.into()))
}
