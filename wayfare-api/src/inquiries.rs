use axum::{extract::State, http::StatusCode, routing::post, Form, Json, Router};
use serde::Serialize;
use uuid::Uuid;
use wayfare_booking::{ContactForm, CustomTourForm};

use crate::error::AppError;
use crate::middleware::MaybeUser;
use crate::state::AppState;

#[derive(Debug, Serialize)]
struct CustomTourSubmittedResponse {
    request_id: Uuid,
}

#[derive(Debug, Serialize)]
struct ContactSubmittedResponse {
    inquiry_id: Uuid,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/custom-tours", post(submit_custom_tour))
        .route("/v1/contact", post(submit_contact))
}

/// POST /v1/custom-tours
async fn submit_custom_tour(
    State(state): State<AppState>,
    MaybeUser(caller): MaybeUser,
    Form(form): Form<CustomTourForm>,
) -> Result<(StatusCode, Json<CustomTourSubmittedResponse>), AppError> {
    let request_id = state
        .engine
        .submit_custom_tour_request(&form, caller.as_ref())
        .await?;
    Ok((StatusCode::CREATED, Json(CustomTourSubmittedResponse { request_id })))
}

/// POST /v1/contact
async fn submit_contact(
    State(state): State<AppState>,
    MaybeUser(caller): MaybeUser,
    Form(form): Form<ContactForm>,
) -> Result<(StatusCode, Json<ContactSubmittedResponse>), AppError> {
    let inquiry_id = state.engine.submit_contact_inquiry(&form, caller.as_ref()).await?;
    Ok((StatusCode::CREATED, Json(ContactSubmittedResponse { inquiry_id })))
}
