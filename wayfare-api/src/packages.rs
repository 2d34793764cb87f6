use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use uuid::Uuid;
use wayfare_catalog::Package;

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/packages/{id}", get(get_package))
}

/// GET /v1/packages/{id}
async fn get_package(
    State(state): State<AppState>,
    Path(package_id): Path<Uuid>,
) -> Result<Json<Package>, AppError> {
    state
        .packages
        .get_package(package_id)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?
        .map(Json)
        .ok_or_else(|| AppError::NotFoundError(format!("Package not found: {}", package_id)))
}
