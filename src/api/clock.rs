//! Terminal (kiosk) endpoints: server time, PIN check-in, photo upload
//!
//! These endpoints are unauthenticated: the terminal identifies employees
//! by PIN alone and holds no user session.

use axum::{extract::State, Json};
use chrono::Local;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{error::AppResult, models::attendance::CheckInResult};

/// Server time response for the terminal clock display
#[derive(Serialize, ToSchema)]
pub struct ServerTimeResponse {
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
    pub iso: String,
    pub date: String,
    pub time: String,
}

/// Check-in request
#[derive(Deserialize, ToSchema)]
pub struct CheckInRequest {
    /// PIN entered at the terminal
    pub pin: String,
}

/// Photo upload request
#[derive(Deserialize, ToSchema)]
pub struct AttachPhotoRequest {
    pub attendance_id: i32,
    /// Original file name, used only for its extension
    pub file_name: String,
    /// Image content, base64 encoded
    pub image_base64: String,
}

/// Photo upload response
#[derive(Serialize, ToSchema)]
pub struct AttachPhotoResponse {
    /// Stored photo reference
    pub photo: String,
}

/// Current server date and time
#[utoipa::path(
    get,
    path = "/clock/time",
    tag = "clock",
    responses(
        (status = 200, description = "Server time", body = ServerTimeResponse)
    )
)]
pub async fn server_time() -> Json<ServerTimeResponse> {
    let now = Local::now();
    Json(ServerTimeResponse {
        timestamp: now.timestamp_millis(),
        iso: now.to_rfc3339(),
        date: now.format("%Y-%m-%d").to_string(),
        time: now.format("%H:%M:%S").to_string(),
    })
}

/// Record an attendance event for the employee carrying this PIN
#[utoipa::path(
    post,
    path = "/clock/check-in",
    tag = "clock",
    request_body = CheckInRequest,
    responses(
        (status = 200, description = "Attendance recorded", body = CheckInResult),
        (status = 404, description = "PIN not recognized"),
        (status = 422, description = "Check-in refused (already exited, day complete, or past the exit window)"),
        (status = 409, description = "Concurrent duplicate, safe to retry")
    )
)]
pub async fn check_in(
    State(state): State<crate::AppState>,
    Json(request): Json<CheckInRequest>,
) -> AppResult<Json<CheckInResult>> {
    let now = Local::now().naive_local();
    let result = state.services.clock.check_in(&request.pin, now).await?;
    Ok(Json(result))
}

/// Attach a photo to an attendance record
#[utoipa::path(
    post,
    path = "/clock/photo",
    tag = "clock",
    request_body = AttachPhotoRequest,
    responses(
        (status = 200, description = "Photo stored", body = AttachPhotoResponse),
        (status = 404, description = "Attendance record not found")
    )
)]
pub async fn attach_photo(
    State(state): State<crate::AppState>,
    Json(request): Json<AttachPhotoRequest>,
) -> AppResult<Json<AttachPhotoResponse>> {
    let photo = state
        .services
        .clock
        .attach_photo(request.attendance_id, &request.file_name, &request.image_base64)
        .await?;

    Ok(Json(AttachPhotoResponse { photo }))
}
