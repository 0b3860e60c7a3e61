use axum::Json;

use crate::models::{Genre, StreamingService, GENRES, STREAMING_SERVICES};

/// Handler listing the genres discovery accepts
pub async fn list() -> Json<&'static [Genre]> {
    Json(GENRES)
}

/// Handler listing the streaming services discovery can be restricted to
pub async fn streaming_services() -> Json<&'static [StreamingService]> {
    Json(STREAMING_SERVICES)
}
