use axum::{
    extract::{Query, State},
    Extension, Json,
};
use tokio_util::sync::CancellationToken;

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::{DiscoverParams, MovieRecord},
    routes::AppState,
};

/// Handler for random movie discovery
///
/// Dropping the handler future (client disconnect) cancels the token, which abandons any
/// upstream call still in flight.
pub async fn random(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<DiscoverParams>,
) -> AppResult<Json<MovieRecord>> {
    let cancel = CancellationToken::new();
    let _cancel_on_drop = cancel.clone().drop_guard();

    tracing::info!(request_id = %request_id, params = ?params, "Processing random movie request");

    let record = state.discovery.discover(&params, &cancel).await?;

    tracing::info!(
        request_id = %request_id,
        movie_id = %record.movie_id,
        offers = record.streaming.len(),
        "Random movie discovered"
    );

    Ok(Json(record))
}

/// Handler for random discovery restricted to the requested streaming services
pub async fn random_streaming(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<DiscoverParams>,
) -> AppResult<Json<MovieRecord>> {
    let cancel = CancellationToken::new();
    let _cancel_on_drop = cancel.clone().drop_guard();

    tracing::info!(
        request_id = %request_id,
        params = ?params,
        "Processing random streaming movie request"
    );

    let record = state.discovery.discover_streaming(&params, &cancel).await?;

    tracing::info!(
        request_id = %request_id,
        movie_id = %record.movie_id,
        offers = record.streaming.len(),
        "Random streaming movie discovered"
    );

    Ok(Json(record))
}
