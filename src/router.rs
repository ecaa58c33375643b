use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::{
    controller::{health::health, transcript::get_transcript},
    state::AppState,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/transcripts/{filename}", get(get_transcript))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
