//! HTTP surface for the wellcheck questionnaires.
//!
//! The router is built here rather than in `main.rs` so integration tests
//! can drive it in-process.

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::middleware as axum_mw;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/instruments", get(routes::instruments::list_instruments))
        .route(
            "/instruments/{id}",
            get(routes::instruments::get_instrument_detail),
        )
        .route(
            "/instruments/{id}/evaluate",
            post(routes::evaluate::evaluate_instrument),
        )
        .route("/respondents", post(routes::respondents::validate_respondent))
        .layer(axum_mw::from_fn(middleware::request_log::log_request))
        .layer(cors)
        .with_state(state)
}
