//! REST API definitions.

pub mod listing;

use axum::{
    routing::{get, put},
    Router,
};

/// Builds a [`Router`] serving the REST API.
///
/// The [`crate::Service`] is expected to be provided as an
/// [`axum::Extension`] layer.
#[must_use]
pub fn router() -> Router {
    Router::new()
        .route("/api/listings", get(listing::list).post(listing::create))
        .route("/api/listings/:id", put(listing::update))
}
