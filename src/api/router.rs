//! HTTP API router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//! Routes are nested under `/api/`. CORS is permissive because the browser
//! UI may be served from a different origin during development.

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::api::endpoints;
use crate::api::types::ApiContext;
use crate::portal::PortalState;

/// Build the API router over shared portal state.
///
/// NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).
pub fn api_router(portal: Arc<PortalState>) -> Router {
    let ctx = ApiContext::new(portal);

    let routes = Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/vocabularies", get(endpoints::vocabularies::list))
        .route("/vocabularies/:vocab/search", get(endpoints::search::run))
        .route(
            "/vocabularies/:vocab/export",
            get(endpoints::export::download),
        )
        .route("/files", get(endpoints::files::inventory))
        .with_state(ctx);

    Router::new()
        .nest("/api", routes)
        .layer(CorsLayer::permissive())
}
