use std::path::Path;

use axum::{
    handler::HandlerWithoutStateExt,
    http::StatusCode,
    response::Html,
    routing::get,
    Router,
};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::api::handlers::{health, resources, ui};
use crate::api::state::AppState;

/// Resource API and health check
pub fn api_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Resource routes (session-gated by the ActiveSession extractor)
        .route(
            "/resources",
            get(resources::list_resources).post(resources::create_resource),
        )
        .route(
            "/resources/:id",
            get(resources::get_resource)
                .put(resources::update_resource)
                .delete(resources::delete_resource),
        )
        .with_state(state)
}

async fn static_not_found() -> (StatusCode, Html<&'static str>) {
    (StatusCode::NOT_FOUND, Html("<h1>404 Not Found</h1>"))
}

/// Browser UI: landing page, named pages and static assets under `root`
pub fn ui_router(root: &Path) -> Router {
    let assets = ServeDir::new(root.join("ui").join("static"))
        .not_found_service(static_not_found.into_service());

    Router::new()
        .route("/", get(ui::serve_index))
        .route("/ui/:page", get(ui::serve_page))
        .nest_service("/ui/static", assets)
        .with_state(ui::UiState::new(root))
}

/// CORS policy for a cookie-authenticated browser client
///
/// Credentials are allowed, so origins, methods and headers are mirrored from
/// the request instead of using wildcards.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

/// Full application: API, UI and HTTP middleware
pub fn app(state: AppState, ui_root: &Path) -> Router {
    api_router(state)
        .merge(ui_router(ui_root))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
}
