//! Axum router construction.
//!
//! Builds the application router with the image routes, the operational
//! routes and the middleware layers. The OpenAPI document is generated from
//! the same handlers and exposed through [`openapi`].

use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::context::AppContext;
use crate::middleware::request_id::request_id_middleware;
use crate::routes;

#[derive(OpenApi)]
#[openapi(
    info(title = "pixforge", description = "Image conversion, resizing and compression"),
    paths(
        routes::images::convert_png_to_jpeg,
        routes::images::resize_image,
        routes::images::compress_image,
        routes::health::health_check,
        routes::tools::tools,
    ),
    components(schemas(
        routes::images::ConvertForm,
        routes::images::ResizeForm,
        routes::images::CompressForm,
        crate::error::ErrorBody,
        pf_av::ToolInfo,
    ))
)]
struct ApiDoc;

/// The OpenAPI document describing every route.
pub fn openapi() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

/// Build the complete Axum router.
pub fn build_router(ctx: AppContext) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let body_limit = DefaultBodyLimit::max(ctx.config.server.max_upload_bytes);

    let images = Router::new()
        .route(
            "/convert_png_to_jpeg",
            post(routes::images::convert_png_to_jpeg),
        )
        .route("/resize_image", post(routes::images::resize_image))
        .route("/compress_image", post(routes::images::compress_image))
        .layer(body_limit);

    Router::new()
        .merge(images)
        .route("/health", get(routes::health::health_check))
        .route("/tools", get(routes::tools::tools))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}
