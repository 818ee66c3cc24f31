pub mod auth;
pub mod polls;

use axum::{
    middleware,
    routing::get,
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

use crate::openapi::ApiDoc;
use auth::ServerState;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "Service is up", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Poll endpoints; every route requires a resolved current user.
fn poll_routes(state: ServerState) -> Router<ServerState> {
    Router::new()
        .route("/polls", get(polls::list).post(polls::create))
        .route("/polls/", get(polls::list).post(polls::create))
        .route("/polls/:id", get(polls::read).put(polls::update).delete(polls::delete))
        .route_layer(middleware::from_fn_with_state(state, auth::require_current_user))
}

/// Build the full application router: health, docs, and the poll API under `api_prefix`.
pub fn build_router(state: ServerState, cors: CorsLayer, api_prefix: &str) -> Router {
    let api = poll_routes(state.clone());
    let api = if api_prefix.is_empty() || api_prefix == "/" {
        api
    } else {
        Router::new().nest(api_prefix, api)
    };

    // Public routes (health + docs)
    let public = Router::new()
        .route("/health", get(health))
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    public
        .merge(api)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径等，日志级别为 INFO
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                // 响应返回时打点，包含状态码与耗时
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 失败（5xx 等）时以 ERROR 记录
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}
