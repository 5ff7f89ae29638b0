use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers;
use super::AppState;
use crate::middleware::request_id::{make_span_with_request_id, request_id_middleware};

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        // Readers
        .route("/users", post(handlers::create_user))
        .route("/users/:user_id", get(handlers::get_user))
        .route("/users/:user_id/preferences", put(handlers::update_preferences))
        .route(
            "/users/:user_id/recommendations",
            get(handlers::get_recommendations),
        )
        // Blogs
        .route("/blogs", get(handlers::list_blogs).post(handlers::create_blog))
        .route("/blogs/stats", get(handlers::get_blog_stats))
        .route(
            "/blogs/:blog_id",
            get(handlers::get_blog)
                .put(handlers::update_blog)
                .delete(handlers::delete_blog),
        )
        .route("/blogs/:blog_id/likes", post(handlers::toggle_like))
        .route("/blogs/:blog_id/related", get(handlers::get_blog_related))
        // Discovery
        .route("/recommendations/trending", get(handlers::get_trending))
        .route(
            "/recommendations/related/:blog_id",
            get(handlers::get_related),
        )
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
