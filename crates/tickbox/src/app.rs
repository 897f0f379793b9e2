use axum::{
    http::{header, Method},
    middleware,
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    handlers::{
        health::health,
        todos::{create_todo, delete_todo, get_todo, list_todos, update_todo},
    },
    middleware::request_deadline,
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    // CORS configuration for API endpoints
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    let api_routes = Router::new()
        .route("/health", get(health))
        .route("/todos", get(list_todos).post(create_todo))
        .route(
            "/todos/{id}",
            get(get_todo).put(update_todo).delete(delete_todo),
        )
        .layer(cors);

    Router::new()
        .nest("/api/v1", api_routes)
        .layer(middleware::from_fn_with_state(
            state.request_timeout,
            request_deadline,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
