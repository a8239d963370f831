use std::time::Duration;

use axum::error_handling::HandleErrorLayer;
use axum::{
    Json, Router,
    extract::{MatchedPath, Request},
    http::{Method, header},
    middleware,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{self, CorsLayer},
    trace::TraceLayer,
};
use tracing::info_span;

use crate::core::error;
use crate::core::state::AppState;
use crate::routes::{auth, categories, products, user};
use crate::types::response;
use crate::utils;

pub(crate) fn routes(state: AppState) -> Router {
    let guard = || middleware::from_fn_with_state(state.clone(), utils::auth::authorize);

    // /api/v1/users/...
    let user_router = Router::new()
        .route("/", post(user::register))
        .route("/me", get(user::me).route_layer(guard()))
        .route("/{id}", get(user::get));

    // /api/v1/auth/...
    let auth_router = Router::new().route("/login", post(auth::login));

    // /api/v1/categories/...
    let category_router = Router::new()
        .route("/", post(categories::post).route_layer(guard()))
        .route(
            "/{id}",
            axum::routing::put(categories::put)
                .delete(categories::delete)
                .route_layer(guard()),
        )
        .route("/", get(categories::get_all))
        .route("/{id}", get(categories::get));

    // /api/v1/products/...
    let product_router = Router::new()
        .route("/", post(products::post).route_layer(guard()))
        .route(
            "/{id}",
            axum::routing::put(products::put)
                .delete(products::delete)
                .route_layer(guard()),
        )
        .route("/", get(products::get_all))
        .route("/{id}", get(products::get));

    let api = Router::new()
        .nest("/users", user_router)
        .nest("/auth", auth_router)
        .nest("/categories", category_router)
        .nest("/products", product_router);

    Router::new()
        .route(
            "/health",
            get(|| async { Json(response::Health { status: "ok" }) }),
        )
        .nest("/api/v1", api)
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                        let matched_path = request
                            .extensions()
                            .get::<MatchedPath>()
                            .map(MatchedPath::as_str);

                        info_span!(
                            "request",
                            method = ?request.method(),
                            matched_path,
                        )
                    }),
                )
                .layer(HandleErrorLayer::new(error::handle_middleware_errors))
                .buffer(128)
                .rate_limit(100, Duration::from_secs(1))
                .layer(
                    CorsLayer::new()
                        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
                        .allow_origin(cors::Any),
                ),
        )
}
