use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::auth::create_token;
use super::handlers::auth::refresh_token;
use super::handlers::lists::create_list;
use super::handlers::lists::delete_list;
use super::handlers::lists::get_list;
use super::handlers::lists::get_lists;
use super::handlers::lists::update_list;
use super::handlers::users::create_user;
use super::handlers::users::delete_user;
use super::handlers::users::get_users;
use super::middleware::authenticate as auth_middleware;
use super::middleware::require_admin;
use crate::domain::auth::service::AuthService;
use crate::domain::list::service::ListsService;
use crate::domain::user::service::UsersService;

#[derive(Clone)]
pub struct AppState {
    pub users: UsersService,
    pub lists: ListsService,
    pub auth: AuthService,
}

pub fn create_router(users: UsersService, lists: ListsService, auth: AuthService) -> Router {
    let state = AppState { users, lists, auth };

    let public_routes = Router::new()
        .route("/auth/token", post(create_token))
        .route("/auth/refreshtoken", post(refresh_token));

    // ServiceBuilder applies top-down: authenticate, then the admin check.
    let admin_routes = Router::new()
        .route("/users", post(create_user).get(get_users))
        .route("/users/:id", delete(delete_user))
        .route_layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
                .layer(middleware::from_fn(require_admin)),
        );

    let protected_routes = Router::new()
        .route("/lists", get(get_lists).post(create_list))
        .route(
            "/lists/:id",
            get(get_list).put(update_list).delete(delete_list),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(admin_routes)
        .merge(protected_routes)
        .layer(
            ServiceBuilder::new()
                .layer(trace_layer)
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
