use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use crate::AppState;

pub mod docs;
pub mod health;
pub mod user;

const MAX_BODY_BYTES: usize = 64 * 1024;

pub fn router(state: AppState) -> Router {
    let user_api = Router::new()
        .route(
            "/user/create",
            post(user::create_user)
                .get(user::get_user_at_uri)
                .delete(user::delete_user_at_uri),
        )
        .route(
            "/user/update",
            post(user::update_user)
                .get(user::get_user_at_uri)
                .delete(user::delete_user_at_uri),
        )
        .route(
            "/user/",
            get(user::missing_username).delete(user::missing_username),
        )
        .route(
            "/user/:username",
            get(user::get_user).delete(user::delete_user),
        );

    Router::new()
        .route("/health", get(health::health))
        .route("/api-docs/openapi.json", get(docs::openapi_json))
        .merge(user_api)
        .with_state(state)
        .layer(CatchPanicLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
}
