use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use storage::Database;

use super::handlers::{
    cancel_hackathon, create_hackathon, get_hackathon, my_hackathons, publish_hackathon,
    update_hackathon, update_status,
};
use crate::middleware::auth::{TokenAuth, require_auth, require_organizer};

pub fn routes(auth: TokenAuth) -> Router<Database> {
    Router::new()
        .route("/", get(my_hackathons))
        .route("/", post(create_hackathon))
        .route("/:id", get(get_hackathon))
        .route("/:id", put(update_hackathon))
        .route("/:id/publish", post(publish_hackathon))
        .route("/:id/status", post(update_status))
        .route("/:id/cancel", post(cancel_hackathon))
        .route_layer(middleware::from_fn(require_organizer))
        .route_layer(middleware::from_fn_with_state(auth, require_auth))
}
