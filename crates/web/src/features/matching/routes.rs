use axum::{Extension, Router, middleware, routing::get, routing::post};
use storage::Database;

use super::client::MatchingClient;
use super::handlers::{get_matches, invite_match};
use crate::middleware::auth::{TokenAuth, require_auth, require_student};

/// Mounted under the same prefix as the teams feature.
pub fn routes(auth: TokenAuth, client: MatchingClient) -> Router<Database> {
    Router::new()
        .route("/:id/matches", get(get_matches))
        .route("/:id/matches/:user_id", post(invite_match))
        .layer(Extension(client))
        .route_layer(middleware::from_fn(require_student))
        .route_layer(middleware::from_fn_with_state(auth, require_auth))
}
