use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};
use storage::Database;

use super::handlers::{
    create_team, delete_team, get_team, invite_to_team, leave_team, my_invitations, my_teams,
    respond_to_invitation, update_team,
};
use crate::middleware::auth::{TokenAuth, require_auth, require_student};

pub fn routes(auth: TokenAuth) -> Router<Database> {
    Router::new()
        .route("/", get(my_teams))
        .route("/", post(create_team))
        .route("/invitations", get(my_invitations))
        .route("/invitations/:id/respond", post(respond_to_invitation))
        .route("/:id", get(get_team))
        .route("/:id", put(update_team))
        .route("/:id", delete(delete_team))
        .route("/:id/invite", post(invite_to_team))
        .route("/:id/leave", post(leave_team))
        .route_layer(middleware::from_fn(require_student))
        .route_layer(middleware::from_fn_with_state(auth, require_auth))
}
