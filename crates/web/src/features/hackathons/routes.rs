use axum::{
    Router, middleware,
    routing::{get, post},
};
use storage::Database;

use super::handlers::{
    get_hackathon, list_hackathons, list_participants, my_hackathons, register, withdraw,
};
use crate::middleware::auth::{TokenAuth, require_auth, require_student};

pub fn routes(auth: TokenAuth) -> Router<Database> {
    let student = Router::new()
        .route("/mine", get(my_hackathons))
        .route("/:id/register", post(register))
        .route("/:id/withdraw", post(withdraw))
        .route("/:id/participants", get(list_participants))
        .route_layer(middleware::from_fn(require_student))
        .route_layer(middleware::from_fn_with_state(auth, require_auth));

    Router::new()
        .route("/", get(list_hackathons))
        .route("/:id", get(get_hackathon))
        .merge(student)
}
