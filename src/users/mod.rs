use axum::{routing::post, Router};

use crate::state::AppState;

mod dto;
pub mod handlers;
pub mod repo;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/user", post(handlers::create_user))
        .route("/userLogin", post(handlers::login))
}
