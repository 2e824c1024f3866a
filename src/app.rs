use crate::handlers;
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post, put},
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route(
            "/api/habits",
            get(handlers::list_habits).post(handlers::create_habit),
        )
        .route(
            "/api/habits/:id",
            put(handlers::edit_habit).delete(handlers::delete_habit),
        )
        .route("/api/habits/:id/toggle", post(handlers::toggle_day))
        .route("/api/habits/:id/grid/:year", get(handlers::habit_grid))
        .with_state(state)
}
