//! Composition of all API routes under `/api/v1`.

use axum::Router;

use crate::routes;
use crate::state::AppState;

/// All resource routers, to be nested under `/api/v1`.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/members", routes::members::router())
        .nest("/categories", routes::categories::router())
        .nest("/events", routes::events::router())
        .nest("/stories", routes::stories::router())
        .nest("/learning-materials", routes::learning_materials::router())
        .nest("/courses", routes::courses::router())
        .nest("/quizzes", routes::quizzes::router())
        .merge(routes::quizzes::question_router())
}
