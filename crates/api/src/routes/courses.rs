//! Route definitions for courses and their ordered learning lists,
//! mounted at `/courses`.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::{course_learnings, courses};
use crate::state::AppState;

/// ```text
/// GET    /                      -> list_courses
/// POST   /                      -> create_course
/// GET    /{id}                  -> get_course
/// PUT    /{id}                  -> update_course
/// DELETE /{id}                  -> delete_course
/// GET    /{id}/learnings        -> list_course_learnings
/// PUT    /{id}/learnings/order  -> save_course_learning_order
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(courses::list_courses).post(courses::create_course))
        .route(
            "/{id}",
            get(courses::get_course)
                .put(courses::update_course)
                .delete(courses::delete_course),
        )
        .route(
            "/{id}/learnings",
            get(course_learnings::list_course_learnings),
        )
        .route(
            "/{id}/learnings/order",
            put(course_learnings::save_course_learning_order),
        )
}
