//! Route definitions for stories, mounted at `/stories`.

use axum::routing::get;
use axum::Router;

use crate::handlers::stories;
use crate::state::AppState;

/// ```text
/// GET    /     -> list_stories
/// POST   /     -> create_story
/// GET    /{id} -> get_story
/// PUT    /{id} -> update_story
/// DELETE /{id} -> delete_story
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(stories::list_stories).post(stories::create_story))
        .route(
            "/{id}",
            get(stories::get_story)
                .put(stories::update_story)
                .delete(stories::delete_story),
        )
}
