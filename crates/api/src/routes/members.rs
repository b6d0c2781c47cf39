//! Route definitions for members, mounted at `/members`.

use axum::routing::get;
use axum::Router;

use crate::handlers::members;
use crate::state::AppState;

/// ```text
/// GET    /     -> list_members
/// POST   /     -> create_member
/// GET    /{id} -> get_member
/// PUT    /{id} -> update_member
/// DELETE /{id} -> delete_member
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(members::list_members).post(members::create_member))
        .route(
            "/{id}",
            get(members::get_member)
                .put(members::update_member)
                .delete(members::delete_member),
        )
}
