//! Route definitions for learning materials, mounted at
//! `/learning-materials`.

use axum::routing::get;
use axum::Router;

use crate::handlers::learning_materials;
use crate::state::AppState;

/// ```text
/// GET    /      -> list_learning_materials
/// POST   /      -> create_learning_material
/// GET    /refs  -> list_learning_material_refs
/// GET    /{id}  -> get_learning_material
/// PUT    /{id}  -> update_learning_material
/// DELETE /{id}  -> delete_learning_material
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(learning_materials::list_learning_materials)
                .post(learning_materials::create_learning_material),
        )
        .route(
            "/refs",
            get(learning_materials::list_learning_material_refs),
        )
        .route(
            "/{id}",
            get(learning_materials::get_learning_material)
                .put(learning_materials::update_learning_material)
                .delete(learning_materials::delete_learning_material),
        )
}
