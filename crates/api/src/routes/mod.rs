//! Route definitions, one module per resource.

pub mod categories;
pub mod courses;
pub mod events;
pub mod health;
pub mod learning_materials;
pub mod members;
pub mod quizzes;
pub mod stories;
