//! Request handlers, one module per resource.

pub mod categories;
pub mod course_learnings;
pub mod courses;
pub mod events;
pub mod health;
pub mod learning_materials;
pub mod members;
pub mod quiz_questions;
pub mod quizzes;
pub mod stories;
