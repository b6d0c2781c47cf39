//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod category_repo;
pub mod course_learning_repo;
pub mod course_repo;
pub mod event_repo;
pub mod learning_material_repo;
pub mod member_repo;
pub mod quiz_option_repo;
pub mod quiz_question_repo;
pub mod quiz_repo;
pub mod story_repo;

pub use category_repo::CategoryRepo;
pub use course_learning_repo::CourseLearningRepo;
pub use course_repo::CourseRepo;
pub use event_repo::EventRepo;
pub use learning_material_repo::LearningMaterialRepo;
pub use member_repo::MemberRepo;
pub use quiz_option_repo::QuizOptionRepo;
pub use quiz_question_repo::QuizQuestionRepo;
pub use quiz_repo::QuizRepo;
pub use story_repo::StoryRepo;
