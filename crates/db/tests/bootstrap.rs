use sqlx::PgPool;

/// Full bootstrap test: connect, migrate, verify schema.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    aula_db::health_check(&pool).await.unwrap();

    let tables = [
        "members",
        "categories",
        "events",
        "stories",
        "learning_materials",
        "courses",
        "quizzes",
        "quiz_questions",
        "quiz_options",
        "course_learnings",
    ];

    for table in tables {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert_eq!(count.0, 0, "{table} should exist and start empty");
    }
}

/// Ordered-children queries round-trip through the repositories.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_course_learning_ordering_roundtrip(pool: PgPool) {
    use aula_db::models::course::CreateCourse;
    use aula_db::models::course_learning::CourseLearning;
    use aula_db::models::learning_material::CreateLearningMaterial;
    use aula_db::repositories::{CourseLearningRepo, CourseRepo, LearningMaterialRepo};

    let course = CourseRepo::create(
        &pool,
        &CreateCourse {
            name: "Rust basics".into(),
            slug: None,
            description: None,
            thumbnail_url: None,
            status: None,
        },
        "rust-basics",
    )
    .await
    .unwrap();

    let mut learning_ids = Vec::new();
    for title in ["Ownership", "Borrowing", "Lifetimes"] {
        let lm = LearningMaterialRepo::create(
            &pool,
            &CreateLearningMaterial {
                title: title.into(),
                content: serde_json::json!({}),
                cover_image_url: None,
                category_id: None,
                status: None,
                published_at: None,
            },
        )
        .await
        .unwrap();
        learning_ids.push(lm.id);
    }

    let template = |learnings_id, position| CourseLearning {
        id: 0,
        course_id: course.id,
        learnings_id,
        quiz_id: None,
        position,
        created_at: chrono::Utc::now(),
        updated_at: chrono::Utc::now(),
    };

    // Insert out of order; listing must come back sorted by position.
    CourseLearningRepo::create(&pool, course.id, &template(learning_ids[2], 3))
        .await
        .unwrap();
    CourseLearningRepo::create_batch(
        &pool,
        course.id,
        &[
            template(learning_ids[0], 1),
            template(learning_ids[1], 2),
        ],
    )
    .await
    .unwrap();

    let listed = CourseLearningRepo::list_for_course(&pool, course.id)
        .await
        .unwrap();
    let order: Vec<_> = listed.iter().map(|r| (r.learnings_id, r.position)).collect();
    assert_eq!(
        order,
        vec![
            (learning_ids[0], 1),
            (learning_ids[1], 2),
            (learning_ids[2], 3),
        ]
    );

    let views = CourseLearningRepo::list_views_for_course(&pool, course.id)
        .await
        .unwrap();
    assert_eq!(views[0].learning_title, "Ownership");
    assert_eq!(views[2].learning_title, "Lifetimes");

    // Batch delete removes exactly the requested rows.
    let removed = CourseLearningRepo::delete_batch(&pool, &[listed[0].id, listed[1].id])
        .await
        .unwrap();
    assert_eq!(removed, 2);
    let remaining = CourseLearningRepo::list_for_course(&pool, course.id)
        .await
        .unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].learnings_id, learning_ids[2]);
}
