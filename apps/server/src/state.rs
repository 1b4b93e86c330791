//! Shared application state.

use sqlx::PgPool;
use std::sync::Arc;

use crate::{
    config::Config,
    db::{
        CategoryRepository, ContentRepository, CourseRepository, EnrollmentRepository,
        QuizRepository, ReviewRepository, SubmissionRepository, TagRepository, UserRepository,
    },
    services::{
        CategoryService, CourseContentService, CourseReviewService, CourseService,
        EnrollmentService, QuizService, SubmissionService, UserService,
    },
    Result,
};

#[derive(Debug, Clone)]
pub struct AppStateOptions {
    pub run_migrations: bool,
}

impl Default for AppStateOptions {
    fn default() -> Self {
        Self {
            run_migrations: true,
        }
    }
}

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db_pool: PgPool,
    pub user_service: Arc<UserService>,
    pub category_service: Arc<CategoryService>,
    pub course_service: Arc<CourseService>,
    pub content_service: Arc<CourseContentService>,
    pub enrollment_service: Arc<EnrollmentService>,
    pub submission_service: Arc<SubmissionService>,
    pub quiz_service: Arc<QuizService>,
    pub review_service: Arc<CourseReviewService>,
}

impl AppState {
    pub async fn new(config: Config) -> Result<Self> {
        Self::new_with_options(config, AppStateOptions::default()).await
    }

    pub async fn new_with_options(config: Config, options: AppStateOptions) -> Result<Self> {
        tracing::info!("Initializing application state...");

        let config = Arc::new(config);

        let db_pool = create_db_pool(config.as_ref()).await?;

        if options.run_migrations {
            tracing::info!("Running database migrations...");
            sqlx::migrate!("./migrations")
                .run(&db_pool)
                .await
                .map_err(|e| crate::Error::Internal(format!("migration failed: {e}")))?;
        }

        let users = UserRepository::new(db_pool.clone());
        let categories = CategoryRepository::new(db_pool.clone());
        let tags = TagRepository::new(db_pool.clone());
        let courses = CourseRepository::new(db_pool.clone());
        let content = ContentRepository::new(db_pool.clone());
        let enrollments = EnrollmentRepository::new(db_pool.clone());
        let submissions = SubmissionRepository::new(db_pool.clone());
        let quizzes = QuizRepository::new(db_pool.clone());
        let reviews = ReviewRepository::new(db_pool.clone());

        let user_service = Arc::new(UserService::new(users.clone()));
        let category_service = Arc::new(CategoryService::new(categories.clone()));
        let course_service = Arc::new(CourseService::new(
            courses.clone(),
            categories,
            users.clone(),
            tags,
        ));
        let content_service = Arc::new(CourseContentService::new(
            content.clone(),
            courses.clone(),
        ));
        let enrollment_service = Arc::new(EnrollmentService::new(
            enrollments,
            users.clone(),
            courses.clone(),
        ));
        let submission_service = Arc::new(SubmissionService::new(
            submissions,
            content.clone(),
            users.clone(),
        ));
        let quiz_service = Arc::new(QuizService::new(quizzes, content, users.clone()));
        let review_service = Arc::new(CourseReviewService::new(reviews, courses, users));

        tracing::info!("Application state initialized");

        Ok(Self {
            config,
            db_pool,
            user_service,
            category_service,
            course_service,
            content_service,
            enrollment_service,
            submission_service,
            quiz_service,
            review_service,
        })
    }
}

async fn create_db_pool(config: &Config) -> Result<PgPool> {
    tracing::info!("Creating database connection pool...");

    let statement_timeout = config.database.statement_timeout_seconds;
    let lock_timeout = config.database.lock_timeout_seconds;

    let pool = sqlx::postgres::PgPoolOptions::new()
        .min_connections(config.database.pool_min_size)
        .max_connections(config.database.pool_max_size)
        .acquire_timeout(std::time::Duration::from_secs(
            config.database.pool_timeout_seconds,
        ))
        .after_connect(move |conn, _meta| {
            Box::pin(async move {
                sqlx::query(&format!("SET statement_timeout = '{}s'", statement_timeout))
                    .execute(&mut *conn)
                    .await?;

                sqlx::query(&format!("SET lock_timeout = '{}s'", lock_timeout))
                    .execute(&mut *conn)
                    .await?;

                Ok(())
            })
        })
        .connect(&config.database.url)
        .await
        .map_err(crate::Error::Database)?;

    tracing::info!(
        "Database pool created (min: {}, max: {})",
        config.database.pool_min_size,
        config.database.pool_max_size
    );

    Ok(pool)
}
