use std::sync::Arc;

use crate::{
    config::Config,
    errors::AppResult,
    repositories::{InMemoryQuestionRepository, InMemoryStudentStatisticsRepository},
    services::{QuestionFactory, StudentService},
};

/// Process-scoped context owning the question cache and the student
/// statistics registry.
#[derive(Clone)]
pub struct AppState {
    pub question_factory: Arc<QuestionFactory>,
    pub student_service: Arc<StudentService>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> AppResult<Self> {
        config.validate()?;

        let question_repository = Arc::new(InMemoryQuestionRepository::new());
        let question_factory = Arc::new(QuestionFactory::new(question_repository));

        let statistics_repository = Arc::new(InMemoryStudentStatisticsRepository::new(config.grading));
        let student_service = Arc::new(StudentService::new(statistics_repository));

        Ok(Self {
            question_factory,
            student_service,
            config: Arc::new(config),
        })
    }
}
