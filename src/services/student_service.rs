use std::sync::Arc;

use crate::{
    errors::{AppError, AppResult},
    models::domain::{Answers, Quiz, Student, Verdict},
    models::dto::response::StatisticsReport,
    repositories::{SharedStatistics, StudentStatisticsRepository},
    services::QuizGenerator,
};

/// Registry-backed entry point for attempt submission. Each call locks the
/// student's statistics for its whole duration.
pub struct StudentService {
    repository: Arc<dyn StudentStatisticsRepository>,
}

impl StudentService {
    pub fn new(repository: Arc<dyn StudentStatisticsRepository>) -> Self {
        Self { repository }
    }

    pub fn statistics_for(&self, student: &Student) -> AppResult<SharedStatistics> {
        self.repository.get_or_create(student)
    }

    pub fn take_quiz(&self, student: &Student, quiz: &Quiz, answers: &Answers) -> AppResult<f32> {
        let statistics = self.repository.get_or_create(student)?;
        let mut statistics = statistics.lock()?;
        statistics.take_quiz(quiz, answers).inspect_err(|err| {
            log::warn!("Rejected regular attempt by {}: {}", student, err);
        })
    }

    pub fn take_revision_quiz(
        &self,
        student: &Student,
        quiz: &Quiz,
        answers: &Answers,
    ) -> AppResult<f32> {
        let statistics = self.repository.get_or_create(student)?;
        let mut statistics = statistics.lock()?;
        statistics.take_revision_quiz(quiz, answers).inspect_err(|err| {
            log::warn!("Rejected revision attempt by {}: {}", student, err);
        })
    }

    /// Builds a revision quiz from the student's current question history.
    pub fn revise(
        &self,
        generator: &QuizGenerator,
        student: &Student,
        number_of_questions: usize,
    ) -> AppResult<Quiz> {
        let statistics = self.repository.get_or_create(student)?;
        let history = statistics.lock()?.question_history().clone();
        generator.revise(&history, number_of_questions)
    }

    pub fn verdict(&self, student: &Student) -> AppResult<Verdict> {
        let statistics = self.existing(student)?;
        let verdict = statistics.lock()?.final_verdict();
        Ok(verdict)
    }

    pub fn report(&self, student: &Student) -> AppResult<StatisticsReport> {
        let statistics = self.existing(student)?;
        let report = statistics.lock()?.summary();
        Ok(report)
    }

    fn existing(&self, student: &Student) -> AppResult<SharedStatistics> {
        self.repository
            .find(student)?
            .ok_or_else(|| AppError::NotFound(format!("No statistics recorded for {}", student)))
    }
}
