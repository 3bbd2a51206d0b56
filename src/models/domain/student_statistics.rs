use std::collections::HashMap;
use std::sync::Arc;

use crate::config::GradingPolicy;
use crate::errors::{AppError, AppResult};
use crate::models::domain::quiz_attempt::{AttemptKind, GradedAttempt, QuizAttempt};
use crate::models::domain::{Question, Quiz, Student, Verdict};
use crate::models::dto::response::StatisticsReport;

/// Submitted answers keyed by question.
pub type Answers = HashMap<Arc<Question>, String>;

/// Whether each question was answered correctly on its latest attempt.
pub type QuestionHistory = HashMap<Arc<Question>, bool>;

/// Attempt ledger and verdict state machine for one student.
///
/// The verdict starts `Pending`. A regular attempt scoring at least the pass
/// mark sets `Pass`; running out of regular attempts below it sets `Fail`.
/// Revision attempts only feed the question history.
#[derive(Debug)]
pub struct StudentStatistics {
    student: Student,
    policy: GradingPolicy,
    regular_attempts: Vec<QuizAttempt>,
    revision_attempts: Vec<QuizAttempt>,
    question_history: QuestionHistory,
    final_verdict: Verdict,
}

impl StudentStatistics {
    pub fn new(student: Student) -> Self {
        Self::with_policy(student, GradingPolicy::default())
    }

    pub fn with_policy(student: Student, policy: GradingPolicy) -> Self {
        StudentStatistics {
            student,
            policy,
            regular_attempts: Vec::new(),
            revision_attempts: Vec::new(),
            question_history: HashMap::new(),
            final_verdict: Verdict::Pending,
        }
    }

    /// Grades a regular quiz, records it and advances the verdict.
    pub fn take_quiz(&mut self, quiz: &Quiz, answers: &Answers) -> AppResult<f32> {
        self.ensure_pending()?;
        if self.regular_attempts.iter().any(|a| a.quiz_id == quiz.id()) {
            return Err(AppError::AlreadyAttempted(format!(
                "quiz {} was already submitted, generate a new one",
                quiz.id()
            )));
        }

        let graded = GradedAttempt::grade(quiz, answers)?;
        let score = graded.score();
        self.record_history(&graded);

        let attempt = QuizAttempt::from_graded(
            quiz.id(),
            AttemptKind::Regular,
            self.regular_attempts.len() + 1,
            &graded,
        );
        self.regular_attempts.push(attempt);
        self.update_final_verdict(score);

        log::info!(
            "{} scored {:.2} on regular attempt {} (verdict {})",
            self.student,
            score,
            self.regular_attempts.len(),
            self.final_verdict
        );
        Ok(score)
    }

    /// Grades a practice quiz. Never changes the verdict.
    pub fn take_revision_quiz(&mut self, quiz: &Quiz, answers: &Answers) -> AppResult<f32> {
        if self.revision_attempts.len() >= self.policy.max_revision_attempts {
            return Err(AppError::LimitExceeded(format!(
                "no more than {} revision quizzes may be taken",
                self.policy.max_revision_attempts
            )));
        }
        self.ensure_pending()?;

        let graded = GradedAttempt::grade(quiz, answers)?;
        let score = graded.score();
        self.record_history(&graded);

        let attempt = QuizAttempt::from_graded(
            quiz.id(),
            AttemptKind::Revision,
            self.revision_attempts.len() + 1,
            &graded,
        );
        self.revision_attempts.push(attempt);

        log::info!(
            "{} scored {:.2} on revision attempt {}",
            self.student,
            score,
            self.revision_attempts.len()
        );
        Ok(score)
    }

    fn ensure_pending(&self) -> AppResult<()> {
        if self.final_verdict.is_final() {
            return Err(AppError::TerminalState(format!(
                "{} already received verdict {}",
                self.student, self.final_verdict
            )));
        }
        Ok(())
    }

    fn record_history(&mut self, graded: &GradedAttempt) {
        for (question, correct) in &graded.outcomes {
            self.question_history.insert(question.clone(), *correct);
        }
    }

    fn update_final_verdict(&mut self, score: f32) {
        if score >= self.policy.pass_mark {
            self.final_verdict = Verdict::Pass;
        } else if self.regular_attempts.len() >= self.policy.max_regular_attempts {
            self.final_verdict = Verdict::Fail;
        }
    }

    pub fn student(&self) -> &Student {
        &self.student
    }

    pub fn policy(&self) -> GradingPolicy {
        self.policy
    }

    /// Regular attempts in submission order.
    pub fn regular_attempts(&self) -> &[QuizAttempt] {
        &self.regular_attempts
    }

    pub fn revision_attempts(&self) -> &[QuizAttempt] {
        &self.revision_attempts
    }

    pub fn question_history(&self) -> &QuestionHistory {
        &self.question_history
    }

    pub fn final_verdict(&self) -> Verdict {
        self.final_verdict
    }

    /// Score of `quiz` if it was submitted as a regular or revision attempt.
    pub fn score_for(&self, quiz: &Quiz) -> Option<f32> {
        self.regular_attempts
            .iter()
            .chain(self.revision_attempts.iter())
            .find(|a| a.quiz_id == quiz.id())
            .map(|a| a.score)
    }

    pub fn summary(&self) -> StatisticsReport {
        StatisticsReport {
            student: self.student.clone(),
            regular_scores: self.regular_attempts.iter().map(|a| a.score).collect(),
            revision_scores: self.revision_attempts.iter().map(|a| a.score).collect(),
            final_verdict: self.final_verdict,
        }
    }

    pub fn generate_statistics(&self) -> String {
        self.summary().to_string()
    }
}
