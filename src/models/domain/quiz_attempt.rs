use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::models::domain::{Answers, Question, Quiz};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub enum AttemptKind {
    Regular,
    Revision,
}

/// One recorded submission of a quiz.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct QuizAttempt {
    pub quiz_id: Uuid,
    pub kind: AttemptKind,
    pub score: f32,
    pub correct_count: usize,
    pub total_count: usize,
    pub attempt_number: usize, // 1-based within its kind
    pub submitted_at: DateTime<Utc>,
}

impl QuizAttempt {
    /// Create a new quiz attempt from grading results
    pub fn from_graded(
        quiz_id: Uuid,
        kind: AttemptKind,
        attempt_number: usize,
        graded: &GradedAttempt,
    ) -> Self {
        QuizAttempt {
            quiz_id,
            kind,
            score: graded.score(),
            correct_count: graded.correct_count,
            total_count: graded.total_count,
            attempt_number,
            submitted_at: Utc::now(),
        }
    }
}

/// Result of grading a quiz, before anything is recorded.
#[derive(Clone, Debug, PartialEq)]
pub struct GradedAttempt {
    pub outcomes: Vec<(Arc<Question>, bool)>,
    pub correct_count: usize,
    pub total_count: usize,
}

impl GradedAttempt {
    /// Grade a quiz against submitted answers keyed by question.
    ///
    /// Answers for questions outside the quiz are ignored; quiz questions
    /// without an answer are graded as incorrect.
    pub fn grade(quiz: &Quiz, answers: &Answers) -> AppResult<Self> {
        if quiz.is_empty() {
            return Err(AppError::InvalidArgument("Quiz has no questions".to_string()));
        }

        let outcomes: Vec<_> = quiz
            .iter()
            .map(|question| {
                let answer = answers.get(question).map(String::as_str);
                (question.clone(), question.is_correct_answer(answer))
            })
            .collect();

        let correct_count = outcomes.iter().filter(|(_, correct)| *correct).count();

        Ok(GradedAttempt {
            total_count: outcomes.len(),
            correct_count,
            outcomes,
        })
    }

    pub fn score(&self) -> f32 {
        if self.total_count == 0 {
            return 0.0;
        }
        self.correct_count as f32 / self.total_count as f32
    }
}
