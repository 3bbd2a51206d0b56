use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::{
    errors::{AppError, AppResult},
    models::domain::{Question, QuestionType},
};

#[cfg_attr(test, mockall::automock)]
pub trait QuestionRepository: Send + Sync {
    fn find(&self, question_type: QuestionType, text: &str) -> AppResult<Option<Arc<Question>>>;
    /// Stores `question` unless its text is already cached, returning the
    /// canonical instance either way.
    fn insert_if_absent(&self, question: Question) -> AppResult<Arc<Question>>;
    fn count(&self) -> AppResult<usize>;
    fn clear(&self) -> AppResult<()>;
}

fn type_conflict(text: &str, cached: QuestionType, requested: QuestionType) -> AppError {
    AppError::InvalidArgument(format!(
        "question '{}' is already registered as {}, not {}",
        text, cached, requested
    ))
}

/// Question cache keyed by question text.
#[derive(Default)]
pub struct InMemoryQuestionRepository {
    questions: RwLock<HashMap<String, Arc<Question>>>,
}

impl InMemoryQuestionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl QuestionRepository for InMemoryQuestionRepository {
    fn find(&self, question_type: QuestionType, text: &str) -> AppResult<Option<Arc<Question>>> {
        let questions = self.questions.read()?;
        match questions.get(text) {
            Some(cached) if cached.question_type() != question_type => {
                Err(type_conflict(text, cached.question_type(), question_type))
            }
            other => Ok(other.cloned()),
        }
    }

    fn insert_if_absent(&self, question: Question) -> AppResult<Arc<Question>> {
        let mut questions = self.questions.write()?;
        if let Some(cached) = questions.get(question.text()) {
            if cached.question_type() != question.question_type() {
                return Err(type_conflict(
                    question.text(),
                    cached.question_type(),
                    question.question_type(),
                ));
            }
            return Ok(cached.clone());
        }

        log::debug!("Caching {} question '{}'", question.question_type(), question.text());
        let question = Arc::new(question);
        questions.insert(question.text().to_string(), question.clone());
        Ok(question)
    }

    fn count(&self) -> AppResult<usize> {
        Ok(self.questions.read()?.len())
    }

    fn clear(&self) -> AppResult<()> {
        self.questions.write()?.clear();
        Ok(())
    }
}
