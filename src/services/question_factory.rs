use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use crate::{
    errors::{AppError, AppResult},
    models::domain::{Question, QuestionKind, QuestionType},
    repositories::QuestionRepository,
};

/// Hands out canonical question instances: asking twice for the same
/// (type, text) yields the same `Arc`.
pub struct QuestionFactory {
    repository: Arc<dyn QuestionRepository>,
}

impl QuestionFactory {
    pub fn new(repository: Arc<dyn QuestionRepository>) -> Self {
        Self { repository }
    }

    /// A cached question is returned as-is; `kind` is only validated when
    /// a new question has to be built.
    pub fn get_instance(
        &self,
        question_type: QuestionType,
        text: &str,
        kind: QuestionKind,
    ) -> AppResult<Arc<Question>> {
        if kind.question_type() != question_type {
            return Err(AppError::InvalidArgument(format!(
                "Incorrect question type: {} data supplied for a {} question",
                kind.question_type(),
                question_type
            )));
        }

        if let Some(cached) = self.repository.find(question_type, text)? {
            log::debug!("Question cache hit for '{}'", text);
            return Ok(cached);
        }

        let question = Question::new(text, kind)?;
        self.repository.insert_if_absent(question)
    }

    pub fn free_response(&self, text: &str, correct_answer: &str) -> AppResult<Arc<Question>> {
        self.get_instance(
            QuestionType::FreeResponse,
            text,
            QuestionKind::FreeResponse {
                correct_answer: correct_answer.to_string(),
            },
        )
    }

    pub fn multiple_choice(
        &self,
        text: &str,
        options: BTreeMap<char, String>,
        correct_options: BTreeSet<char>,
    ) -> AppResult<Arc<Question>> {
        self.get_instance(
            QuestionType::MultipleChoice,
            text,
            QuestionKind::MultipleChoice {
                options,
                correct_options,
            },
        )
    }

    pub fn cached_count(&self) -> AppResult<usize> {
        self.repository.count()
    }

    /// Drops every cached question.
    pub fn reset(&self) -> AppResult<()> {
        self.repository.clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::question_repository::MockQuestionRepository;
    use crate::repositories::InMemoryQuestionRepository;
    use crate::test_utils::fixtures::abcd;

    fn factory() -> QuestionFactory {
        QuestionFactory::new(Arc::new(InMemoryQuestionRepository::new()))
    }

    #[test]
    fn test_same_key_yields_same_instance() {
        let factory = factory();

        let first = factory.free_response("Capital of France?", "Paris").unwrap();
        let second = factory.free_response("Capital of France?", "Paris").unwrap();
        let other = factory.free_response("Capital of Czechia?", "Prague").unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert!(!Arc::ptr_eq(&first, &other));
        assert_eq!(factory.cached_count().unwrap(), 2);
    }

    #[test]
    fn test_existing_text_with_other_type_fails() {
        let factory = factory();
        factory.free_response("Pick one", "A").unwrap();

        let result = factory.multiple_choice("Pick one", abcd(), BTreeSet::from(['A']));
        assert!(matches!(result, Err(AppError::InvalidArgument(_))));
    }

    #[test]
    fn test_mismatched_kind_is_rejected_before_lookup() {
        // no expectations: any repository call would panic
        let factory = QuestionFactory::new(Arc::new(MockQuestionRepository::new()));

        let result = factory.get_instance(
            QuestionType::MultipleChoice,
            "Capital of France?",
            QuestionKind::FreeResponse {
                correct_answer: "Paris".to_string(),
            },
        );
        assert!(matches!(result, Err(AppError::InvalidArgument(_))));
    }

    #[test]
    fn test_cache_hit_skips_insert() {
        let cached = Arc::new(Question::free_response("Capital of France?", "Paris").unwrap());
        let returned = cached.clone();

        let mut repository = MockQuestionRepository::new();
        repository
            .expect_find()
            .times(1)
            .returning(move |_, _| Ok(Some(returned.clone())));
        repository.expect_insert_if_absent().never();

        let factory = QuestionFactory::new(Arc::new(repository));
        // invalid data is not checked on a cache hit
        let question = factory.free_response("Capital of France?", "").unwrap();
        assert!(Arc::ptr_eq(&question, &cached));
    }

    #[test]
    fn test_invalid_new_question_is_not_cached() {
        let factory = factory();

        let result = factory.multiple_choice("Pick", BTreeMap::new(), BTreeSet::from(['A']));
        assert!(matches!(result, Err(AppError::InvalidArgument(_))));
        assert_eq!(factory.cached_count().unwrap(), 0);
    }

    #[test]
    fn test_reset_clears_cache() {
        let factory = factory();
        let first = factory.free_response("Capital of France?", "Paris").unwrap();

        factory.reset().unwrap();
        let second = factory.free_response("Capital of France?", "Paris").unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(first, second);
    }
}
