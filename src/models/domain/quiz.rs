use std::sync::Arc;

use uuid::Uuid;

use crate::models::domain::question::{Question, QuestionType};

/// An ordered list of questions. Identity is the `id` assigned on creation;
/// clones keep it, so a cloned quiz counts as the same quiz when submitted.
#[derive(Clone, Debug, PartialEq)]
pub struct Quiz {
    id: Uuid,
    questions: Vec<Arc<Question>>,
}

impl Default for Quiz {
    fn default() -> Self {
        Self::new()
    }
}

impl Quiz {
    pub fn new() -> Self {
        Quiz {
            id: Uuid::new_v4(),
            questions: Vec::new(),
        }
    }

    pub fn with_questions(questions: Vec<Arc<Question>>) -> Self {
        Quiz {
            id: Uuid::new_v4(),
            questions,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn add_question(&mut self, question: Arc<Question>) {
        self.questions.push(question);
    }

    /// Removes the first question equal to `question`; no-op if absent.
    pub fn remove_question(&mut self, question: &Question) {
        if let Some(index) = self.questions.iter().position(|q| **q == *question) {
            self.questions.remove(index);
        }
    }

    /// Returns an independent snapshot of the questions.
    pub fn questions(&self) -> Vec<Arc<Question>> {
        self.questions.clone()
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn contains(&self, question: &Question) -> bool {
        self.questions.iter().any(|q| **q == *question)
    }

    pub fn count_of_type(&self, question_type: QuestionType) -> usize {
        self.questions
            .iter()
            .filter(|q| q.question_type() == question_type)
            .count()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Arc<Question>> {
        self.questions.iter()
    }
}
