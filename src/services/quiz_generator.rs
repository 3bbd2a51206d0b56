use std::collections::HashSet;
use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::{
    errors::{AppError, AppResult},
    models::domain::{Question, QuestionHistory, QuestionType, Quiz},
};

/// Builds quizzes from a deduplicated pool of questions.
///
/// Regular quizzes need both question types in the pool and always open
/// with one free-response and one multiple-choice question. Revision
/// quizzes draw only from questions the student has not answered correctly
/// on their latest attempt, and balance types on a best-effort basis.
#[derive(Clone, Debug, Default)]
pub struct QuizGenerator {
    pool: Vec<Arc<Question>>,
}

impl QuizGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pool<I>(questions: I) -> Self
    where
        I: IntoIterator<Item = Arc<Question>>,
    {
        let mut generator = Self::new();
        for question in questions {
            generator.add_question(question);
        }
        generator
    }

    /// Returns `false` if an equal question is already in the pool.
    pub fn add_question(&mut self, question: Arc<Question>) -> bool {
        if self.pool.contains(&question) {
            return false;
        }
        self.pool.push(question);
        true
    }

    pub fn pool(&self) -> &[Arc<Question>] {
        &self.pool
    }

    pub fn generate_quiz(&self, number_of_questions: usize) -> AppResult<Quiz> {
        self.generate_quiz_with_rng(number_of_questions, &mut rand::thread_rng())
    }

    pub fn generate_quiz_with_rng<R: Rng + ?Sized>(
        &self,
        number_of_questions: usize,
        rng: &mut R,
    ) -> AppResult<Quiz> {
        let (free_response, multiple_choice) = partition(self.pool.iter());

        if free_response.is_empty() || multiple_choice.is_empty() {
            return Err(AppError::InvalidPoolState(
                "The question pool must contain questions of both types".to_string(),
            ));
        }
        if number_of_questions < 2 {
            return Err(AppError::InvalidArgument(
                "You must select at least 2 questions to generate a quiz".to_string(),
            ));
        }

        let selected = select(free_response, multiple_choice, number_of_questions, true, rng)?;
        let quiz = Quiz::with_questions(selected);
        log::info!(
            "Generated regular quiz with {} questions ({} free-response) from a pool of {}",
            quiz.len(),
            quiz.count_of_type(QuestionType::FreeResponse),
            self.pool.len()
        );
        Ok(quiz)
    }

    pub fn revise(&self, history: &QuestionHistory, number_of_questions: usize) -> AppResult<Quiz> {
        self.revise_with_rng(history, number_of_questions, &mut rand::thread_rng())
    }

    pub fn revise_with_rng<R: Rng + ?Sized>(
        &self,
        history: &QuestionHistory,
        number_of_questions: usize,
        rng: &mut R,
    ) -> AppResult<Quiz> {
        let unseen_or_incorrect = self
            .pool
            .iter()
            .filter(|question| history.get(*question) != Some(&true));
        let (free_response, multiple_choice) = partition(unseen_or_incorrect);

        if number_of_questions < 1 {
            return Err(AppError::InvalidArgument(
                "You must select at least 1 question to generate a revision quiz".to_string(),
            ));
        }

        let balance = number_of_questions >= 2;
        let selected = select(free_response, multiple_choice, number_of_questions, balance, rng)?;
        log::info!("Generated revision quiz with {} questions", selected.len());
        Ok(Quiz::with_questions(selected))
    }
}

fn partition<'a, I>(questions: I) -> (Vec<Arc<Question>>, Vec<Arc<Question>>)
where
    I: Iterator<Item = &'a Arc<Question>>,
{
    questions
        .cloned()
        .partition(|q| q.question_type() == QuestionType::FreeResponse)
}

/// With `balance`, the first question of each non-empty type list is taken
/// up front; the rest is a uniform sample of what remains.
fn select<R: Rng + ?Sized>(
    mut free_response: Vec<Arc<Question>>,
    mut multiple_choice: Vec<Arc<Question>>,
    number_of_questions: usize,
    balance: bool,
    rng: &mut R,
) -> AppResult<Vec<Arc<Question>>> {
    let mut selected = Vec::with_capacity(number_of_questions);

    if balance {
        if !free_response.is_empty() {
            selected.push(free_response.remove(0));
        }
        if !multiple_choice.is_empty() {
            selected.push(multiple_choice.remove(0));
        }
    }

    let mut remaining: Vec<_> = free_response.into_iter().chain(multiple_choice).collect();
    let needed = number_of_questions.saturating_sub(selected.len());
    if needed > remaining.len() {
        return Err(AppError::InvalidArgument(format!(
            "Not enough questions in the pool for the chosen amount ({} requested, {} available)",
            number_of_questions,
            selected.len() + remaining.len()
        )));
    }

    remaining.shuffle(rng);
    remaining.truncate(needed);
    selected.extend(remaining);

    debug_assert_eq!(
        selected.iter().collect::<HashSet<_>>().len(),
        selected.len(),
        "a quiz never repeats a pooled question"
    );
    Ok(selected)
}
