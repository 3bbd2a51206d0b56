use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::AppResult;
use crate::models::dto::request::{CreateFreeResponseRequest, CreateMultipleChoiceRequest};

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("WHITESPACE_RUN is a valid regex pattern"));

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum QuestionType {
    FreeResponse,
    MultipleChoice,
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionType::FreeResponse => write!(f, "FREE_RESPONSE"),
            QuestionType::MultipleChoice => write!(f, "MULTIPLE_CHOICE"),
        }
    }
}

/// Correctness data carried by each question variant.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuestionKind {
    FreeResponse {
        correct_answer: String,
    },
    MultipleChoice {
        options: BTreeMap<char, String>,
        /// Always stored lowercased.
        correct_options: BTreeSet<char>,
    },
}

impl QuestionKind {
    pub fn question_type(&self) -> QuestionType {
        match self {
            QuestionKind::FreeResponse { .. } => QuestionType::FreeResponse,
            QuestionKind::MultipleChoice { .. } => QuestionType::MultipleChoice,
        }
    }
}

/// An immutable quiz question. Equality and hashing are by value, so two
/// questions built from the same text and correctness data are interchangeable
/// as map keys.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Question {
    text: String,
    kind: QuestionKind,
}

impl Question {
    pub fn free_response(text: &str, correct_answer: &str) -> AppResult<Self> {
        let request = CreateFreeResponseRequest {
            text: text.to_string(),
            correct_answer: correct_answer.to_string(),
        };
        request.check()?;

        Ok(Question {
            text: request.text,
            kind: QuestionKind::FreeResponse {
                correct_answer: request.correct_answer,
            },
        })
    }

    pub fn multiple_choice(
        text: &str,
        options: BTreeMap<char, String>,
        correct_options: BTreeSet<char>,
    ) -> AppResult<Self> {
        let request = CreateMultipleChoiceRequest {
            text: text.to_string(),
            options,
            correct_options,
        };
        request.check()?;

        Ok(Question {
            text: request.text,
            kind: QuestionKind::MultipleChoice {
                options: request.options,
                correct_options: request
                    .correct_options
                    .iter()
                    .flat_map(|c| c.to_lowercase())
                    .collect(),
            },
        })
    }

    /// Builds a question from already-tagged correctness data.
    pub fn new(text: &str, kind: QuestionKind) -> AppResult<Self> {
        match kind {
            QuestionKind::FreeResponse { correct_answer } => {
                Self::free_response(text, &correct_answer)
            }
            QuestionKind::MultipleChoice {
                options,
                correct_options,
            } => Self::multiple_choice(text, options, correct_options),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn question_type(&self) -> QuestionType {
        self.kind.question_type()
    }

    /// Only multiple-choice questions have options.
    pub fn options(&self) -> Option<&BTreeMap<char, String>> {
        match &self.kind {
            QuestionKind::MultipleChoice { options, .. } => Some(options),
            QuestionKind::FreeResponse { .. } => None,
        }
    }

    /// An absent answer is always incorrect.
    pub fn is_correct_answer(&self, answer: Option<&str>) -> bool {
        let Some(answer) = answer else {
            return false;
        };

        match &self.kind {
            QuestionKind::FreeResponse { correct_answer } => {
                normalize_free_text(answer) == normalize_free_text(correct_answer)
            }
            QuestionKind::MultipleChoice {
                correct_options, ..
            } => {
                // "a, c" -> {'a', 'c'}; only the first letter of each item counts
                let selected: BTreeSet<char> = answer
                    .split(',')
                    .filter_map(|item| item.trim().chars().next())
                    .flat_map(|c| c.to_lowercase())
                    .collect();
                !selected.is_empty() && selected == *correct_options
            }
        }
    }
}

fn normalize_free_text(input: &str) -> String {
    WHITESPACE_RUN
        .replace_all(input.trim(), " ")
        .to_lowercase()
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            QuestionKind::FreeResponse { .. } => write!(f, "{}", self.text),
            QuestionKind::MultipleChoice { options, .. } => {
                write!(f, "{}", self.text)?;
                for (letter, option) in options {
                    write!(f, " [{}] {}", letter, option)?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;

    fn eu_question() -> Question {
        Question::multiple_choice(
            "Which are member countries of the EU?",
            BTreeMap::from([
                ('A', "United Kingdom".to_string()),
                ('B', "France".to_string()),
                ('C', "Germany".to_string()),
                ('D', "United States".to_string()),
            ]),
            BTreeSet::from(['B', 'C']),
        )
        .unwrap()
    }

    #[test]
    fn test_free_response_normalizes_case_and_whitespace() {
        let question = Question::free_response("Where is Times Square located?", "New York").unwrap();

        assert!(question.is_correct_answer(Some("New York")));
        assert!(question.is_correct_answer(Some("new york")));
        assert!(question.is_correct_answer(Some("NEW YORK")));
        assert!(question.is_correct_answer(Some("   neW     yoRK    ")));
        assert!(!question.is_correct_answer(Some("newyork")));
        assert!(!question.is_correct_answer(Some("Paris")));
        assert!(!question.is_correct_answer(None));
    }

    #[test]
    fn test_free_response_rejects_empty_input() {
        assert!(matches!(
            Question::free_response("", "Paris"),
            Err(AppError::InvalidArgument(_))
        ));
        assert!(Question::free_response("Capital of France?", "").is_err());
    }

    #[test]
    fn test_multiple_choice_answer_matching() {
        let question = eu_question();

        assert!(question.is_correct_answer(Some("B,C")));
        assert!(question.is_correct_answer(Some("c, b")));
        assert!(question.is_correct_answer(Some(" b ,c")));
        assert!(question.is_correct_answer(Some("b,c,b")));
        assert!(!question.is_correct_answer(Some("a,b")));
        assert!(!question.is_correct_answer(Some("b")));
        assert!(!question.is_correct_answer(Some("b,c,d")));
        assert!(!question.is_correct_answer(Some("")));
        assert!(!question.is_correct_answer(Some(" , ")));
        assert!(!question.is_correct_answer(None));
    }

    #[test]
    fn test_multiple_choice_exposes_options() {
        let question = eu_question();
        assert_eq!(question.question_type(), QuestionType::MultipleChoice);
        assert_eq!(question.options().map(|o| o.len()), Some(4));

        let free = Question::free_response("Capital of France?", "Paris").unwrap();
        assert!(free.options().is_none());
    }

    #[test]
    fn test_value_equality() {
        let a = Question::free_response("Capital of France?", "Paris").unwrap();
        let b = Question::free_response("Capital of France?", "Paris").unwrap();
        let c = Question::free_response("Capital of France?", "Lyon").unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(eu_question(), eu_question());
    }

    #[test]
    fn test_new_dispatches_on_kind() {
        let question = Question::new(
            "Capital of Czechia?",
            QuestionKind::FreeResponse {
                correct_answer: "Prague".to_string(),
            },
        )
        .unwrap();

        assert_eq!(question.question_type(), QuestionType::FreeResponse);
        assert_eq!(question.text(), "Capital of Czechia?");
    }

    #[test]
    fn test_kind_serializes_with_type_tag() {
        let question = Question::free_response("Capital of France?", "Paris").unwrap();
        let json = serde_json::to_string(&question).expect("question should serialize");

        assert!(json.contains("\"type\":\"free_response\""));
        let parsed: Question = serde_json::from_str(&json).expect("question should deserialize");
        assert_eq!(parsed, question);
    }
}
