use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::errors::{AppError, AppResult};

pub const MIN_OPTIONS: usize = 2;
pub const MAX_OPTIONS: usize = 4;

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct CreateFreeResponseRequest {
    #[validate(length(min = 1, message = "Question text cannot be empty"))]
    pub text: String,

    #[validate(length(min = 1, message = "Correct answer cannot be empty"))]
    pub correct_answer: String,
}

impl CreateFreeResponseRequest {
    pub fn check(&self) -> AppResult<()> {
        self.validate()?;
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct CreateMultipleChoiceRequest {
    #[validate(length(min = 1, message = "Question text cannot be empty"))]
    pub text: String,

    /// Option letter to option text, e.g. `'A' -> "France"`.
    pub options: BTreeMap<char, String>,

    pub correct_options: BTreeSet<char>,
}

impl CreateMultipleChoiceRequest {
    /// Field validation plus the option/correct-option cross checks.
    pub fn check(&self) -> AppResult<()> {
        self.validate()?;

        if self.options.len() < MIN_OPTIONS || self.options.len() > MAX_OPTIONS {
            return Err(AppError::InvalidArgument(format!(
                "Number of options must be between {} and {}, got {}",
                MIN_OPTIONS,
                MAX_OPTIONS,
                self.options.len()
            )));
        }
        if self.correct_options.is_empty() {
            return Err(AppError::InvalidArgument(
                "Correct options cannot be empty".to_string(),
            ));
        }
        if self.correct_options.len() > self.options.len() {
            return Err(AppError::InvalidArgument(
                "Number of correct options exceeds the number of available options".to_string(),
            ));
        }

        let keys: BTreeSet<char> = self.options.keys().flat_map(|c| c.to_lowercase()).collect();
        if let Some(unknown) = self
            .correct_options
            .iter()
            .find(|c| !c.to_lowercase().all(|l| keys.contains(&l)))
        {
            return Err(AppError::InvalidArgument(format!(
                "Correct option '{}' is not one of the available options",
                unknown
            )));
        }

        Ok(())
    }
}
