use std::env;
use std::str::FromStr;

use crate::errors::{AppError, AppResult};

/// Scoring thresholds applied to every student.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradingPolicy {
    pub pass_mark: f32,
    pub max_regular_attempts: usize,
    pub max_revision_attempts: usize,
}

impl Default for GradingPolicy {
    fn default() -> Self {
        Self {
            pass_mark: 0.5,
            max_regular_attempts: 2,
            max_revision_attempts: 2,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Json,
}

impl FromStr for ReportFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            other => Err(AppError::InvalidArgument(format!(
                "unknown report format '{}'",
                other
            ))),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub regular_quiz_size: usize,
    pub revision_quiz_size: usize,
    pub report_format: ReportFormat,
    pub grading: GradingPolicy,
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = GradingPolicy::default();
        Self {
            regular_quiz_size: env_or("QUIZ_REGULAR_SIZE", 4),
            revision_quiz_size: env_or("QUIZ_REVISION_SIZE", 3),
            report_format: env_or("QUIZ_REPORT_FORMAT", ReportFormat::Text),
            grading: GradingPolicy {
                pass_mark: env_or("QUIZ_PASS_MARK", defaults.pass_mark),
                max_regular_attempts: env_or(
                    "QUIZ_MAX_REGULAR_ATTEMPTS",
                    defaults.max_regular_attempts,
                ),
                max_revision_attempts: env_or(
                    "QUIZ_MAX_REVISION_ATTEMPTS",
                    defaults.max_revision_attempts,
                ),
            },
        }
    }

    /// Rejects policies that could never produce a verdict.
    pub fn validate(&self) -> AppResult<()> {
        let pass_mark = self.grading.pass_mark;
        if !(pass_mark > 0.0 && pass_mark <= 1.0) {
            return Err(AppError::InvalidArgument(format!(
                "pass mark must be in (0, 1], got {}",
                pass_mark
            )));
        }
        if self.grading.max_regular_attempts == 0 {
            return Err(AppError::InvalidArgument(
                "at least one regular attempt must be allowed".to_string(),
            ));
        }
        if self.grading.max_revision_attempts == 0 {
            return Err(AppError::InvalidArgument(
                "at least one revision attempt must be allowed".to_string(),
            ));
        }
        Ok(())
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            regular_quiz_size: 4,
            revision_quiz_size: 3,
            report_format: ReportFormat::Text,
            grading: GradingPolicy::default(),
        }
    }
}
