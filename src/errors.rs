use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid question pool: {0}")]
    InvalidPoolState(String),

    #[error("Already attempted: {0}")]
    AlreadyAttempted(String),

    #[error("Final verdict already set: {0}")]
    TerminalState(String),

    #[error("Limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl AppError {
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::InvalidArgument(_) => "INVALID_ARGUMENT",
            AppError::InvalidPoolState(_) => "INVALID_POOL_STATE",
            AppError::AlreadyAttempted(_) => "ALREADY_ATTEMPTED",
            AppError::TerminalState(_) => "TERMINAL_STATE",
            AppError::LimitExceeded(_) => "LIMIT_EXCEEDED",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::InternalError(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::InvalidArgument(err.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for AppError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        AppError::InternalError(format!("registry lock poisoned: {}", err))
    }
}

pub type AppResult<T> = Result<T, AppError>;
