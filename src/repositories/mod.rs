pub mod question_repository;
pub mod student_statistics_repository;

pub use question_repository::{InMemoryQuestionRepository, QuestionRepository};
pub use student_statistics_repository::{
    InMemoryStudentStatisticsRepository, SharedStatistics, StudentStatisticsRepository,
};
