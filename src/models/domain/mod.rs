pub mod question;
pub mod quiz;
pub mod quiz_attempt;
pub mod student;
pub mod student_statistics;
pub mod verdict;
pub use question::{Question, QuestionKind, QuestionType};
pub use quiz::Quiz;
pub use quiz_attempt::{AttemptKind, GradedAttempt, QuizAttempt};
pub use student::Student;
pub use student_statistics::{Answers, QuestionHistory, StudentStatistics};
pub use verdict::Verdict;
