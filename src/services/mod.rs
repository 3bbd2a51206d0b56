pub mod question_factory;
pub mod quiz_generator;
pub mod student_service;

pub use question_factory::QuestionFactory;
pub use quiz_generator::QuizGenerator;
pub use student_service::StudentService;
