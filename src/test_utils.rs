use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use chrono::NaiveDate;

use crate::models::domain::{Answers, Question, Student};

#[cfg(test)]
pub mod fixtures {
    use super::*;

    /// Question pool shared by the grading and generation tests.
    pub struct QuestionSet {
        pub frq1: Arc<Question>,
        pub frq2: Arc<Question>,
        pub frq3: Arc<Question>,
        pub mcq1: Arc<Question>,
        pub mcq2: Arc<Question>,
        pub mcq3: Arc<Question>,
    }

    impl QuestionSet {
        pub fn all(&self) -> Vec<Arc<Question>> {
            vec![
                self.frq1.clone(),
                self.frq2.clone(),
                self.frq3.clone(),
                self.mcq1.clone(),
                self.mcq2.clone(),
                self.mcq3.clone(),
            ]
        }

        pub fn free_response(&self) -> Vec<Arc<Question>> {
            vec![self.frq1.clone(), self.frq2.clone(), self.frq3.clone()]
        }

        pub fn multiple_choice(&self) -> Vec<Arc<Question>> {
            vec![self.mcq1.clone(), self.mcq2.clone(), self.mcq3.clone()]
        }
    }

    pub fn abcd() -> BTreeMap<char, String> {
        BTreeMap::from([
            ('A', "1".to_string()),
            ('B', "2".to_string()),
            ('C', "3".to_string()),
            ('D', "4".to_string()),
        ])
    }

    pub fn free_response(text: &str, answer: &str) -> Arc<Question> {
        Arc::new(Question::free_response(text, answer).expect("fixture question is valid"))
    }

    pub fn multiple_choice(text: &str, correct: &[char]) -> Arc<Question> {
        Arc::new(
            Question::multiple_choice(text, abcd(), correct.iter().copied().collect::<BTreeSet<_>>())
                .expect("fixture question is valid"),
        )
    }

    pub fn question_set() -> QuestionSet {
        QuestionSet {
            frq1: free_response("What is the capital of France?", "Paris"),
            frq2: free_response("What is 1+1?", "2"),
            frq3: free_response("What is the capital of Italy?", "Rome"),
            mcq1: multiple_choice("Which numbers are even?", &['B', 'D']),
            mcq2: multiple_choice("Which numbers are not 3?", &['A', 'B', 'D']),
            mcq3: multiple_choice("Which number is odd and above 2?", &['C']),
        }
    }

    pub fn bob() -> Student {
        Student::new("Bob", "Smith", NaiveDate::from_ymd_opt(2001, 7, 24).unwrap())
    }

    pub fn jim() -> Student {
        Student::new("Jim", "Brown", NaiveDate::from_ymd_opt(2000, 4, 20).unwrap())
    }

    pub fn answers(pairs: &[(&Arc<Question>, &str)]) -> Answers {
        pairs
            .iter()
            .map(|(question, answer)| ((*question).clone(), answer.to_string()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use crate::models::domain::QuestionType;

    #[test]
    fn test_fixtures_question_set_types() {
        let set = question_set();
        assert!(set
            .free_response()
            .iter()
            .all(|q| q.question_type() == QuestionType::FreeResponse));
        assert!(set
            .multiple_choice()
            .iter()
            .all(|q| q.question_type() == QuestionType::MultipleChoice));
        assert_eq!(set.all().len(), 6);
    }

    #[test]
    fn test_fixtures_answers() {
        let set = question_set();
        let answers = answers(&[(&set.frq1, "Paris")]);
        assert_eq!(answers.get(&set.frq1).map(String::as_str), Some("Paris"));
    }

    #[test]
    fn test_fixtures_students_differ() {
        assert_ne!(bob(), jim());
    }
}
