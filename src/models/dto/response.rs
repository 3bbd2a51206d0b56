use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::domain::{Student, Verdict};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StatisticsReport {
    pub student: Student,
    pub regular_scores: Vec<f32>,
    pub revision_scores: Vec<f32>,
    pub final_verdict: Verdict,
}

fn write_scores(f: &mut fmt::Formatter<'_>, label: &str, scores: &[f32]) -> fmt::Result {
    writeln!(f, "Attempted {} Quizzes: {}", label, scores.len())?;
    for (index, score) in scores.iter().enumerate() {
        writeln!(f, "Quiz {}: Score {:.2}", index + 1, score)?;
    }
    Ok(())
}

impl fmt::Display for StatisticsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Student Statistics:")?;
        writeln!(f, "{}", self.student)?;
        write_scores(f, "Regular", &self.regular_scores)?;
        write_scores(f, "Revision", &self.revision_scores)?;
        writeln!(f, "Final Verdict: {}", self.final_verdict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn report() -> StatisticsReport {
        StatisticsReport {
            student: Student::new("Bob", "Smith", NaiveDate::from_ymd_opt(2001, 7, 24).unwrap()),
            regular_scores: vec![1.0],
            revision_scores: vec![0.75],
            final_verdict: Verdict::Pass,
        }
    }

    #[test]
    fn test_report_text_layout() {
        let expected = "Student Statistics:\n\
                        Bob Smith (2001-07-24)\n\
                        Attempted Regular Quizzes: 1\n\
                        Quiz 1: Score 1.00\n\
                        Attempted Revision Quizzes: 1\n\
                        Quiz 1: Score 0.75\n\
                        Final Verdict: PASS\n";

        assert_eq!(report().to_string(), expected);
    }

    #[test]
    fn test_report_serialization() {
        let json = serde_json::to_string(&report()).unwrap();
        assert!(json.contains("\"final_verdict\":\"Pass\""));
        assert!(json.contains("\"regular_scores\":[1.0]"));
    }
}
