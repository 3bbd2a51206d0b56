use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Student {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
}

impl Student {
    pub fn new(first_name: &str, last_name: &str, date_of_birth: NaiveDate) -> Self {
        Student {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            date_of_birth,
        }
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({})",
            self.first_name,
            self.last_name,
            self.date_of_birth.format("%Y-%m-%d")
        )
    }
}
