use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use crate::{
    config::GradingPolicy,
    errors::AppResult,
    models::domain::{Student, StudentStatistics},
};

pub type SharedStatistics = Arc<Mutex<StudentStatistics>>;

#[cfg_attr(test, mockall::automock)]
pub trait StudentStatisticsRepository: Send + Sync {
    /// Returns the one statistics instance for `student`, creating it on
    /// first request.
    fn get_or_create(&self, student: &Student) -> AppResult<SharedStatistics>;
    fn find(&self, student: &Student) -> AppResult<Option<SharedStatistics>>;
    fn count(&self) -> AppResult<usize>;
}

pub struct InMemoryStudentStatisticsRepository {
    policy: GradingPolicy,
    statistics: RwLock<HashMap<Student, SharedStatistics>>,
}

impl InMemoryStudentStatisticsRepository {
    pub fn new(policy: GradingPolicy) -> Self {
        Self {
            policy,
            statistics: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryStudentStatisticsRepository {
    fn default() -> Self {
        Self::new(GradingPolicy::default())
    }
}

impl StudentStatisticsRepository for InMemoryStudentStatisticsRepository {
    fn get_or_create(&self, student: &Student) -> AppResult<SharedStatistics> {
        if let Some(existing) = self.statistics.read()?.get(student) {
            return Ok(existing.clone());
        }

        // re-checked under the write lock so racing callers share one instance
        let mut statistics = self.statistics.write()?;
        let entry = statistics.entry(student.clone()).or_insert_with(|| {
            log::debug!("Creating statistics for {}", student);
            Arc::new(Mutex::new(StudentStatistics::with_policy(
                student.clone(),
                self.policy,
            )))
        });
        Ok(entry.clone())
    }

    fn find(&self, student: &Student) -> AppResult<Option<SharedStatistics>> {
        Ok(self.statistics.read()?.get(student).cloned())
    }

    fn count(&self) -> AppResult<usize> {
        Ok(self.statistics.read()?.len())
    }
}
