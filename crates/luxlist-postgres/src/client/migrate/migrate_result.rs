use std::time::Duration;

/// Outcome of a migration run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationResult {
    /// Total duration of the migration run.
    pub duration: Duration,
    /// Versions applied during this run, in order.
    pub applied_versions: Vec<String>,
}

impl MigrationResult {
    /// Creates a new migration result.
    pub fn new(duration: Duration, applied_versions: Vec<String>) -> Self {
        Self {
            duration,
            applied_versions,
        }
    }

    /// Returns whether the schema was already up to date.
    #[inline]
    pub fn is_no_op(&self) -> bool {
        self.applied_versions.is_empty()
    }

    /// Returns the last applied version, if any.
    pub fn last_applied_version(&self) -> Option<&str> {
        self.applied_versions.last().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_run_is_no_op() {
        let result = MigrationResult::new(Duration::from_millis(5), vec![]);
        assert!(result.is_no_op());
        assert_eq!(result.last_applied_version(), None);
    }

    #[test]
    fn last_applied_version_is_the_newest() {
        let versions = vec!["20250601000001".to_owned(), "20250601000002".to_owned()];
        let result = MigrationResult::new(Duration::from_millis(5), versions);
        assert!(!result.is_no_op());
        assert_eq!(result.last_applied_version(), Some("20250601000002"));
    }
}
