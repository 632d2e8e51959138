//! Load summary and reporting
//!
//! This module defines the counts reported after a collection load.

use crate::domain::UpsertOutcome;
use chrono::{DateTime, Utc};
use std::time::Duration;

/// Summary of a completed collection load
#[derive(Debug, Clone, PartialEq)]
pub struct LoadSummary {
    /// YAML file the documents were read from
    pub filename: String,

    /// Number of documents processed
    pub total: usize,

    /// Number of documents inserted as new records
    pub inserted: usize,

    /// Number of existing records replaced
    pub updated: usize,

    /// Duration of the load
    pub duration: Duration,

    /// When the load started
    pub started_at: DateTime<Utc>,
}

impl LoadSummary {
    /// Create an empty summary for `filename`
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            total: 0,
            inserted: 0,
            updated: 0,
            duration: Duration::ZERO,
            started_at: Utc::now(),
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Count one upserted document
    pub fn record(&mut self, outcome: &UpsertOutcome) {
        self.total += 1;
        if outcome.was_update {
            self.updated += 1;
        } else {
            self.inserted += 1;
        }
    }

    /// Every processed document was either inserted or updated
    pub fn is_consistent(&self) -> bool {
        self.inserted + self.updated == self.total
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            filename = %self.filename,
            total = self.total,
            updated = self.updated,
            inserted = self.inserted,
            duration_secs = format!("{:.4}", self.duration.as_secs_f64()),
            started_at = %self.started_at.to_rfc3339(),
            "Load completed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::Bson;

    #[test]
    fn test_load_summary_new() {
        let summary = LoadSummary::new("data.yaml");
        assert_eq!(summary.filename, "data.yaml");
        assert_eq!(summary.total, 0);
        assert_eq!(summary.inserted, 0);
        assert_eq!(summary.updated, 0);
        assert_eq!(summary.duration, Duration::ZERO);
        assert!(summary.is_consistent());
    }

    #[test]
    fn test_record_counts() {
        let mut summary = LoadSummary::new("data.yaml");
        summary.record(&UpsertOutcome::inserted(Bson::Int32(1)));
        summary.record(&UpsertOutcome::inserted(Bson::Int32(2)));
        summary.record(&UpsertOutcome::updated(Bson::Int32(3)));

        assert_eq!(summary.total, 3);
        assert_eq!(summary.inserted, 2);
        assert_eq!(summary.updated, 1);
        assert!(summary.is_consistent());
    }

    #[test]
    fn test_with_duration() {
        let summary = LoadSummary::new("data.yaml").with_duration(Duration::from_millis(1500));
        assert_eq!(summary.duration.as_millis(), 1500);
    }

    #[test]
    fn test_inconsistent_counts_detected() {
        let mut summary = LoadSummary::new("data.yaml");
        summary.total = 2;
        summary.inserted = 1;
        assert!(!summary.is_consistent());
    }
}
