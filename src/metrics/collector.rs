use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, OnceLock};

use jiff::Timestamp;
use parking_lot::{Mutex, RwLock};
use tracing::trace;

use crate::errors::Error;
use crate::retry::RetryOutcome;

use super::OperationMetrics;

/// Per-operation outcome statistics, safe to share between threads.
///
/// The map lock is only held to find or insert an entry; each entry carries its
/// own lock for the counter update, so unrelated operations never wait on each
/// other.
#[derive(Debug, Default)]
pub struct MetricsCollector {
    operations: RwLock<HashMap<String, Arc<Mutex<OperationMetrics>>>>,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide collector, created on first use and never torn down.
    pub fn global() -> Arc<MetricsCollector> {
        static GLOBAL: OnceLock<Arc<MetricsCollector>> = OnceLock::new();
        Arc::clone(GLOBAL.get_or_init(|| Arc::new(MetricsCollector::new())))
    }

    pub fn record_result(&self, operation: &str, outcome: &RetryOutcome) {
        let now = Timestamp::now();
        let existing = self.operations.read().get(operation).cloned();
        if let Some(entry) = existing {
            entry.lock().record(outcome, now);
            return;
        }

        // First record goes in under the map lock so snapshots never see an empty entry.
        let mut operations = self.operations.write();
        let entry = operations
            .entry(operation.to_string())
            .or_insert_with(|| {
                trace!(operation, "metrics.operation_tracked");
                Arc::new(Mutex::new(OperationMetrics::new(now)))
            });
        entry.lock().record(outcome, now);
    }

    pub fn get_metrics(&self, operation: &str) -> Option<OperationMetrics> {
        let entry = self.operations.read().get(operation).cloned()?;
        let metrics = entry.lock().clone();
        Some(metrics)
    }

    /// Copies every entry while holding the map lock, so a concurrent insert
    /// cannot slip in halfway through and no entry is read mid-update.
    pub fn get_all_metrics(&self) -> HashMap<String, OperationMetrics> {
        let operations = self.operations.read();
        operations
            .iter()
            .map(|(name, entry)| (name.clone(), entry.lock().clone()))
            .collect()
    }

    pub fn operation_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.operations.read().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.operations.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.read().is_empty()
    }

    /// JSON object keyed by operation name, entries in name order.
    pub fn export_json(&self) -> Result<String, Error> {
        let snapshot: BTreeMap<_, _> = self.get_all_metrics().into_iter().collect();
        Ok(serde_json::to_string(&snapshot)?)
    }
}
