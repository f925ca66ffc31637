//! Error reporter that records reported kinds.

use std::sync::{Arc, Mutex};

use crate::error::{ErrorKind, ReconcileError};
use crate::traits::{ErrorReporter, LoopKind};

/// Records `(loop, kind)` for every reported error.
#[derive(Debug, Clone, Default)]
pub struct RecordingReporter {
    reports: Arc<Mutex<Vec<(LoopKind, ErrorKind)>>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> Vec<(LoopKind, ErrorKind)> {
        self.reports.lock().unwrap().clone()
    }

    /// Number of reports of `kind` from any loop.
    pub fn count(&self, kind: ErrorKind) -> usize {
        self.reports
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, k)| *k == kind)
            .count()
    }

    /// Number of reports of `kind` from `source`.
    pub fn count_from(&self, source: LoopKind, kind: ErrorKind) -> usize {
        self.reports
            .lock()
            .unwrap()
            .iter()
            .filter(|(s, k)| *s == source && *k == kind)
            .count()
    }
}

impl ErrorReporter for RecordingReporter {
    fn report(&self, source: LoopKind, error: &ReconcileError) {
        self.reports.lock().unwrap().push((source, error.kind()));
    }
}
