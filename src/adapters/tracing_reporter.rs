//! Error reporter that writes to the tracing log.

use tracing::{error, warn};

use crate::error::ReconcileError;
use crate::traits::{ErrorReporter, LoopKind};

/// Logs every reported error; retryable kinds at `warn`, the rest at `error`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl ErrorReporter for TracingReporter {
    fn report(&self, source: LoopKind, err: &ReconcileError) {
        let kind = err.kind();
        if kind.is_retryable() {
            warn!(loop_kind = %source, kind = %kind, "{}", err);
        } else {
            error!(loop_kind = %source, kind = %kind, "{}", err);
        }
    }
}
