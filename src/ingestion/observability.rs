use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use crate::error::CalendarError;

/// Severity of a failed load, used for observer callbacks and alerting thresholds.
///
/// Every failure aborts the load, so there is no level below `Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LoadSeverity {
    /// Error-level event (load failed).
    Error,
    /// Critical error (typically I/O, e.g. a missing input table).
    Critical,
}

/// Context about a table load attempt.
#[derive(Debug, Clone)]
pub struct LoadContext {
    /// The table path.
    pub path: PathBuf,
}

/// Minimal stats reported on a successful load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadStats {
    /// Number of loaded rows.
    pub rows: usize,
}

/// Observer interface for table load outcomes.
pub trait LoadObserver: Send + Sync {
    /// Called when a table loads.
    fn on_success(&self, _ctx: &LoadContext, _stats: LoadStats) {}

    /// Called when a load fails.
    fn on_failure(&self, _ctx: &LoadContext, _severity: LoadSeverity, _error: &CalendarError) {}

    /// Called when a load failure meets the alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failure`].
    fn on_alert(&self, ctx: &LoadContext, severity: LoadSeverity, error: &CalendarError) {
        self.on_failure(ctx, severity, error)
    }
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn LoadObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn LoadObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl LoadObserver for CompositeObserver {
    fn on_success(&self, ctx: &LoadContext, stats: LoadStats) {
        for o in &self.observers {
            o.on_success(ctx, stats);
        }
    }

    fn on_failure(&self, ctx: &LoadContext, severity: LoadSeverity, error: &CalendarError) {
        for o in &self.observers {
            o.on_failure(ctx, severity, error);
        }
    }

    fn on_alert(&self, ctx: &LoadContext, severity: LoadSeverity, error: &CalendarError) {
        for o in &self.observers {
            o.on_alert(ctx, severity, error);
        }
    }
}

/// Reports load events through `tracing`.
#[derive(Debug, Default)]
pub struct TracingObserver;

impl LoadObserver for TracingObserver {
    fn on_success(&self, ctx: &LoadContext, stats: LoadStats) {
        tracing::info!(path = %ctx.path.display(), rows = stats.rows, "loaded table");
    }

    fn on_failure(&self, ctx: &LoadContext, severity: LoadSeverity, error: &CalendarError) {
        tracing::warn!(path = %ctx.path.display(), ?severity, %error, "table load failed");
    }

    fn on_alert(&self, ctx: &LoadContext, severity: LoadSeverity, error: &CalendarError) {
        tracing::error!(path = %ctx.path.display(), ?severity, %error, "table load alert");
    }
}
