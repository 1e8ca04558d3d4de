use tracing::{debug, info};

/// Counters reported while an aggregation pass runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProgressEvent {
    pub rows_processed: u64,
    pub unique_domains: usize,
    pub rows_skipped: u64,
}

/// Observer for a running import. Implementations must not affect the result.
pub trait ProgressSink {
    fn on_progress(&self, event: &ProgressEvent);
    fn on_complete(&self, event: &ProgressEvent);
}

/// Reports progress as structured log events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingProgress;

impl ProgressSink for TracingProgress {
    fn on_progress(&self, event: &ProgressEvent) {
        info!(
            action = "progress",
            component = "customer_import",
            rows = event.rows_processed,
            unique_domains = event.unique_domains,
            rows_skipped = event.rows_skipped,
            "Processing customer records"
        );
    }

    fn on_complete(&self, event: &ProgressEvent) {
        debug!(
            action = "complete",
            component = "customer_import",
            total_rows = event.rows_processed,
            unique_domains = event.unique_domains,
            rows_skipped = event.rows_skipped,
            "Aggregation complete"
        );
    }
}
