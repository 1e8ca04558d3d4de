use std::collections::HashMap;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::domain::validate_email;
use crate::error::{ImportError, ImportResult};
use crate::progress::{ProgressEvent, ProgressSink};
use crate::reader::{RawRecord, RecordReader};
use crate::stats::{AggregateResult, DomainCount};

/// Column holding the email in the first_name,last_name,email,gender,ip_address layout.
pub const DEFAULT_EMAIL_COLUMN: usize = 2;
pub const DEFAULT_PROGRESS_INTERVAL: u64 = 10_000;

/// What to do with a row whose email or column count is invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Abort the whole pass on the first bad row.
    #[default]
    FailFast,
    /// Log and count bad rows, keep aggregating the rest.
    SkipInvalid,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportOptions {
    pub email_column: usize,
    pub progress_interval: u64,
    pub policy: FailurePolicy,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            email_column: DEFAULT_EMAIL_COLUMN,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            policy: FailurePolicy::default(),
        }
    }
}

/// Reads a customer CSV file and aggregates customers by email domain.
///
/// The file is only opened when [`CustomerImporter::import_domain_data`] runs
/// and is closed again before it returns.
#[derive(Debug, Clone)]
pub struct CustomerImporter {
    path: PathBuf,
    options: ImportOptions,
}

impl CustomerImporter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            options: ImportOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ImportOptions) -> Self {
        self.options = options;
        self
    }

    pub fn import_domain_data(
        &self,
        progress: Option<&dyn ProgressSink>,
    ) -> ImportResult<AggregateResult> {
        let start_time = Instant::now();
        info!(action = "start", component = "customer_import", path = ?self.path, "Starting customer import");

        let file = File::open(&self.path).map_err(|source| ImportError::SourceUnavailable {
            path: self.path.clone(),
            source,
        })?;

        let result = compute_domain_aggregates(RecordReader::new(file), &self.options, progress)?;

        info!(
            action = "complete",
            component = "customer_import",
            path = ?self.path,
            domains = result.len(),
            rows = result.rows_processed,
            rows_skipped = result.rows_skipped,
            duration_ms = start_time.elapsed().as_millis(),
            "Customer import completed"
        );
        Ok(result)
    }
}

/// Runs one aggregation pass over `reader`.
///
/// Records are handled strictly in source order. Under
/// [`FailurePolicy::FailFast`] the first bad row aborts the pass and nothing
/// accumulated so far is returned; decoding errors abort under every policy.
pub fn compute_domain_aggregates<R: io::Read>(
    mut reader: RecordReader<R>,
    options: &ImportOptions,
    progress: Option<&dyn ProgressSink>,
) -> ImportResult<AggregateResult> {
    reader.skip_header()?;

    let mut counts: HashMap<String, u64> = HashMap::new();
    let mut rows_skipped = 0u64;

    while let Some(record) = reader.next_record()? {
        match extract_domain(record, options.email_column) {
            Ok(domain) => match counts.get_mut(domain) {
                Some(count) => *count += 1,
                None => {
                    counts.insert(domain.to_string(), 1);
                }
            },
            Err(e) if options.policy == FailurePolicy::SkipInvalid && e.is_row_rejection() => {
                warn!(action = "skip", component = "customer_import", error = %e, "Skipping invalid record");
                rows_skipped += 1;
            }
            Err(e) => return Err(e),
        }

        let rows_processed = reader.rows_read();
        if options.progress_interval > 0 && rows_processed % options.progress_interval == 0 {
            if let Some(sink) = progress {
                sink.on_progress(&ProgressEvent {
                    rows_processed,
                    unique_domains: counts.len(),
                    rows_skipped,
                });
            }
        }
    }

    let rows_processed = reader.rows_read();
    if let Some(sink) = progress {
        sink.on_complete(&ProgressEvent {
            rows_processed,
            unique_domains: counts.len(),
            rows_skipped,
        });
    }

    let mut domains: Vec<DomainCount> = counts
        .into_iter()
        .map(|(domain, count)| DomainCount { domain, count })
        .collect();
    // keys are unique, so an unstable sort is still deterministic
    domains.sort_unstable_by(|a, b| a.domain.cmp(&b.domain));

    debug!(
        action = "sort",
        component = "customer_import",
        unique_domains = domains.len(),
        "Sorted domain aggregates"
    );

    Ok(AggregateResult {
        domains,
        rows_processed,
        rows_skipped,
    })
}

fn extract_domain(record: &RawRecord, email_column: usize) -> ImportResult<&str> {
    let email = record
        .get(email_column)
        .ok_or_else(|| ImportError::InsufficientColumns {
            row: record.row(),
            expected: email_column + 1,
            actual: record.len(),
        })?;

    validate_email(email).map_err(|source| ImportError::InvalidEmail {
        row: record.row(),
        value: email.to_string(),
        source,
    })
}
