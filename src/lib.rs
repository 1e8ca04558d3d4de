pub mod args;
pub mod domain;
pub mod error;
pub mod exporter;
pub mod importer;
pub mod progress;
pub mod reader;
pub mod stats;
pub mod utils;

pub use args::Args;
pub use domain::validate_email;
pub use error::{EmailError, ImportError, RecordError};
pub use exporter::{print_report, write_report, ReportExporter};
pub use importer::{compute_domain_aggregates, CustomerImporter, FailurePolicy, ImportOptions};
pub use progress::{ProgressEvent, ProgressSink, TracingProgress};
pub use reader::{RawRecord, RecordReader};
pub use stats::{AggregateResult, DomainCount};
