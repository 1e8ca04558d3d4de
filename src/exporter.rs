use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use csv::WriterBuilder;
use tracing::info;

use crate::stats::AggregateResult;

pub const REPORT_HEADER: [&str; 2] = ["domain", "number_of_customers"];

/// Writes `result` as `domain,number_of_customers` CSV, in the order given.
pub fn write_report<W: Write>(result: &AggregateResult, writer: W) -> Result<()> {
    let mut csv_writer = WriterBuilder::new().has_headers(false).from_writer(writer);

    csv_writer.write_record(REPORT_HEADER)?;
    for domain in result {
        csv_writer.serialize(domain)?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn print_report(result: &AggregateResult) -> Result<()> {
    write_report(result, io::stdout().lock()).context("Failed to write report to stdout")
}

/// Saves a report to a file, replacing anything already there.
#[derive(Debug, Clone)]
pub struct ReportExporter {
    output_path: PathBuf,
}

impl ReportExporter {
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: output_path.into(),
        }
    }

    pub fn export(&self, result: &AggregateResult) -> Result<()> {
        info!(
            action = "start",
            component = "report_export",
            file_path = ?self.output_path,
            records = result.len(),
            "Starting export"
        );

        let file = File::create(&self.output_path)
            .with_context(|| format!("Failed to create output file {:?}", self.output_path))?;

        write_report(result, file)
            .with_context(|| format!("Failed to write report to {:?}", self.output_path))?;

        info!(
            action = "complete",
            component = "report_export",
            file_path = ?self.output_path,
            "Export written successfully"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::DomainCount;

    fn sample() -> AggregateResult {
        AggregateResult {
            domains: vec![
                DomainCount::new("acme.io", 1),
                DomainCount::new("example.com", 2),
            ],
            rows_processed: 3,
            rows_skipped: 0,
        }
    }

    #[test]
    fn test_write_report() {
        let mut out = Vec::new();
        write_report(&sample(), &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "domain,number_of_customers\nacme.io,1\nexample.com,2\n"
        );
    }

    #[test]
    fn test_empty_report_has_header_only() {
        let empty = AggregateResult {
            domains: Vec::new(),
            rows_processed: 0,
            rows_skipped: 0,
        };
        let mut out = Vec::new();
        write_report(&empty, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "domain,number_of_customers\n");
    }

    #[test]
    fn test_domains_needing_quotes_are_escaped() {
        let result = AggregateResult {
            domains: vec![DomainCount::new("odd,domain", 4)],
            rows_processed: 4,
            rows_skipped: 0,
        };
        let mut out = Vec::new();
        write_report(&result, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "domain,number_of_customers\n\"odd,domain\",4\n"
        );
    }

    #[test]
    fn test_export_truncates_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.csv");
        std::fs::write(&path, "stale content that is longer than the report\n".repeat(10)).unwrap();

        ReportExporter::new(&path).export(&sample()).unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "domain,number_of_customers\nacme.io,1\nexample.com,2\n"
        );
    }

    #[test]
    fn test_export_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("report.csv");

        let err = ReportExporter::new(&path).export(&sample()).unwrap_err();
        assert!(err.to_string().contains("Failed to create output file"));
    }
}
