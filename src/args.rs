use clap::Parser;
use std::path::PathBuf;

use crate::importer::{
    FailurePolicy, ImportOptions, DEFAULT_EMAIL_COLUMN, DEFAULT_PROGRESS_INTERVAL,
};

#[derive(Parser, Debug)]
#[command(
    name = "customer-domains",
    about = "Count customers per email domain in a customer CSV file",
    version,
    long_about = None
)]
pub struct Args {
    /// Path to the file with customer data
    #[arg(short, long, default_value = "./customers.csv")]
    pub path: PathBuf,

    /// Output file path; results are printed to the terminal when omitted
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Zero-based index of the email column
    #[arg(short, long, default_value_t = DEFAULT_EMAIL_COLUMN)]
    pub column: usize,

    /// Number of records between progress log entries
    #[arg(long, default_value_t = DEFAULT_PROGRESS_INTERVAL)]
    pub progress_interval: u64,

    /// Skip records with invalid emails or missing columns instead of failing
    #[arg(long)]
    pub skip_invalid: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn import_options(&self) -> ImportOptions {
        ImportOptions {
            email_column: self.column,
            progress_interval: self.progress_interval,
            policy: if self.skip_invalid {
                FailurePolicy::SkipInvalid
            } else {
                FailurePolicy::FailFast
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::parse_from(["customer-domains"]);
        assert_eq!(args.path, PathBuf::from("./customers.csv"));
        assert!(args.out.is_none());
        assert!(!args.verbose);
        assert_eq!(args.import_options(), ImportOptions::default());
    }

    #[test]
    fn test_args_paths() {
        let args = Args::parse_from(["customer-domains", "-p", "in.csv", "--out", "out.csv"]);
        assert_eq!(args.path, PathBuf::from("in.csv"));
        assert_eq!(args.out, Some(PathBuf::from("out.csv")));
    }

    #[test]
    fn test_args_import_options() {
        let args = Args::parse_from([
            "customer-domains",
            "--column",
            "0",
            "--progress-interval",
            "500",
            "--skip-invalid",
        ]);
        let options = args.import_options();
        assert_eq!(options.email_column, 0);
        assert_eq!(options.progress_interval, 500);
        assert_eq!(options.policy, FailurePolicy::SkipInvalid);
    }
}
