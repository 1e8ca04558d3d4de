use anyhow::Result;
use clap::Parser;
use tracing::error;

use customer_domains::{
    print_report, utils, Args, CustomerImporter, ReportExporter, TracingProgress,
};

fn run(args: &Args) -> Result<()> {
    let importer = CustomerImporter::new(&args.path).with_options(args.import_options());
    let result = importer.import_domain_data(Some(&TracingProgress))?;

    match &args.out {
        Some(out) => ReportExporter::new(out).export(&result)?,
        None => print_report(&result)?,
    }

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    utils::setup_logging(args.verbose);
    utils::validate_args(&args)?;

    if let Err(e) = run(&args) {
        error!(file_path = ?args.path, "Failed to process customer data: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}
