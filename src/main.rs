use clap::Parser;
use std::path::PathBuf;
use tracing::debug;

mod data;
mod read;
mod report;
mod validate;
mod write;

/// Aggregate employee performance from CSV exports into a ranked report.
#[derive(Parser)]
struct Args {
    /// CSV files with employee data
    #[arg(long, value_name = "FILE", num_args = 1.., required = true)]
    files: Vec<PathBuf>,

    /// Report type to generate
    #[arg(long, value_name = "TYPE")]
    report: String,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<(), anyhow::Error> {
    let args = Args::parse();
    let log_level = match args.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_target(false)
        .init();

    validate::validate_files_exist(&args.files)?;

    let mut employees = Vec::new();
    for path in &args.files {
        let outcome = read::load_employees(path)?;
        debug!(
            "{}: {} records loaded, {} rows skipped",
            path.display(),
            outcome.employees.len(),
            outcome.skipped.len()
        );
        employees.extend(outcome.employees);
    }
    if employees.is_empty() {
        return Err(data::Error::NoData.into());
    }

    let registry = report::ReportRegistry::new();
    let report = registry.generate(&args.report, &employees)?;
    write::print_report(std::io::stdout(), &args.report, &report)?;
    Ok(())
}
