//! Main entry point for the enricher binary
//!
//! Collects the run parameters from flags, environment and interactive
//! prompts, then fills the target column of the chosen sheet.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use enricher::{
    ConsolePrompter, Enricher, EnricherResult, EnrichmentSettings, RunReport, SelectionRange,
    TabularStore, WorkbookStore, check_workbook_path, resolve_sheet,
};
use registry::{RealRegistryClient, RegistryConfig};
use shared::logging;

/// Fill a spreadsheet column with ownership codes from the organization registry
#[derive(Parser)]
#[command(name = "enricher")]
#[command(about = "Looks up identifiers from one workbook column and writes registry codes into another")]
pub struct Args {
    /// Workbook to enrich (.xlsx); prompted when missing
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Sheet name or 1-based sheet number; prompted when missing
    #[arg(long)]
    pub sheet: Option<String>,

    /// Column holding the identifiers (1-based)
    #[arg(long)]
    pub source_column: Option<u32>,

    /// Column receiving the codes (1-based)
    #[arg(long)]
    pub target_column: Option<u32>,

    /// First line to process (1-based, inclusive)
    #[arg(long)]
    pub start_line: Option<u32>,

    /// Last line to process (inclusive)
    #[arg(long)]
    pub end_line: Option<u32>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Accept invalid TLS certificates from the registry.
    ///
    /// The public registry endpoint serves a certificate chain that most
    /// default trust stores reject; without this flag every lookup against it
    /// can fail with a TLS error.
    #[arg(long)]
    pub insecure: bool,

    /// Retries after HTTP 429 before a row is given up
    #[arg(long)]
    pub max_retries: Option<u32>,

    /// Fixed wait before each retry, in milliseconds
    #[arg(long)]
    pub retry_delay_ms: Option<u64>,

    /// Wait between rows, in milliseconds
    #[arg(long)]
    pub pacing_ms: Option<u64>,

    /// Registry lookup URL
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Write the run report as JSON to this path
    #[arg(long)]
    pub report: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> EnricherResult<()> {
    let args = Args::parse();
    let _ = dotenv::dotenv();
    logging::init_tracing(Some(&args.log_level));
    logging::log_startup("registry enrichment");

    if let Err(err) = run(args).await {
        logging::log_error("Enrichment", &err);
        return Err(err);
    }
    Ok(())
}

async fn run(args: Args) -> EnricherResult<()> {
    let registry_config = registry_config(&args)?;
    let mut settings = EnrichmentSettings::from_env()?;
    if let Some(pacing_ms) = args.pacing_ms {
        settings.pacing_delay = Duration::from_millis(pacing_ms);
    }

    let stdin = io::stdin();
    let mut prompter = ConsolePrompter::new(stdin.lock(), io::stdout());

    let path = match &args.file {
        Some(path) => {
            check_workbook_path(path)?;
            path.clone()
        }
        None => prompter.ask_workbook_path()?,
    };
    let mut store = WorkbookStore::open(&path)?;

    let sheet = match &args.sheet {
        Some(requested) => resolve_sheet(&store.sheet_names(), requested)?,
        None => prompter.ask_sheet(&store.sheet_names())?,
    };
    store.select_sheet(&sheet)?;

    let max_row = store.max_row();
    let range = SelectionRange::new(
        answer_or_ask(args.source_column, || prompter.ask_column("source"))?,
        answer_or_ask(args.target_column, || prompter.ask_column("target"))?,
        answer_or_ask(args.start_line, || prompter.ask_line("start", max_row))?,
        answer_or_ask(args.end_line, || prompter.ask_line("end", max_row))?,
    );
    range.validate(max_row)?;
    drop(prompter);

    logging::log_progress(
        "Configuration",
        &format!(
            "{} sheet '{}', column {} -> column {}, lines {}..={}",
            path.display(),
            sheet,
            range.source_column,
            range.target_column,
            range.start_line,
            range.end_line
        ),
    );

    let client = RealRegistryClient::new(registry_config)?;
    let mut enricher = Enricher::new(client, store, settings);
    let report = enricher.run(&range).await?;

    print_audit(&report);
    if let Some(report_path) = &args.report {
        let json = serde_json::to_vec_pretty(&report)?;
        std::fs::write(report_path, json)?;
        logging::log_success(&format!("Report written to {}", report_path.display()));
    }

    Ok(())
}

/// Environment first, flags win
fn registry_config(args: &Args) -> EnricherResult<RegistryConfig> {
    let mut config = RegistryConfig::from_env()?;
    if let Some(endpoint) = &args.endpoint {
        config = config.with_endpoint(endpoint)?;
    }
    if let Some(max_retries) = args.max_retries {
        config.retry.max_retries = max_retries;
    }
    if let Some(delay_ms) = args.retry_delay_ms {
        config.retry.retry_delay = Duration::from_millis(delay_ms);
    }
    if args.insecure {
        config.accept_invalid_certs = true;
    }
    Ok(config)
}

fn answer_or_ask(
    given: Option<u32>,
    ask: impl FnOnce() -> EnricherResult<u32>,
) -> EnricherResult<u32> {
    match given {
        Some(value) => Ok(value),
        None => ask(),
    }
}

fn print_audit(report: &RunReport) {
    println!("Processed rows ({}):", report.processed());
    for item in report.audit_trail() {
        println!("  {item}");
    }
}
