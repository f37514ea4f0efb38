#[cfg(target_env = "musl")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::Parser;
use flowscan_core::output::{render_text, report_to_json};
use flowscan_core::{DiagnosticSeverity, ScanConfig, ScanReport};
use std::borrow::Cow;
use std::io::Write;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "flowscan",
    version,
    about = "Workflow inventory for GitHub organizations"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Survey an organization's repositories and report their workflows
    Report(ReportArgs),
}

#[derive(clap::Args)]
struct ReportArgs {
    /// Organization whose repositories are surveyed
    #[arg(long, env = "FLOWSCAN_ORG")]
    org: String,

    /// Regex for workflow names to leave out of the report
    #[arg(long, env = "FLOWSCAN_OMIT")]
    omit: Option<String>,

    /// GitHub token for API access
    #[arg(long, env = "GITHUB_TOKEN")]
    token: Option<String>,

    /// Override for the API base URL
    #[arg(long, env = "GITHUB_API_URL")]
    api_url: Option<String>,

    /// Output format: text or json (default: text)
    #[arg(long, env = "FLOWSCAN_OUTPUT_FORMAT")]
    output_format: Option<String>,
}

/// Output format for the CLI
enum OutputFormat {
    /// Full JSON to stdout, diagnostics included
    Json,
    /// Line-oriented report to stdout
    Text,
}

impl OutputFormat {
    fn detect(explicit: Option<&str>) -> Self {
        match explicit {
            Some("json") => OutputFormat::Json,
            Some("text") => OutputFormat::Text,
            _ => OutputFormat::Text,
        }
    }
}

fn main() {
    // Logs go to stderr so the report stream stays clean.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let code = match cli.command {
        Commands::Report(args) => run_report(args),
    };
    std::process::exit(code);
}

/// Filter empty string from Option (env vars may produce "" for empty values)
fn clean_opt(v: &Option<String>) -> Option<&str> {
    v.as_deref().filter(|s| !s.is_empty())
}

fn run_report(args: ReportArgs) -> i32 {
    let output_format = OutputFormat::detect(clean_opt(&args.output_format));

    // Clean env var inputs (CI systems set empty strings for unset values)
    let omit = clean_opt(&args.omit);
    let api_url = clean_opt(&args.api_url);
    let token = match clean_opt(&args.token) {
        Some(token) => token,
        None => {
            eprintln!("Error: no credential; set GITHUB_TOKEN or pass --token");
            return 1;
        }
    };

    // Build ScanConfig, borrowing from args (zero-copy)
    let config = ScanConfig {
        org: Cow::Borrowed(args.org.as_str()),
        token: Cow::Borrowed(token),
        api_url: api_url.map(Cow::Borrowed),
        omit_pattern: omit.map(Cow::Borrowed),
    };

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build();
    let rt = match rt {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: failed to create runtime: {e}");
            return 1;
        }
    };

    let report = match rt.block_on(flowscan_core::scan_org(&config)) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error: {e}");
            return 1;
        }
    };

    match output_format {
        OutputFormat::Json => write_json_output(&report),
        OutputFormat::Text => write_text_output(&report),
    }

    for diag in &report.diagnostics {
        match diag.severity {
            DiagnosticSeverity::Warning => eprintln!("Warning: {}", diag.message),
            DiagnosticSeverity::SoftError => eprintln!("Error: {}", diag.message),
        }
    }

    if report.has_soft_errors() {
        2
    } else {
        0
    }
}

/// Write the line-oriented report to stdout
fn write_text_output(report: &ScanReport) {
    let stdout = std::io::stdout();
    let mut w = stdout.lock();
    let _ = w.write_all(render_text(report).as_bytes());
}

/// Write the full JSON rendering to stdout
fn write_json_output(report: &ScanReport) {
    let stdout = std::io::stdout();
    let mut lock = stdout.lock();
    let _ = serde_json::to_writer(&mut lock, &report_to_json(report));
    let _ = writeln!(lock);
}
