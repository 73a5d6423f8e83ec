mod config;
mod count;
mod record;
mod report;
mod scan;

use clap::Parser;
use count::{CountError, ReportOverrides};
use report::OutputFormat;
use std::io::Write;
use std::path::PathBuf;

/// Summarize ` - Name: count` lines from an instance dump (such as
/// gobject-list's "Living Instances"), largest counts first.
#[derive(Parser, Debug)]
#[command(name = "count-objects", version, about)]
pub struct Cli {
    /// Text file to scan
    #[arg(value_name = "PATH")]
    input: PathBuf,

    /// TOML config file with a [report] table (default: none)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Hide records with a count below this (overrides config)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    min_count: Option<u64>,

    /// Only show names starting with this prefix (overrides config)
    #[arg(long)]
    filter: Option<String>,

    /// Print at most this many records (overrides config)
    #[arg(short = 'n', long)]
    limit: Option<usize>,

    /// Output format (overrides config)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Print resolved report settings and exit without scanning
    #[arg(long)]
    dry_run: bool,

    /// Debug logging on stderr
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn overrides(&self) -> ReportOverrides {
        ReportOverrides {
            min_count: self.min_count,
            filter: self.filter.clone(),
            limit: self.limit,
            format: self.format,
        }
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    let level = if verbose {
        "count_objects=debug"
    } else if quiet {
        "count_objects=error"
    } else {
        "count_objects=warn"
    };
    // Explicit flags beat RUST_LOG
    let filter = if verbose || quiet {
        tracing_subscriber::EnvFilter::new(level)
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run<W: Write>(cli: &Cli, out: &mut W) -> Result<(), CountError> {
    let app_config = config::load(cli.config.as_deref())?;
    let report_config = cli.overrides().apply(app_config.report);

    if cli.dry_run {
        write!(out, "{}", count::describe(&report_config)).map_err(CountError::Output)?;
        out.flush().map_err(CountError::Output)?;
        return Ok(());
    }

    count::handle_count(&cli.input, &report_config, out)?;
    Ok(())
}

/// Log the outcome of a run and map it to the process exit status.
fn exit_code(result: Result<(), CountError>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            tracing::error!("{e}");
            1
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);
    tracing::debug!(?cli, "parsed CLI arguments");

    let stdout = std::io::stdout();
    let mut out = std::io::BufWriter::new(stdout.lock());

    let code = exit_code(run(&cli, &mut out));
    if code != 0 {
        std::process::exit(code);
    }
}
