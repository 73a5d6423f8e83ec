use crate::config::{ConfigError, ReportConfig};
use crate::report::{self, OutputFormat};
use crate::scan::{self, ScanError};
use std::io::Write;
use std::path::Path;

/// Report settings given on the command line. `Some` values win over the config file.
#[derive(Debug, Default, Clone)]
pub struct ReportOverrides {
    pub min_count: Option<u64>,
    pub filter: Option<String>,
    pub limit: Option<usize>,
    pub format: Option<OutputFormat>,
}

impl ReportOverrides {
    pub fn apply(self, mut config: ReportConfig) -> ReportConfig {
        if let Some(min_count) = self.min_count {
            config.min_count = min_count;
        }
        if let Some(filter) = self.filter {
            config.filter = Some(filter);
        }
        if let Some(limit) = self.limit {
            config.limit = Some(limit);
        }
        if let Some(format) = self.format {
            config.format = format;
        }
        config
    }
}

/// Resolved settings as printed by `--dry-run`.
pub fn describe(config: &ReportConfig) -> String {
    let filter = config.filter.as_deref().unwrap_or("(none)");
    let limit = config
        .limit
        .map(|l| l.to_string())
        .unwrap_or_else(|| "(none)".to_string());
    format!(
        "min_count = {}\nfilter = {filter}\nlimit = {limit}\nformat = {}\n",
        config.min_count, config.format
    )
}

/// Scan `input`, sort, select and write the report to `out`.
///
/// Returns the number of records written.
pub fn handle_count<W: Write>(
    input: &Path,
    config: &ReportConfig,
    out: &mut W,
) -> Result<usize, CountError> {
    let mut records = scan::scan_file(input).map_err(CountError::Scan)?;
    report::sort_descending(&mut records);

    let selected = report::select(&records, config);
    tracing::info!(
        matched = records.len(),
        printed = selected.len(),
        "report ready"
    );

    report::render(out, &selected, config.format).map_err(CountError::Output)?;
    Ok(selected.len())
}

/// Errors that end a run with a non-zero exit status.
#[derive(Debug)]
pub enum CountError {
    Config(ConfigError),
    Scan(ScanError),
    Output(std::io::Error),
}

impl std::fmt::Display for CountError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CountError::Config(e) => write!(f, "{e}"),
            CountError::Scan(e) => write!(f, "{e}"),
            CountError::Output(e) => write!(f, "failed to write report: {e}"),
        }
    }
}

impl std::error::Error for CountError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CountError::Config(e) => Some(e),
            CountError::Scan(e) => Some(e),
            CountError::Output(e) => Some(e),
        }
    }
}

impl From<ConfigError> for CountError {
    fn from(e: ConfigError) -> Self {
        CountError::Config(e)
    }
}
