/// Line scanning: pull ` - Name: count` records out of a text dump.
///
/// Matches lines like the "Living Instances" section of a gobject-list dump:
/// - ` - GtkWindow: 3 instances`
/// - ` - ab12: 7`
///
/// Anything after the count is ignored, and so is every line that does not
/// start with ` - `.
use crate::record::{Count, Record};
use regex::Regex;
use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Name is two or more ASCII word characters, count is ASCII digits.
static LINE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ - ([[:word:]][[:word:]]+): ([[:digit:]]+)").unwrap());

/// Parse a single line into a record, if it matches.
///
/// Counts of any length are kept.
pub fn parse_line(line: &str) -> Option<Record> {
    let caps = LINE_PATTERN.captures(line)?;
    let count = Count::parse(&caps[2])?;
    Some(Record::new(&caps[1], count))
}

/// Scan every line of `reader`, appending one record per matching line.
///
/// Invalid UTF-8 is replaced rather than treated as an error.
pub fn scan_reader<R: BufRead>(mut reader: R) -> std::io::Result<Vec<Record>> {
    let mut records = Vec::new();
    let mut buf = Vec::new();
    let mut lines = 0u64;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        lines += 1;
        let line = String::from_utf8_lossy(&buf);
        if let Some(record) = parse_line(&line) {
            records.push(record);
        }
    }

    tracing::debug!(lines, matched = records.len(), "scan complete");
    Ok(records)
}

/// Open `path` and scan it. The file is closed before this returns.
pub fn scan_file(path: &Path) -> Result<Vec<Record>, ScanError> {
    let file = std::fs::File::open(path).map_err(|e| ScanError::Open {
        path: path.to_path_buf(),
        source: e,
    })?;
    tracing::debug!(path = %path.display(), "scanning input");

    scan_reader(std::io::BufReader::new(file)).map_err(|e| ScanError::Read {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Errors from reading the input file.
#[derive(Debug)]
pub enum ScanError {
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl std::fmt::Display for ScanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScanError::Open { path, source } => {
                write!(f, "failed to open {}: {source}", path.display())
            }
            ScanError::Read { path, source } => {
                write!(f, "failed to read {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ScanError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScanError::Open { source, .. } => Some(source),
            ScanError::Read { source, .. } => Some(source),
        }
    }
}
