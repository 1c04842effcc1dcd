pub(crate) mod cache;
pub(crate) mod import;
pub(crate) mod lookup;
pub(crate) mod stats;

use romdb_rdb::cache::load_catalog_file;
use romdb_rdb::{DecodeReport, RdbCache};

use crate::SourceArgs;
use crate::error::CliError;

/// Decode the RDB selected on the command line.
pub(crate) fn load_report(source: &SourceArgs) -> Result<DecodeReport, CliError> {
    let report = match (&source.file, &source.system) {
        (Some(path), _) => load_catalog_file(path)?,
        (None, Some(system)) => RdbCache::open_default()?.load_catalog(system)?,
        // clap's argument group requires one of the two
        (None, None) => DecodeReport::default(),
    };

    if report.stats.truncated_fields > 0 {
        log::warn!(
            "RDB ended mid-field after {} bytes; {} records were recovered",
            report.stats.bytes_consumed,
            report.catalog.len()
        );
    }
    Ok(report)
}

/// Parse a CRC32 given as hex, with or without a `0x` prefix.
pub(crate) fn parse_crc(s: &str) -> Result<u32, CliError> {
    let trimmed = s.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    if digits.is_empty() || digits.len() > 8 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(CliError::invalid_crc(s));
    }
    u32::from_str_radix(digits, 16).map_err(|_| CliError::invalid_crc(s))
}

pub(crate) fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} bytes")
    }
}
