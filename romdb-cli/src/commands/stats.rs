use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use super::load_report;
use crate::SourceArgs;
use crate::error::CliError;

/// Print record counts and decode diagnostics.
pub(crate) fn run_stats(source: &SourceArgs) -> Result<(), CliError> {
    let report = load_report(source)?;
    let catalog = &report.catalog;
    let stats = &report.stats;

    log::info!("{}", "RDB statistics:".if_supports_color(Stdout, |t| t.bold()));
    log::info!("  Records:          {}", catalog.len());
    log::info!("  Indexed by CRC32: {}", catalog.crc_count());
    log::info!(
        "  Without CRC32:    {}",
        catalog.iter().filter(|r| r.crc32 == 0).count()
    );
    log::info!("  Bytes decoded:    {}", stats.bytes_consumed);
    log::info!(
        "  Terminator:       {}",
        if stats.terminated { "yes" } else { "no" }
    );
    if stats.unrecognized_tags > 0 {
        log::info!("  Unknown tags:     {}", stats.unrecognized_tags);
    }
    if stats.is_clean() {
        log::info!(
            "  {} Decoded without truncation",
            "\u{2714}".if_supports_color(Stdout, |t| t.green())
        );
    } else {
        log::info!(
            "  {} Truncated fields: {}",
            "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
            stats.truncated_fields
        );
    }
    Ok(())
}
