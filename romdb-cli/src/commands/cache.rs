use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use romdb_rdb::RdbCache;

use super::format_bytes;
use crate::error::CliError;

/// List cached RDB files.
pub(crate) fn run_cache_list() -> Result<(), CliError> {
    let cache = RdbCache::open_default()?;
    let entries = cache.list()?;

    if entries.is_empty() {
        log::info!(
            "{}",
            "No cached RDB files.".if_supports_color(Stdout, |t| t.dimmed()),
        );
        log::info!("Run 'romdb cache fetch <system>' to download RDB files.");
        return Ok(());
    }

    log::info!(
        "{}",
        "Cached RDB files:".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("");

    let mut total_size = 0u64;
    for entry in &entries {
        total_size += entry.file_size;
        log::info!(
            "  {} ({} records, {})",
            entry.system.if_supports_color(Stdout, |t| t.bold()),
            entry.record_count,
            format_bytes(entry.file_size),
        );
        log::info!("    Downloaded: {}", entry.downloaded);
    }
    log::info!("");
    log::info!(
        "Total: {} files, {}",
        entries.len(),
        format_bytes(total_size)
    );
    Ok(())
}

/// Clear the RDB cache.
pub(crate) fn run_cache_clear() -> Result<(), CliError> {
    let freed = RdbCache::open_default()?.clear()?;
    log::info!(
        "{} Cache cleared ({} freed)",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        format_bytes(freed),
    );
    Ok(())
}

/// Download RDB files for the given systems.
///
/// A failed system is reported and skipped; the command only fails when
/// nothing could be fetched.
pub(crate) fn run_cache_fetch(systems: &[String]) -> Result<(), CliError> {
    let cache = RdbCache::open_default()?;
    let mut last_error = None;
    let mut fetched = 0usize;

    for system in systems {
        match cache.fetch(system) {
            Ok(bytes) => {
                fetched += 1;
                log::info!(
                    "  {} {} ({})",
                    "\u{2714}".if_supports_color(Stdout, |t| t.green()),
                    system.if_supports_color(Stdout, |t| t.bold()),
                    format_bytes(bytes.len() as u64),
                );
            }
            Err(e) => {
                log::warn!(
                    "  {} {}: {}",
                    "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                    system,
                    e,
                );
                last_error = Some(e);
            }
        }
    }

    match last_error {
        Some(e) if fetched == 0 => Err(e.into()),
        _ => Ok(()),
    }
}
