use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use romdb_naming::{display_name, region_code};
use romdb_rdb::{GameLookup, GameRecord};

use super::{format_bytes, load_report, parse_crc};
use crate::SourceArgs;
use crate::error::CliError;

const CHUNK_SIZE: usize = 64 * 1024; // 64 KB

/// Look up a CRC32 given on the command line.
pub(crate) fn run_lookup(crc: &str, source: &SourceArgs) -> Result<(), CliError> {
    let crc32 = parse_crc(crc)?;
    let report = load_report(source)?;
    print_lookup(&report.catalog, crc32);
    Ok(())
}

/// Hash a ROM file and look up the result.
pub(crate) fn run_identify(
    rom: &Path,
    skip_header: u64,
    source: &SourceArgs,
) -> Result<(), CliError> {
    let crc32 = hash_file(rom, skip_header)?;
    log::info!(
        "{} CRC32 {:08x}",
        rom.display().if_supports_color(Stdout, |t| t.bold()),
        crc32
    );
    let report = load_report(source)?;
    print_lookup(&report.catalog, crc32);
    Ok(())
}

/// CRC32 of a file after skipping `skip` leading bytes, streamed in 64 KB chunks.
pub(crate) fn hash_file(path: &Path, skip: u64) -> Result<u32, CliError> {
    let mut reader = BufReader::new(File::open(path)?);
    reader.seek(SeekFrom::Start(skip))?;

    let mut hasher = crc32fast::Hasher::new();
    let mut buf = vec![0u8; CHUNK_SIZE];
    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hasher.finalize())
}

fn print_lookup(lookup: &dyn GameLookup, crc32: u32) {
    match lookup.find_by_crc(crc32) {
        Some(record) => print_record(&record),
        None => log::info!(
            "{} No match for CRC32 {:08x} among {} records",
            "\u{2718}".if_supports_color(Stdout, |t| t.red()),
            crc32,
            lookup.record_count(),
        ),
    }
}

fn print_record(record: &GameRecord) {
    log::info!(
        "{} {} [{}]",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        display_name(&record.name).if_supports_color(Stdout, |t| t.bold()),
        region_code(&record.name).if_supports_color(Stdout, |t| t.cyan()),
    );
    log::info!("  Name:      {}", record.name);

    let text_fields = [
        ("Developer", &record.developer),
        ("Publisher", &record.publisher),
        ("Genre", &record.genre),
        ("Franchise", &record.franchise),
        ("ESRB", &record.esrb_rating),
        ("Serial", &record.serial),
        ("ROM", &record.rom_name),
        ("About", &record.description),
    ];
    for (label, value) in text_fields {
        if !value.is_empty() {
            log::info!("  {:<10} {}", format!("{label}:"), value);
        }
    }

    match (record.release_year, record.release_month) {
        (0, _) => {}
        (year, 0) => log::info!("  Released:  {year}"),
        (year, month) => log::info!("  Released:  {year}-{month:02}"),
    }
    if record.size > 0 {
        log::info!("  Size:      {}", format_bytes(record.size));
    }
    log::info!("  CRC32:     {}", record.crc_hex());
}
