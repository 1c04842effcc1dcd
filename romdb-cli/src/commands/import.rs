use std::fs;
use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use serde::Serialize;

use super::lookup::hash_file;
use crate::error::CliError;

/// What an import reports back: the checksum it was stored under and the
/// display name taken from the source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct ImportedRom {
    /// CRC32 as eight uppercase hex digits
    pub(crate) crc: String,
    /// Source file name without its extension
    pub(crate) name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ImportOutcome {
    Stored(PathBuf),
    AlreadyPresent(PathBuf),
}

/// Copy a ROM into `dest_dir` as `{CRC32}.{ext}` and print the result as JSON.
pub(crate) fn run_import(rom: &Path, dest_dir: &Path) -> Result<(), CliError> {
    let (imported, outcome) = import_rom(rom, dest_dir)?;
    match &outcome {
        ImportOutcome::Stored(path) => log::info!(
            "{} Stored {}",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            path.display()
        ),
        ImportOutcome::AlreadyPresent(path) => log::info!(
            "{} Already imported: {}",
            "\u{2714}".if_supports_color(Stdout, |t| t.dimmed()),
            path.display()
        ),
    }
    println!("{}", serde_json::to_string(&imported)?);
    Ok(())
}

/// Store `rom` under its checksum in `dest_dir`.
///
/// An existing file with the same checksum name is left untouched.
pub(crate) fn import_rom(
    rom: &Path,
    dest_dir: &Path,
) -> Result<(ImportedRom, ImportOutcome), CliError> {
    let name = rom
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .ok_or_else(|| CliError::InvalidRomPath(rom.to_path_buf()))?;

    let crc = format!("{:08X}", hash_file(rom, 0)?);
    let file_name = match rom.extension() {
        Some(ext) => format!("{crc}.{}", ext.to_string_lossy()),
        None => crc.clone(),
    };
    let dest = dest_dir.join(file_name);

    let imported = ImportedRom { crc, name };
    if dest.exists() {
        log::debug!("{} exists, skipping copy", dest.display());
        return Ok((imported, ImportOutcome::AlreadyPresent(dest)));
    }

    fs::create_dir_all(dest_dir)?;
    fs::copy(rom, &dest)?;
    Ok((imported, ImportOutcome::Stored(dest)))
}
