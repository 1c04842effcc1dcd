//! RDB file cache.
//!
//! Downloads per-system RDB files from the libretro-database repository and
//! keeps them under `~/.cache/romdb/rdb/` (or `$ROMDB_CACHE_DIR/rdb/`), with a
//! `rdb-meta.json` next to the directory recording where each file came from.
//!
//! Data source: <https://github.com/libretro/libretro-database>

use std::collections::HashMap;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::decode::{self, DecodeReport};
use crate::error::RdbError;

/// Cache format version. Bump when changing the download source or layout to
/// invalidate stale cached files automatically.
const CACHE_VERSION: u32 = 1;

/// Largest RDB file we are willing to download.
pub const MAX_DOWNLOAD_BYTES: u64 = 64 * 1024 * 1024;

/// Environment variable overriding the cache root.
pub const CACHE_DIR_ENV: &str = "ROMDB_CACHE_DIR";

/// Base URL for downloading RDB files.
const RDB_BASE_URL: &str =
    "https://raw.githubusercontent.com/libretro/libretro-database/master/rdb/";

/// Metadata about a cached RDB file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedRdb {
    pub source: String,
    pub downloaded: String,
    pub file_size: u64,
    pub record_count: usize,
}

/// Metadata file tracking all cached RDB files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RdbCacheMeta {
    /// Cache format version. A mismatch clears the cache.
    #[serde(default)]
    pub version: u32,
    /// Keyed by system name (e.g., "Nintendo - Super Nintendo Entertainment System")
    #[serde(default)]
    pub systems: HashMap<String, CachedRdb>,
}

/// Information about a cached RDB file for display purposes.
#[derive(Debug, Clone)]
pub struct RdbCacheEntry {
    pub system: String,
    pub file_size: u64,
    pub downloaded: String,
    pub record_count: usize,
}

/// Construct the download URL for a system's RDB file.
///
/// System names are the libretro database names, e.g. `"Sega - Mega Drive - Genesis"`
/// → `".../rdb/Sega%20-%20Mega%20Drive%20-%20Genesis.rdb"`.
pub fn download_url(system: &str) -> Result<String, RdbError> {
    check_system_name(system)?;
    let mut url = reqwest::Url::parse(RDB_BASE_URL)
        .map_err(|e| RdbError::download(format!("Bad RDB base URL: {e}")))?;
    url.path_segments_mut()
        .map_err(|()| RdbError::download("RDB base URL cannot take a path"))?
        .pop_if_empty()
        .push(&format!("{system}.rdb"));
    Ok(url.to_string())
}

/// System names become file names in the cache, so they must stay a single
/// path component.
fn check_system_name(system: &str) -> Result<(), RdbError> {
    let invalid = system.trim().is_empty()
        || system == "."
        || system == ".."
        || system.contains(['/', '\\', '\0']);
    if invalid {
        return Err(RdbError::InvalidSystem(system.to_string()));
    }
    Ok(())
}

/// Read and decode an RDB file from an arbitrary path.
pub fn load_catalog_file(path: &Path) -> Result<DecodeReport, RdbError> {
    let bytes = fs::read(path)?;
    Ok(decode::decode(&bytes))
}

/// Download `url` into memory, refusing bodies larger than `limit` bytes.
pub fn download_bytes(url: &str, limit: u64) -> Result<Vec<u8>, RdbError> {
    let response = reqwest::blocking::get(url)
        .map_err(|e| RdbError::download(format!("Failed to download {url}: {e}")))?;

    if !response.status().is_success() {
        return Err(RdbError::download(format!(
            "HTTP {} for {url}",
            response.status()
        )));
    }

    if let Some(declared) = response.content_length() {
        check_size(declared, limit)?;
    }

    // The declared length can be missing or wrong, so cap the read as well.
    let mut bytes = Vec::new();
    response
        .take(limit.saturating_add(1))
        .read_to_end(&mut bytes)
        .map_err(|e| RdbError::download(format!("Failed to read response for {url}: {e}")))?;
    check_size(bytes.len() as u64, limit)?;

    Ok(bytes)
}

fn check_size(size: u64, limit: u64) -> Result<(), RdbError> {
    if size > limit {
        return Err(RdbError::TooLarge { size, limit });
    }
    Ok(())
}

/// A directory of cached RDB files plus their metadata.
#[derive(Debug, Clone)]
pub struct RdbCache {
    root: PathBuf,
}

impl RdbCache {
    /// Use `root` as the cache root. Files go in `root/rdb/`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The default cache: `$ROMDB_CACHE_DIR` if set, else the platform cache
    /// directory (`~/.cache/romdb` on Linux).
    pub fn open_default() -> Result<Self, RdbError> {
        if let Some(dir) = std::env::var_os(CACHE_DIR_ENV) {
            return Ok(Self::new(dir));
        }
        let base = dirs::cache_dir()
            .ok_or_else(|| RdbError::cache("Could not determine cache directory"))?;
        Ok(Self::new(base.join("romdb")))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding the `.rdb` files.
    pub fn rdb_dir(&self) -> PathBuf {
        self.root.join("rdb")
    }

    fn meta_path(&self) -> PathBuf {
        self.root.join("rdb-meta.json")
    }

    /// Path of the cached file for `system`.
    pub fn rdb_path(&self, system: &str) -> PathBuf {
        self.rdb_dir().join(format!("{system}.rdb"))
    }

    /// Load cache metadata. If the cache version doesn't match, clears stale data.
    fn load_meta(&self) -> Result<RdbCacheMeta, RdbError> {
        let path = self.meta_path();
        if !path.exists() {
            return Ok(RdbCacheMeta {
                version: CACHE_VERSION,
                ..Default::default()
            });
        }
        let contents = fs::read_to_string(&path)?;
        let meta: RdbCacheMeta = serde_json::from_str(&contents)?;
        if meta.version != CACHE_VERSION {
            log::debug!(
                "RDB cache version {} != {CACHE_VERSION}, clearing",
                meta.version
            );
            if let Err(e) = self.clear() {
                log::warn!("Failed to clear stale RDB cache: {e}");
            }
            return Ok(RdbCacheMeta {
                version: CACHE_VERSION,
                ..Default::default()
            });
        }
        Ok(meta)
    }

    fn save_meta(&self, meta: &RdbCacheMeta) -> Result<(), RdbError> {
        fs::create_dir_all(&self.root)?;
        let contents = serde_json::to_string_pretty(meta)?;
        fs::write(self.meta_path(), contents)?;
        Ok(())
    }

    /// Whether `system` has a current cached file.
    pub fn is_cached(&self, system: &str) -> Result<bool, RdbError> {
        check_system_name(system)?;
        let meta = self.load_meta()?;
        Ok(meta.systems.contains_key(system) && self.rdb_path(system).exists())
    }

    /// Download the RDB file for `system` and store it. Returns the raw bytes.
    pub fn fetch(&self, system: &str) -> Result<Vec<u8>, RdbError> {
        let url = download_url(system)?;
        log::debug!("downloading {url}");
        let bytes = download_bytes(&url, MAX_DOWNLOAD_BYTES)?;
        self.store(system, &url, &bytes)?;
        Ok(bytes)
    }

    /// Write `bytes` as the cached file for `system` and record it in the metadata.
    pub fn store(&self, system: &str, source: &str, bytes: &[u8]) -> Result<PathBuf, RdbError> {
        check_system_name(system)?;
        let path = self.rdb_path(system);
        fs::create_dir_all(self.rdb_dir())?;
        fs::write(&path, bytes)?;

        let record_count = decode::decode(bytes).catalog.len();

        let mut meta = self.load_meta()?;
        meta.version = CACHE_VERSION;
        meta.systems.insert(
            system.to_string(),
            CachedRdb {
                source: source.to_string(),
                downloaded: chrono::Utc::now().to_rfc3339(),
                file_size: bytes.len() as u64,
                record_count,
            },
        );
        self.save_meta(&meta)?;

        Ok(path)
    }

    /// Raw bytes for `system`, downloading them if not cached.
    pub fn load_bytes(&self, system: &str) -> Result<Vec<u8>, RdbError> {
        if self.is_cached(system)? {
            return Ok(fs::read(self.rdb_path(system))?);
        }
        self.fetch(system)
    }

    /// Decode the catalog for `system`, downloading the file if not cached.
    pub fn load_catalog(&self, system: &str) -> Result<DecodeReport, RdbError> {
        let bytes = self.load_bytes(system)?;
        Ok(decode::decode(&bytes))
    }

    /// List all cached RDB files, sorted by system name.
    pub fn list(&self) -> Result<Vec<RdbCacheEntry>, RdbError> {
        let meta = self.load_meta()?;
        let mut entries: Vec<RdbCacheEntry> = meta
            .systems
            .into_iter()
            .map(|(system, cached)| RdbCacheEntry {
                system,
                file_size: cached.file_size,
                downloaded: cached.downloaded,
                record_count: cached.record_count,
            })
            .collect();
        entries.sort_by(|a, b| a.system.cmp(&b.system));
        Ok(entries)
    }

    /// Remove all cached RDB files and the metadata. Returns bytes freed.
    pub fn clear(&self) -> Result<u64, RdbError> {
        let dir = self.rdb_dir();
        let mut total_size = 0u64;

        if dir.exists() {
            for entry in fs::read_dir(&dir)?.flatten() {
                let path = entry.path();
                if path.is_file() {
                    if let Ok(meta) = fs::metadata(&path) {
                        total_size += meta.len();
                    }
                    fs::remove_file(&path)?;
                }
            }
        }

        let meta = self.meta_path();
        if meta.exists() {
            if let Ok(m) = fs::metadata(&meta) {
                total_size += m.len();
            }
            fs::remove_file(&meta)?;
        }

        Ok(total_size)
    }

    /// Total size of cached RDB files according to the metadata.
    pub fn total_size(&self) -> Result<u64, RdbError> {
        let meta = self.load_meta()?;
        Ok(meta.systems.values().map(|c| c.file_size).sum())
    }
}

#[cfg(test)]
#[path = "tests/cache_tests.rs"]
mod tests;
