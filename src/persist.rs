use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crc32fast::Hasher as Crc32;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::hash::StateKey;
use crate::solver::tt::{InMemoryTT, ProofRecord, TranspositionTable};

pub const FORMAT_VERSION: u32 = 1;

const MAGIC: [u8; 8] = *b"GLPROOF1";
// magic + version + crc
const HEADER_LEN: usize = 8 + 4 + 4;

/// Persisted cache: the whole key -> proof mapping plus bookkeeping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CacheFile {
    /// Nodes proven across all runs that contributed to this file.
    pub proven_nodes: u64,
    /// Unix seconds at save time.
    pub saved_at: u64,
    pub size: u64,
    pub entries: BTreeMap<StateKey, ProofRecord>,
}

impl CacheFile {
    pub fn from_table(tt: &InMemoryTT, proven_nodes: u64) -> Self {
        let saved_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self {
            proven_nodes,
            saved_at,
            size: tt.len() as u64,
            entries: tt.to_sorted(),
        }
    }
}

/// Frame: magic, version (LE u32), CRC32 of payload (LE u32), bincode payload.
pub fn encode_cache(file: &CacheFile) -> Result<Vec<u8>> {
    let payload = bincode::serialize(file)?;
    let mut hasher = Crc32::new();
    hasher.update(&payload);
    let crc = hasher.finalize();

    let mut out = Vec::with_capacity(HEADER_LEN + payload.len());
    out.extend_from_slice(&MAGIC);
    out.extend_from_slice(&FORMAT_VERSION.to_le_bytes());
    out.extend_from_slice(&crc.to_le_bytes());
    out.extend_from_slice(&payload);
    Ok(out)
}

pub fn decode_cache(bytes: &[u8]) -> Result<CacheFile> {
    if bytes.len() < HEADER_LEN {
        return Err(Error::Truncated { len: bytes.len() });
    }
    if bytes[..8] != MAGIC {
        return Err(Error::BadMagic);
    }
    let mut word = [0u8; 4];
    word.copy_from_slice(&bytes[8..12]);
    let version = u32::from_le_bytes(word);
    if version != FORMAT_VERSION {
        return Err(Error::UnsupportedVersion {
            found: version,
            expected: FORMAT_VERSION,
        });
    }
    word.copy_from_slice(&bytes[12..16]);
    let stored = u32::from_le_bytes(word);

    let payload = &bytes[HEADER_LEN..];
    let mut hasher = Crc32::new();
    hasher.update(payload);
    let computed = hasher.finalize();
    if stored != computed {
        return Err(Error::ChecksumMismatch { stored, computed });
    }
    Ok(bincode::deserialize(payload)?)
}

/// Write to `<path>.tmp` and rename over `path`, so a crash mid-write leaves the
/// previous file intact.
pub fn save_cache<P: AsRef<Path>>(path: P, file: &CacheFile) -> Result<()> {
    let path = path.as_ref();
    let bytes = encode_cache(file)?;

    let mut tmp: OsString = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    {
        let mut f = File::create(&tmp)?;
        f.write_all(&bytes)?;
        f.sync_all()?;
    }
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Load a file written by `save_cache`. A missing file is `Ok(None)`.
pub fn load_cache<P: AsRef<Path>>(path: P) -> Result<Option<CacheFile>> {
    match fs::read(path.as_ref()) {
        Ok(bytes) => decode_cache(&bytes).map(Some),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Durable home of the transposition table, shared across search runs.
///
/// Loaded wholesale at run start, overwritten wholesale on save (last writer wins).
#[derive(Debug, Clone)]
pub struct CacheStore {
    path: PathBuf,
    // proven-node counter carried by the last loaded file
    base_proven: u64,
}

impl CacheStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            base_proven: 0,
        }
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Proven-node counter of the last successful load.
    #[inline]
    pub fn base_proven(&self) -> u64 {
        self.base_proven
    }

    /// Load the table, or start empty when the file is missing or unreadable.
    pub fn load_or_empty(&mut self) -> InMemoryTT {
        match load_cache(&self.path) {
            Ok(Some(file)) => {
                info!(
                    path = %self.path.display(),
                    entries = file.entries.len(),
                    proven_nodes = file.proven_nodes,
                    saved_at = file.saved_at,
                    "loaded proof cache"
                );
                self.base_proven = file.proven_nodes;
                InMemoryTT::from_entries(file.entries)
            }
            Ok(None) => {
                debug!(path = %self.path.display(), "no proof cache yet; starting empty");
                InMemoryTT::default()
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "proof cache unreadable; starting empty");
                InMemoryTT::default()
            }
        }
    }

    /// Persist `tt`; `run_proven` is added to the loaded counter.
    pub fn save(&self, tt: &InMemoryTT, run_proven: u64) -> Result<()> {
        let file = CacheFile::from_table(tt, self.base_proven.saturating_add(run_proven));
        save_cache(&self.path, &file)?;
        debug!(path = %self.path.display(), entries = file.size, "saved proof cache");
        Ok(())
    }
}
