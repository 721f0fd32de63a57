//! Persistent translation cache (`trCache.json`).
//!
//! Layout: `{ "<from>": { "<to>": { "<key>": "<translated>" } } }`.

use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
};

use tracing::{debug, warn};

use crate::error::{Error, Result};

pub const CACHE_FILE_NAME: &str = "trCache.json";

type CacheMap = BTreeMap<String, BTreeMap<String, BTreeMap<String, String>>>;

/// One cached translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    pub from: String,
    pub to: String,
    pub key: String,
    pub value: String,
}

/// Result of opening the cache.
pub struct CacheLoadResult {
    pub store: CacheStore,
    /// Set when the file existed but could not be parsed; the store is empty.
    pub corrupt: Option<Error>,
}

#[derive(Debug)]
pub struct CacheStore {
    path: PathBuf,
    entries: CacheMap,
    dirty: bool,
}

impl CacheStore {
    /// A cache that starts empty and will be saved to `path`.
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            entries: CacheMap::new(),
            dirty: false,
        }
    }

    /// Open the cache at `path`.
    ///
    /// A missing file gives an empty cache. A corrupt file also gives an empty
    /// cache, with the parse error returned in [`CacheLoadResult::corrupt`].
    pub fn load(path: &Path) -> Result<CacheLoadResult> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!("no translation cache at {}", path.display());
                return Ok(CacheLoadResult {
                    store: Self::new(path),
                    corrupt: None,
                });
            }
            Err(err) => return Err(Error::read(path, err)),
        };

        match serde_json::from_str::<CacheMap>(&content) {
            Ok(entries) => Ok(CacheLoadResult {
                store: Self {
                    path: path.to_path_buf(),
                    entries,
                    dirty: false,
                },
                corrupt: None,
            }),
            Err(source) => {
                warn!(
                    "ignoring unreadable translation cache {}: {}",
                    path.display(),
                    source
                );
                Ok(CacheLoadResult {
                    store: Self::new(path),
                    corrupt: Some(Error::CacheCorrupt {
                        path: path.to_path_buf(),
                        source,
                    }),
                })
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, from: &str, to: &str, key: &str) -> Option<&str> {
        self.entries
            .get(from)?
            .get(to)?
            .get(key)
            .map(String::as_str)
    }

    pub fn insert(&mut self, entry: CacheEntry) {
        let previous = self
            .entries
            .entry(entry.from)
            .or_default()
            .entry(entry.to)
            .or_default()
            .insert(entry.key, entry.value.clone());
        if previous.as_deref() != Some(entry.value.as_str()) {
            self.dirty = true;
        }
    }

    pub fn len(&self) -> usize {
        self.entries
            .values()
            .flat_map(BTreeMap::values)
            .map(BTreeMap::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Write the cache if anything changed since it was loaded or last saved.
    pub fn save(&mut self) -> Result<()> {
        if !self.is_dirty() {
            return Ok(());
        }
        let json = serde_json::to_string_pretty(&self.entries).map_err(Error::CacheSerialize)?;
        write_atomic(&self.path, format!("{json}\n").as_bytes())?;
        self.dirty = false;
        debug!("saved {} cached translation(s) to {}", self.len(), self.path.display());
        Ok(())
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let tmp = tmp_path(path);
    fs::write(&tmp, bytes).map_err(|err| Error::write(&tmp, err))?;
    fs::rename(&tmp, path).map_err(|err| Error::write(path, err))?;
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(CACHE_FILE_NAME);
    path.with_file_name(format!("{file_name}.tmp"))
}
