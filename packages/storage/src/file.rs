use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use formbuilder_document::Document;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::{normalize_key, DocumentStore, StorageError, StorageResult};

const EXTENSION: &str = ".json";

/// Longest encoded key used directly as a file name
const MAX_ENCODED_LEN: usize = 160;

/// Prefix of hashed file names. Never produced by `encode_key`.
const HASHED_PREFIX: char = '~';

/// Files tried per hash before giving up on a long key
const HASH_SLOTS: u32 = 8;

/// File contents for keys too long to encode into a file name
#[derive(Serialize, Deserialize)]
struct HashedEntry<D> {
    key: String,
    document: D,
}

/// Where a key lives on disk
enum Slot {
    Plain(PathBuf),
    Hashed {
        path: PathBuf,
        stored: Option<Document>,
    },
}

/// One pretty-printed JSON file per key inside `root`.
///
/// Keys are percent-encoded into file names (`/pricing` → `%2Fpricing.json`). Keys whose
/// encoding is too long for a file name go to `~{crc32}.json` (or `~{crc32}-{n}.json` on
/// a hash collision), and the file records the key next to the document. Saves write a
/// temporary file and rename it over the old one, so a reader never sees a partial
/// document.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Store rooted at `root`. The directory is created on first save.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn hashed_path(&self, hash: u32, slot: u32) -> PathBuf {
        let name = match slot {
            0 => format!("{}{:08x}{}", HASHED_PREFIX, hash, EXTENSION),
            n => format!("{}{:08x}-{}{}", HASHED_PREFIX, hash, n, EXTENSION),
        };
        self.root.join(name)
    }

    async fn slot_for(&self, key: &str) -> StorageResult<Slot> {
        let encoded = encode_key(key);
        if encoded.len() <= MAX_ENCODED_LEN {
            return Ok(Slot::Plain(self.root.join(format!("{}{}", encoded, EXTENSION))));
        }

        let hash = crc32fast::hash(key.as_bytes());
        let mut free = None;
        for slot in 0..HASH_SLOTS {
            let path = self.hashed_path(hash, slot);
            match read_hashed(&path).await? {
                Some(entry) if entry.key == key => {
                    return Ok(Slot::Hashed {
                        path,
                        stored: Some(entry.document),
                    })
                }
                Some(_) => {}
                None => {
                    free.get_or_insert(path);
                }
            }
        }

        match free {
            Some(path) => Ok(Slot::Hashed { path, stored: None }),
            None => Err(StorageError::InvalidKey(format!(
                "no free file for key of {} bytes",
                key.len()
            ))),
        }
    }

    /// Write through a short-named temp file and rename over `path`
    async fn write_atomic(&self, path: &Path, contents: String) -> StorageResult<()> {
        fs::create_dir_all(&self.root).await?;

        let temp = self.root.join(format!(".{}.tmp", Uuid::new_v4()));
        fs::write(&temp, contents).await?;
        if let Err(e) = fs::rename(&temp, path).await {
            let _ = fs::remove_file(&temp).await;
            return Err(e.into());
        }
        Ok(())
    }
}

async fn read_hashed(path: &Path) -> StorageResult<Option<HashedEntry<Document>>> {
    match fs::read_to_string(path).await {
        Ok(source) => Ok(Some(serde_json::from_str(&source)?)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

#[async_trait]
impl DocumentStore for FileStore {
    async fn load(&self, key: &str) -> StorageResult<Option<Document>> {
        let key = normalize_key(key)?;

        let path = match self.slot_for(&key).await? {
            Slot::Plain(path) => path,
            Slot::Hashed { stored, .. } => {
                debug!(key = %key, found = stored.is_some(), "Loaded hashed document");
                return Ok(stored);
            }
        };

        let source = match fs::read_to_string(&path).await {
            Ok(source) => source,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(key = %key, "No stored document");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let document: Document = serde_json::from_str(&source)?;
        debug!(key = %key, path = %path.display(), nodes = document.len(), "Loaded document");
        Ok(Some(document))
    }

    async fn save(&self, key: &str, document: &Document) -> StorageResult<()> {
        let key = normalize_key(key)?;

        let (path, json) = match self.slot_for(&key).await? {
            Slot::Plain(path) => (path, serde_json::to_string_pretty(document)?),
            Slot::Hashed { path, .. } => {
                let entry = HashedEntry {
                    key: key.clone(),
                    document,
                };
                (path, serde_json::to_string_pretty(&entry)?)
            }
        };
        self.write_atomic(&path, json).await?;

        debug!(key = %key, path = %path.display(), nodes = document.len(), "Saved document");
        Ok(())
    }

    async fn delete(&self, key: &str) -> StorageResult<bool> {
        let key = normalize_key(key)?;
        let path = match self.slot_for(&key).await? {
            Slot::Plain(path) => path,
            Slot::Hashed { stored: None, .. } => return Ok(false),
            Slot::Hashed { path, .. } => path,
        };

        match fs::remove_file(path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn keys(&self) -> StorageResult<Vec<String>> {
        let mut entries = match fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut keys = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let file_name = entry.file_name();
            let Some(name) = file_name.to_str() else {
                continue;
            };
            if name.starts_with('.') || !name.ends_with(EXTENSION) {
                continue;
            }

            if name.starts_with(HASHED_PREFIX) {
                match read_hashed(&entry.path()).await {
                    Ok(Some(hashed)) => keys.push(hashed.key),
                    Ok(None) => {}
                    Err(e) => warn!(file = %name, error = %e, "Skipping unreadable hashed document"),
                }
                continue;
            }

            let stem = &name[..name.len() - EXTENSION.len()];
            match decode_key(stem) {
                Some(key) => keys.push(key),
                None => warn!(file = %name, "Skipping file with undecodable name"),
            }
        }

        keys.sort();
        Ok(keys)
    }
}

fn is_plain(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_')
}

/// Percent-encode every byte outside `[A-Za-z0-9_-]`
fn encode_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for byte in key.bytes() {
        if is_plain(byte) {
            out.push(byte as char);
        } else {
            out.push_str(&format!("%{:02X}", byte));
        }
    }
    out
}

fn decode_key(name: &str) -> Option<String> {
    let bytes = name.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'%' => {
                let hex = name.get(i + 1..i + 3)?;
                out.push(u8::from_str_radix(hex, 16).ok()?);
                i += 3;
            }
            byte if is_plain(byte) => {
                out.push(byte);
                i += 1;
            }
            _ => return None,
        }
    }

    String::from_utf8(out).ok()
}
