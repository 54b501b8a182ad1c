//! JSON document store with atomic writes
//!
//! The document is a single JSON object mapping storage keys to values, e.g.
//! `{"codebox-history": [ ...entries... ]}`. Keys other than the history key are
//! preserved on write. Writes go to a temp file that is renamed into place.

use std::collections::{HashMap, HashSet};
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Receiver;
use std::time::SystemTime;

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, info};

use super::{EntryStore, HISTORY_KEY, StoreChange, Subscribers};
use crate::models::Entry;
use crate::parsers::parse_history_log;
use crate::utils::validate_file_size;

/// Default file name of the store document inside the data directory
pub const STORE_FILENAME: &str = "storage.json";

/// Modification time and size of the store document, for staleness detection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FileStamp {
    modified: SystemTime,
    size: u64,
}

impl FileStamp {
    /// `None` when the file does not exist
    fn probe(path: &Path) -> Result<Option<Self>> {
        match fs::metadata(path) {
            Ok(metadata) => {
                let modified = metadata.modified().with_context(|| {
                    format!("Failed to read modification time: {}", path.display())
                })?;
                Ok(Some(Self { modified, size: metadata.len() }))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e)
                .with_context(|| format!("Failed to read store metadata: {}", path.display())),
        }
    }
}

/// History log persisted in a JSON document on disk
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    key: String,
    stamp: Option<FileStamp>,
    subscribers: Subscribers,
}

impl JsonFileStore {
    /// Open the store at `path` using [`HISTORY_KEY`]. The file need not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        Self::with_key(path, HISTORY_KEY)
    }

    pub fn with_key(path: impl Into<PathBuf>, key: impl Into<String>) -> Result<Self> {
        let path = path.into();
        let stamp = FileStamp::probe(&path)?;
        Ok(Self { path, key: key.into(), stamp, subscribers: Subscribers::default() })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Load the whole document; a missing or blank file is an empty document
    fn read_document(&self) -> Result<Map<String, Value>> {
        let mut file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to open store: {}", self.path.display()));
            }
        };
        validate_file_size(&file, &self.path)?;

        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .with_context(|| format!("Failed to read store: {}", self.path.display()))?;

        if contents.trim().is_empty() {
            return Ok(Map::new());
        }

        let document: Value = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse store JSON: {}", self.path.display()))?;

        match document {
            Value::Object(map) => Ok(map),
            _ => bail!("Store document must be a JSON object: {}", self.path.display()),
        }
    }

    /// Write the document atomically (temp file + rename)
    fn write_document(&self, document: &Map<String, Value>) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent).context("Failed to create store directory")?;
        }

        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| STORE_FILENAME.to_string());
        let temp_path = self.path.with_file_name(format!("{}.tmp", file_name));

        let json = serde_json::to_string_pretty(document).context("Failed to serialize store")?;
        fs::write(&temp_path, json).context("Failed to write store temp file")?;
        fs::rename(&temp_path, &self.path).context("Failed to rename store temp file")?;

        Ok(())
    }
}

impl EntryStore for JsonFileStore {
    fn read(&self) -> Result<Vec<Entry>> {
        let document = self.read_document()?;
        let value = document.get(&self.key).unwrap_or(&Value::Null);
        parse_history_log(value)
            .with_context(|| format!("Failed to decode \"{}\" in {}", self.key, self.path.display()))
    }

    fn write(&mut self, log: Vec<Entry>) -> Result<()> {
        let mut document = self.read_document()?;
        let previous = document.get(&self.key).and_then(Value::as_array).cloned().unwrap_or_default();
        let value = encode_log(&log, &previous)?;
        document.insert(self.key.clone(), value);

        self.write_document(&document)?;
        self.stamp = FileStamp::probe(&self.path)?;

        info!(entries = log.len(), path = %self.path.display(), "Wrote history log");
        self.subscribers.notify(&log);
        Ok(())
    }

    fn subscribe(&mut self) -> Receiver<StoreChange> {
        self.subscribers.subscribe()
    }

    fn sync(&mut self) -> Result<bool> {
        let current = FileStamp::probe(&self.path)?;
        if current == self.stamp {
            return Ok(false);
        }

        debug!(path = %self.path.display(), "Store changed on disk");
        self.stamp = current;
        let log = self.read()?;
        self.subscribers.notify(&log);
        Ok(true)
    }
}

/// Encode `log` for the store document.
///
/// - Entries whose stored JSON still decodes to the same value are re-emitted verbatim, so
///   fields this crate does not model (and the original `createdAt` spelling) survive
/// - Stored elements that never decoded are carried over unchanged, placed after the
///   nearest earlier entry that is still in `log` (or at the front)
/// - An empty `log` clears the array, undecodable elements included
fn encode_log(log: &[Entry], previous: &[Value]) -> Result<Value> {
    if log.is_empty() {
        return Ok(Value::Array(Vec::new()));
    }

    let surviving: HashSet<&str> = log.iter().map(|entry| entry.id.as_str()).collect();
    let mut stored: HashMap<&str, Vec<(&Value, Entry)>> = HashMap::new();
    let mut undecoded: HashMap<Option<&str>, Vec<&Value>> = HashMap::new();
    let mut anchor: Option<&str> = None;

    for raw in previous {
        let id = raw.get("id").and_then(Value::as_str);
        match (id, Entry::deserialize(raw)) {
            (Some(id), Ok(decoded)) => {
                stored.entry(id).or_default().push((raw, decoded));
                if surviving.contains(id) {
                    anchor = Some(id);
                }
            }
            _ => undecoded.entry(anchor).or_default().push(raw),
        }
    }

    let mut encoded = Vec::with_capacity(previous.len().max(log.len()));
    encoded.extend(undecoded.remove(&None).unwrap_or_default().into_iter().cloned());

    for entry in log {
        let unchanged = stored.get_mut(entry.id.as_str()).and_then(|candidates| {
            let pos = candidates.iter().position(|(_, decoded)| decoded == entry)?;
            Some(candidates.remove(pos).0)
        });
        match unchanged {
            Some(raw) => encoded.push(raw.clone()),
            None => encoded
                .push(serde_json::to_value(entry).context("Failed to serialize history entry")?),
        }

        if let Some(carried) = undecoded.remove(&Some(entry.id.as_str())) {
            encoded.extend(carried.into_iter().cloned());
        }
    }

    Ok(Value::Array(encoded))
}
