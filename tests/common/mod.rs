//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use codebox_history::ClipboardProvider;
use codebox_history::controller::{ConfirmDialog, ConfirmPrompt, Confirmation, NoticeKind, Notifier};
use serde_json::{Map, Value, json};
use tempfile::TempDir;

/// Builder for a temp directory holding a `storage.json` store document
pub struct StoreDirBuilder {
    temp_dir: TempDir,
    document: Map<String, Value>,
}

impl StoreDirBuilder {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir, document: Map::new() }
    }

    /// Set the history log to these entries
    pub fn with_entries(self, entries: &[EntryBuilder]) -> Self {
        let log = Value::Array(entries.iter().map(EntryBuilder::to_json).collect());
        self.with_raw_log(log)
    }

    /// Set the history key to an arbitrary JSON value
    pub fn with_raw_log(mut self, log: Value) -> Self {
        self.document.insert("codebox-history".to_string(), log);
        self
    }

    /// Add an unrelated key that must survive rewrites
    pub fn with_other_key(mut self, key: &str, value: Value) -> Self {
        self.document.insert(key.to_string(), value);
        self
    }

    /// Write the document and return the directory (consumes self)
    pub fn build(self) -> TempDir {
        let path = self.temp_dir.path().join("storage.json");
        let contents =
            serde_json::to_string_pretty(&Value::Object(self.document)).expect("Failed to encode");
        fs::write(path, contents).expect("Failed to write storage.json");
        self.temp_dir
    }

    /// Write raw file contents instead of a JSON document
    pub fn build_raw(self, contents: &str) -> TempDir {
        fs::write(self.temp_dir.path().join("storage.json"), contents)
            .expect("Failed to write storage.json");
        self.temp_dir
    }
}

impl Default for StoreDirBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn store_path(dir: &Path) -> PathBuf {
    dir.join("storage.json")
}

/// The history log as currently written on disk
pub fn read_log(dir: &Path) -> Value {
    let contents = fs::read_to_string(store_path(dir)).expect("Failed to read storage.json");
    let document: Value = serde_json::from_str(&contents).expect("Invalid storage.json");
    document["codebox-history"].clone()
}

/// Builder for stored entries
pub struct EntryBuilder {
    id: String,
    value: String,
    created_at: Option<Value>,
    from: Option<String>,
    link: Option<String>,
    tags: Vec<String>,
    remark: Option<String>,
}

impl EntryBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            value: format!("snippet {}", id),
            created_at: Some(json!(1_700_000_000_000_i64)),
            from: Some("github".to_string()),
            link: None,
            tags: Vec::new(),
            remark: None,
        }
    }

    pub fn value(mut self, value: &str) -> Self {
        self.value = value.to_string();
        self
    }

    /// Milliseconds since the epoch
    pub fn created_at_ms(mut self, ms: i64) -> Self {
        self.created_at = Some(json!(ms));
        self
    }

    pub fn created_at_rfc3339(mut self, timestamp: &str) -> Self {
        self.created_at = Some(json!(timestamp));
        self
    }

    pub fn without_created_at(mut self) -> Self {
        self.created_at = None;
        self
    }

    pub fn from(mut self, from: &str) -> Self {
        self.from = Some(from.to_string());
        self
    }

    pub fn without_from(mut self) -> Self {
        self.from = None;
        self
    }

    pub fn link(mut self, link: &str) -> Self {
        self.link = Some(link.to_string());
        self
    }

    pub fn tag(mut self, tag: &str) -> Self {
        self.tags.push(tag.to_string());
        self
    }

    pub fn remark(mut self, remark: &str) -> Self {
        self.remark = Some(remark.to_string());
        self
    }

    pub fn to_json(&self) -> Value {
        let mut object = Map::new();
        object.insert("id".to_string(), json!(self.id));
        object.insert("value".to_string(), json!(self.value));
        if let Some(created_at) = &self.created_at {
            object.insert("createdAt".to_string(), created_at.clone());
        }
        if let Some(from) = &self.from {
            object.insert("from".to_string(), json!(from));
        }
        if let Some(link) = &self.link {
            object.insert("link".to_string(), json!(link));
        }
        if !self.tags.is_empty() {
            object.insert("tags".to_string(), json!(self.tags));
        }
        if let Some(remark) = &self.remark {
            object.insert("remark".to_string(), json!(remark));
        }
        Value::Object(object)
    }
}

/// `count` entries with ids "1".."count"
pub fn numbered_entries(count: usize) -> Vec<EntryBuilder> {
    (1..=count).map(|i| EntryBuilder::new(&i.to_string())).collect()
}

/// Confirmation dialog with a fixed answer that records every prompt it is shown
pub struct RecordingDialog {
    answer: Confirmation,
    pub prompts: Vec<ConfirmPrompt>,
}

impl RecordingDialog {
    pub fn confirming() -> Self {
        Self { answer: Confirmation::Confirmed, prompts: Vec::new() }
    }

    pub fn cancelling() -> Self {
        Self { answer: Confirmation::Cancelled, prompts: Vec::new() }
    }
}

impl ConfirmDialog for RecordingDialog {
    fn confirm(&mut self, prompt: &ConfirmPrompt) -> Result<Confirmation> {
        self.prompts.push(prompt.clone());
        Ok(self.answer)
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub notices: Vec<(NoticeKind, String)>,
}

impl Notifier for RecordingNotifier {
    fn notify(&mut self, kind: NoticeKind, message: &str) {
        self.notices.push((kind, message.to_string()));
    }
}

/// In-memory clipboard; optionally fails every write
#[derive(Default)]
pub struct MockClipboard {
    pub contents: Option<String>,
    pub fail: bool,
}

impl ClipboardProvider for MockClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        if self.fail {
            anyhow::bail!("Clipboard unavailable");
        }
        self.contents = Some(text.to_string());
        Ok(())
    }
}
