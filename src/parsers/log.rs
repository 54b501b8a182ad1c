use std::collections::HashSet;

use anyhow::{Result, bail};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::models::Entry;

const MAX_CONSECUTIVE_ERRORS: usize = 100;

/// Decode the persisted history log (a JSON array of entries)
/// Gracefully handles malformed entries by logging and skipping them
/// Returns an error if more than 50% of entries fail to parse or >100 consecutive errors
pub fn parse_history_log(value: &Value) -> Result<Vec<Entry>> {
    let items = match value {
        Value::Null => return Ok(Vec::new()),
        Value::Array(items) => items,
        other => bail!("History log must be a JSON array, found {}", json_kind(other)),
    };

    let mut entries = Vec::with_capacity(items.len());
    let mut seen_ids = HashSet::new();
    let mut skipped_count = 0;
    let mut consecutive_errors = 0;

    for (idx, item) in items.iter().enumerate() {
        match Entry::deserialize(item) {
            Ok(entry) => {
                if !seen_ids.insert(entry.id.clone()) {
                    warn!(index = idx, id = %entry.id, "Duplicate entry id in history log");
                }
                entries.push(entry);
                consecutive_errors = 0; // Reset on success
            }
            Err(e) => {
                warn!(index = idx, error = %e, "Skipping malformed history entry");
                skipped_count += 1;
                consecutive_errors += 1;

                if consecutive_errors >= MAX_CONSECUTIVE_ERRORS {
                    bail!(
                        "Too many consecutive parse errors ({}) in history log - store may be corrupted",
                        consecutive_errors
                    );
                }
            }
        }
    }

    if !items.is_empty() {
        let failure_rate = (skipped_count as f64) / (items.len() as f64);
        if failure_rate > 0.5 {
            bail!(
                "Too many parse failures in history log: {} of {} entries failed ({:.1}%)",
                skipped_count,
                items.len(),
                failure_rate * 100.0
            );
        }
    }

    if skipped_count > 0 {
        debug!(entries = entries.len(), skipped = skipped_count, "Parsed history log");
    }

    Ok(entries)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
