/// Edge case integration tests
///
/// These tests cover unusual store contents: missing fields, odd timestamps, unicode,
/// duplicate ids and partially corrupted logs
mod common;

use codebox_history::controller::{Confirmation, DeleteOutcome, HistoryController, Preanswered};
use codebox_history::store::EntryStore;
use codebox_history::{JsonFileStore, Paginator};
use common::{EntryBuilder, StoreDirBuilder, numbered_entries, read_log, store_path};
use serde_json::json;

fn read_entries(dir: &tempfile::TempDir) -> anyhow::Result<Vec<codebox_history::Entry>> {
    JsonFileStore::open(store_path(dir.path()))?.read()
}

fn controller_for(dir: &tempfile::TempDir) -> HistoryController<JsonFileStore> {
    let store = JsonFileStore::open(store_path(dir.path())).unwrap();
    let mut controller = HistoryController::new(store, Paginator::new(20));
    controller.load().unwrap();
    controller
}

#[test]
fn test_edge_case_missing_optional_fields() {
    let dir = StoreDirBuilder::new()
        .with_entries(&[EntryBuilder::new("1").without_created_at().without_from()])
        .build();
    let controller = controller_for(&dir);

    let item = &controller.view()[0];
    assert_eq!(item.created_at.as_str(), "");
    assert_eq!(item.link.as_str(), "");
    assert_eq!(item.remark.as_str(), "");
    assert!(item.avatar_initial().is_none());
}

#[test]
fn test_edge_case_missing_history_key() {
    let dir = StoreDirBuilder::new().with_other_key("settings", json!({})).build();
    assert!(read_entries(&dir).unwrap().is_empty());
}

#[test]
fn test_edge_case_null_history_key() {
    let dir = StoreDirBuilder::new().with_raw_log(json!(null)).build();
    assert!(read_entries(&dir).unwrap().is_empty());
}

#[test]
fn test_edge_case_empty_file() {
    let dir = StoreDirBuilder::new().build_raw("");
    assert!(read_entries(&dir).unwrap().is_empty());
}

#[test]
fn test_edge_case_history_key_wrong_type() {
    let dir = StoreDirBuilder::new().with_raw_log(json!({"id": "1"})).build();

    let err = read_entries(&dir).unwrap_err();
    assert!(format!("{:#}", err).contains("must be a JSON array"));
}

#[test]
fn test_edge_case_truncated_json() {
    let dir = StoreDirBuilder::new().build_raw(r#"{"codebox-history": [{"id": "1", "val"#);
    assert!(read_entries(&dir).is_err());
}

#[test]
fn test_edge_case_partial_corruption_skips_bad_entries() {
    let mut log: Vec<_> = numbered_entries(4).iter().map(EntryBuilder::to_json).collect();
    log.insert(1, json!("not an entry"));
    log.insert(3, json!({"value": "no id"}));
    let dir = StoreDirBuilder::new().with_raw_log(json!(log)).build();

    let ids: Vec<_> = read_entries(&dir).unwrap().into_iter().map(|e| e.id).collect();
    assert_eq!(ids, vec!["1", "2", "3", "4"]);
}

#[test]
fn test_edge_case_mostly_corrupted_is_error() {
    let dir = StoreDirBuilder::new()
        .with_raw_log(json!([{"id": "1"}, 1, 2, 3, {"nope": true}]))
        .build();

    let err = read_entries(&dir).unwrap_err();
    assert!(format!("{:#}", err).contains("Too many parse failures"));
}

#[test]
fn test_edge_case_unicode_values() {
    let dir = StoreDirBuilder::new()
        .with_entries(&[
            EntryBuilder::new("1").value("日本語のコード 🦀").from("掘金"),
            EntryBuilder::new("2").value("emoji 👨‍👩‍👧 family"),
        ])
        .build();
    let mut controller = controller_for(&dir);

    assert_eq!(controller.view()[0].avatar_initial(), Some('掘'));

    controller.set_query("🦀");
    assert_eq!(controller.view().len(), 1);
    assert_eq!(controller.view()[0].value.to_string(), "日本語のコード <mark>🦀</mark>");
}

#[test]
fn test_edge_case_very_long_value() {
    let long_value = "x".repeat(200_000);
    let dir = StoreDirBuilder::new()
        .with_entries(&[EntryBuilder::new("1").value(&format!("{}needle", long_value))])
        .build();
    let mut controller = controller_for(&dir);

    controller.set_query("NEEDLE");
    assert_eq!(controller.view()[0].value.matches(), &[200_000..200_006]);
}

#[test]
fn test_edge_case_duplicate_ids_delete_removes_all_copies() {
    let dir = StoreDirBuilder::new()
        .with_entries(&[
            EntryBuilder::new("dup").value("first"),
            EntryBuilder::new("other"),
            EntryBuilder::new("dup").value("second"),
        ])
        .build();
    let mut controller = controller_for(&dir);
    assert_eq!(controller.view().len(), 3);

    let outcome =
        controller.delete_entry("dup", &mut Preanswered(Confirmation::Confirmed)).unwrap();

    assert_eq!(outcome, DeleteOutcome::Deleted(2));
    assert_eq!(read_log(dir.path()).as_array().unwrap().len(), 1);
}

#[test]
fn test_edge_case_timestamp_formats() {
    let dir = StoreDirBuilder::new()
        .with_entries(&[
            EntryBuilder::new("ms").created_at_ms(0),
            EntryBuilder::new("rfc").created_at_rfc3339("2025-11-02T17:41:20.016+08:00"),
            EntryBuilder::new("empty").created_at_rfc3339(""),
        ])
        .build();
    let controller = controller_for(&dir);

    let dates: Vec<_> = controller.view().iter().map(|item| item.created_at.as_str()).collect();
    assert_eq!(dates, vec!["1970-01-01 00:00:00", "2025-11-02 09:41:20", ""]);
}

#[test]
fn test_edge_case_unreadable_timestamp_keeps_entry() {
    let mut log: Vec<_> = numbered_entries(3).iter().map(EntryBuilder::to_json).collect();
    log.push(EntryBuilder::new("bad").value("still here").created_at_rfc3339("yesterday").to_json());
    let dir = StoreDirBuilder::new().with_raw_log(json!(log)).build();

    let entries = read_entries(&dir).unwrap();
    assert_eq!(entries.len(), 4);
    assert_eq!(entries[3].value, "still here");
    assert!(entries[3].created_at.is_none());
}

#[test]
fn test_edge_case_single_offsetless_timestamp_loads() {
    let dir = StoreDirBuilder::new()
        .with_entries(&[EntryBuilder::new("1").created_at_rfc3339("2024-01-01T00:00:00")])
        .build();
    let controller = controller_for(&dir);

    assert_eq!(controller.view().len(), 1);
    assert_eq!(controller.view()[0].created_at.as_str(), "2024-01-01 00:00:00");
}

#[test]
fn test_edge_case_whitespace_only_query() {
    let dir = StoreDirBuilder::new().with_entries(&numbered_entries(3)).build();
    let mut controller = controller_for(&dir);

    controller.set_query("   ");
    assert_eq!(controller.view().len(), 3);
    assert!(controller.query().is_empty());
}

#[test]
fn test_edge_case_query_with_surrounding_spaces_is_trimmed() {
    let dir = StoreDirBuilder::new()
        .with_entries(&[EntryBuilder::new("1").value("a b"), EntryBuilder::new("2").value("ab")])
        .build();
    let mut controller = controller_for(&dir);

    controller.set_query("  b ");
    assert_eq!(controller.view().len(), 2);
}

#[test]
fn test_edge_case_delete_from_empty_store() {
    let dir = tempfile::TempDir::new().unwrap();
    let mut controller = controller_for(&dir);

    let outcome = controller.delete_all(&mut Preanswered(Confirmation::Confirmed)).unwrap();

    assert_eq!(outcome, DeleteOutcome::Deleted(0));
    assert_eq!(read_log(dir.path()), json!([]));
}
