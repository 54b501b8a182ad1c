use super::query::SearchQuery;
use crate::models::{SearchField, ViewItem};

/// Derive the displayed view from the loaded items.
///
/// - Empty query: the loaded items, unchanged
/// - Otherwise: only items where any of value / createdAt / link / remark contains the
///   query (case-insensitive), each returned as a copy with its four searchable fields
///   carrying the match ranges
///
/// The loaded items themselves are never modified.
pub fn filter_items(loaded: &[ViewItem], query: &SearchQuery) -> Vec<ViewItem> {
    if query.is_empty() {
        return loaded.to_vec();
    }

    loaded
        .iter()
        .filter(|item| item_matches(item, query))
        .map(|item| highlight_item(item, query))
        .collect()
}

/// Whether any searchable field of `item` contains the query
pub fn item_matches(item: &ViewItem, query: &SearchQuery) -> bool {
    SearchField::ALL.iter().any(|field| query.is_match(item.field(*field).as_str()))
}

/// Copy of `item` with all four searchable fields re-highlighted for `query`
fn highlight_item(item: &ViewItem, query: &SearchQuery) -> ViewItem {
    let mut copy = item.clone();
    for field in SearchField::ALL {
        let highlighted = query.highlight(item.field(field).as_str());
        *copy.field_mut(field) = highlighted;
    }
    copy
}
