pub mod apply;
pub mod query;

pub use apply::{filter_items, item_matches};
pub use query::SearchQuery;
