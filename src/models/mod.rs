//! Data models for the codebox history log.
//!
//! - [`Entry`] - A captured record as persisted in the store
//! - [`ViewItem`] - An entry decorated with transient list state (placeholders, expand)
//! - [`Highlighted`] - Field text plus the ranges matched by the current search
//!
//! `Entry` uses serde for JSON (de)serialization with a custom timestamp
//! deserializer from the `parsers::deserializers` module.

pub mod entry;
pub mod highlighted;
pub mod view;

pub use entry::{CREATED_AT_FORMAT, Entry};
pub use highlighted::{DEFAULT_HIGHLIGHT_CLOSE, DEFAULT_HIGHLIGHT_OPEN, Highlighted, Segment};
pub use view::{ABSENT_FIELD, ROW_PREVIEW_CHARS, SearchField, ViewItem};
