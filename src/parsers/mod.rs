//! Decoding of the persisted history log
//!
//! # Error Handling Strategy
//!
//! This module follows a **graceful degradation** approach:
//!
//! - **Individual entry failures**: Malformed entries are logged with `tracing::warn!` and
//!   skipped, so a single bad record does not hide the rest of the history.
//!
//! - **Catastrophic failure detection**: If >50% of entries fail to parse, or if >100
//!   consecutive errors occur, decoding returns an error instead of an almost-empty log.
//!
//! - **Error propagation**: Uses `anyhow::Result` with context; callers surface the error
//!   rather than matching on error types.

pub mod deserializers;
pub mod log;

pub use log::parse_history_log;
