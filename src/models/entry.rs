use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Display format used for `createdAt` in list rows and in search matching.
pub const CREATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One captured codebox record as persisted in the history log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: String,
    #[serde(default)]
    pub value: String,
    #[serde(
        rename = "createdAt",
        default,
        deserialize_with = "crate::parsers::deserializers::deserialize_optional_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub from: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
}

impl Entry {
    pub fn new(id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
            created_at: None,
            from: String::new(),
            link: None,
            tags: Vec::new(),
            remark: None,
        }
    }

    /// `createdAt` rendered with [`CREATED_AT_FORMAT`], or `None` when absent
    pub fn created_at_display(&self) -> Option<String> {
        self.created_at.map(|ts| ts.format(CREATED_AT_FORMAT).to_string())
    }
}
