use super::entry::Entry;
use super::highlighted::Highlighted;

/// Placeholder text that absent optional fields are coerced to before matching.
///
/// Being empty, it never contains a (trimmed, non-empty) search query.
pub const ABSENT_FIELD: &str = "";

/// Characters of the value shown in a collapsed list row
pub const ROW_PREVIEW_CHARS: usize = 80;

/// The four entry fields the search box matches against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchField {
    Value,
    CreatedAt,
    Link,
    Remark,
}

impl SearchField {
    pub const ALL: [SearchField; 4] =
        [SearchField::Value, SearchField::CreatedAt, SearchField::Link, SearchField::Remark];
}

/// An entry decorated with transient list state. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewItem {
    /// `None` for placeholder rows shown while more entries load
    pub id: Option<String>,
    pub value: Highlighted,
    pub created_at: Highlighted,
    pub from: String,
    pub link: Highlighted,
    pub tags: Vec<String>,
    pub remark: Highlighted,
    pub loading: bool,
    pub expand: bool,
}

impl ViewItem {
    pub fn from_entry(entry: &Entry) -> Self {
        Self {
            id: Some(entry.id.clone()),
            value: Highlighted::plain(entry.value.as_str()),
            created_at: Highlighted::plain(
                entry.created_at_display().unwrap_or_else(|| ABSENT_FIELD.to_string()),
            ),
            from: entry.from.clone(),
            link: Highlighted::plain(entry.link.as_deref().unwrap_or(ABSENT_FIELD)),
            tags: entry.tags.clone(),
            remark: Highlighted::plain(entry.remark.as_deref().unwrap_or(ABSENT_FIELD)),
            loading: false,
            expand: false,
        }
    }

    /// Skeleton row: empty value and source, `loading` set
    pub fn placeholder() -> Self {
        Self {
            id: None,
            value: Highlighted::default(),
            created_at: Highlighted::default(),
            from: String::new(),
            link: Highlighted::default(),
            tags: Vec::new(),
            remark: Highlighted::default(),
            loading: true,
            expand: false,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.id.is_none()
    }

    /// First character of the source label, used as the row avatar
    pub fn avatar_initial(&self) -> Option<char> {
        self.from.chars().next()
    }

    pub fn field(&self, field: SearchField) -> &Highlighted {
        match field {
            SearchField::Value => &self.value,
            SearchField::CreatedAt => &self.created_at,
            SearchField::Link => &self.link,
            SearchField::Remark => &self.remark,
        }
    }

    pub fn field_mut(&mut self, field: SearchField) -> &mut Highlighted {
        match field {
            SearchField::Value => &mut self.value,
            SearchField::CreatedAt => &mut self.created_at,
            SearchField::Link => &mut self.link,
            SearchField::Remark => &mut self.remark,
        }
    }

    /// Copy of this item with `expand` set to the given value
    pub fn with_expand(&self, expand: bool) -> Self {
        Self { expand, ..self.clone() }
    }
}
