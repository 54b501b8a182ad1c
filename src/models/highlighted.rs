use std::fmt;
use std::ops::Range;

/// Default marker opening a highlighted match
pub const DEFAULT_HIGHLIGHT_OPEN: &str = "<mark>";
/// Default marker closing a highlighted match
pub const DEFAULT_HIGHLIGHT_CLOSE: &str = "</mark>";

/// Display text together with the byte ranges that matched the active search.
///
/// The text itself is never rewritten; markers are only inserted when the value
/// is rendered (`Display` uses `<mark>`…`</mark>`), so the original casing is
/// kept and the markers can always be stripped again via [`Highlighted::as_str`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Highlighted {
    text: String,
    matches: Vec<Range<usize>>,
}

/// A run of text that is either entirely inside or entirely outside a match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub highlighted: bool,
}

impl Highlighted {
    pub fn plain(text: impl Into<String>) -> Self {
        Self { text: text.into(), matches: Vec::new() }
    }

    /// Ranges must be sorted, non-overlapping and on char boundaries.
    pub(crate) fn with_matches(text: String, matches: Vec<Range<usize>>) -> Self {
        debug_assert!(matches.windows(2).all(|w| w[0].end <= w[1].start));
        debug_assert!(
            matches
                .iter()
                .all(|r| text.is_char_boundary(r.start) && text.is_char_boundary(r.end))
        );
        Self { text, matches }
    }

    /// The text without any highlight markers
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn matches(&self) -> &[Range<usize>] {
        &self.matches
    }

    pub fn is_highlighted(&self) -> bool {
        !self.matches.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Drop match information, keeping only the text
    pub fn into_plain(self) -> Self {
        Self::plain(self.text)
    }

    /// Split the text into alternating unmatched / matched runs, skipping empty runs
    pub fn segments(&self) -> Vec<Segment<'_>> {
        let mut segments = Vec::with_capacity(self.matches.len() * 2 + 1);
        let mut cursor = 0;

        for range in &self.matches {
            if range.start > cursor {
                segments.push(Segment { text: &self.text[cursor..range.start], highlighted: false });
            }
            if range.end > range.start {
                segments.push(Segment { text: &self.text[range.clone()], highlighted: true });
            }
            cursor = range.end;
        }

        if cursor < self.text.len() {
            segments.push(Segment { text: &self.text[cursor..], highlighted: false });
        }

        segments
    }

    /// Render with every match wrapped in `open`/`close`
    pub fn render(&self, open: &str, close: &str) -> String {
        let extra = self.matches.len() * (open.len() + close.len());
        let mut out = String::with_capacity(self.text.len() + extra);

        for segment in self.segments() {
            if segment.highlighted {
                out.push_str(open);
                out.push_str(segment.text);
                out.push_str(close);
            } else {
                out.push_str(segment.text);
            }
        }

        out
    }

    /// Keep the first `max_chars` characters; matches crossing the cut are clipped
    pub fn truncate_chars(&self, max_chars: usize) -> Self {
        let Some((cut, _)) = self.text.char_indices().nth(max_chars) else {
            return self.clone();
        };

        let matches = self
            .matches
            .iter()
            .filter(|r| r.start < cut)
            .map(|r| r.start..r.end.min(cut))
            .collect();

        Self { text: self.text[..cut].to_string(), matches }
    }
}

impl fmt::Display for Highlighted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(DEFAULT_HIGHLIGHT_OPEN, DEFAULT_HIGHLIGHT_CLOSE))
    }
}

impl From<&str> for Highlighted {
    fn from(text: &str) -> Self {
        Self::plain(text)
    }
}

impl From<String> for Highlighted {
    fn from(text: String) -> Self {
        Self::plain(text)
    }
}
