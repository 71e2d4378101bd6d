//! Header codec for note files.
//!
//! A header is a flat, ordered map of text scalars and one-level string lists,
//! written as `key: value` lines. Hand-rolled (no serde_yaml) so that
//! hand-edited files are tolerated: lines that do not parse are skipped and
//! reported as warnings instead of failing the read.

use std::fmt;

/// A single header value. Nested structures are not representable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderValue {
    Text(String),
    List(Vec<String>),
}

/// Ordered key/value map. Keys keep their insertion order on output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
    entries: Vec<(String, HeaderValue)>,
}

impl Header {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, replacing (in place) any existing value for `key`.
    /// Returns the replaced value.
    pub fn insert(&mut self, key: impl Into<String>, value: HeaderValue) -> Option<HeaderValue> {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    #[cfg(test)]
    pub fn get(&self, key: &str) -> Option<&HeaderValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    fn get_mut(&mut self, key: &str) -> Option<&mut HeaderValue> {
        self.entries.iter_mut().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &HeaderValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Why a header line (or field) was skipped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningReason {
    /// Line has no `key:` part and is not a list item
    MissingColon,
    /// Line starts with `:`
    EmptyKey,
    /// `- item` line with no open list above it
    OrphanListItem,
    /// Key appeared more than once; the last value wins
    DuplicateKey,
    /// Known field holds a list where text is expected, or the reverse
    WrongShape,
}

impl WarningReason {
    pub fn description(&self) -> &'static str {
        match self {
            Self::MissingColon => "not a key/value line",
            Self::EmptyKey => "empty key",
            Self::OrphanListItem => "list item outside a list",
            Self::DuplicateKey => "duplicate key, earlier value replaced",
            Self::WrongShape => "unexpected value shape, default used",
        }
    }
}

/// A header line or field that was ignored while parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWarning {
    /// 1-based line number within the header block, when line-based
    pub line_number: Option<usize>,
    /// The offending line (or key, for field-level warnings)
    pub text: String,
    pub reason: WarningReason,
}

impl ParseWarning {
    pub fn at_line(line_number: usize, text: &str, reason: WarningReason) -> Self {
        Self {
            line_number: Some(line_number),
            text: text.to_string(),
            reason,
        }
    }

    pub fn for_field(key: &str, reason: WarningReason) -> Self {
        Self {
            line_number: None,
            text: key.to_string(),
            reason,
        }
    }
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line_number {
            Some(n) => write!(f, "line {}: {}: {}", n, self.reason.description(), self.text),
            None => write!(f, "{}: {}", self.reason.description(), self.text),
        }
    }
}

/// Result of parsing a header block
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedHeader {
    pub header: Header,
    pub warnings: Vec<ParseWarning>,
}

/// Serialize a header to `key: value` lines.
pub fn serialize(header: &Header) -> String {
    let mut lines = Vec::with_capacity(header.len());

    for (key, value) in header.iter() {
        match value {
            HeaderValue::List(items) if items.is_empty() => {
                lines.push(format!("{}: []", key));
            }
            HeaderValue::List(items) => {
                lines.push(format!("{}:", key));
                for item in items {
                    lines.push(format!("  - {}", quote_if_needed(item)));
                }
            }
            HeaderValue::Text(s) => {
                lines.push(format!("{}: {}", key, quote_if_needed(s)));
            }
        }
    }

    lines.join("\n").trim_end().to_string()
}

/// Parse header lines. Never fails; skipped lines are reported as warnings.
pub fn parse(text: &str) -> ParsedHeader {
    let mut header = Header::new();
    let mut warnings = Vec::new();
    // Key whose value is an open block list
    let mut list_key: Option<String> = None;

    for (idx, raw_line) in text.lines().enumerate() {
        let line_number = idx + 1;
        let trimmed = raw_line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if let Some(item) = trimmed.strip_prefix("- ") {
            match list_key.as_deref().and_then(|k| header.get_mut(k)) {
                Some(HeaderValue::List(items)) => items.push(unquote(item.trim())),
                _ => warnings.push(ParseWarning::at_line(
                    line_number,
                    trimmed,
                    WarningReason::OrphanListItem,
                )),
            }
            continue;
        }

        let Some((key, rest)) = trimmed.split_once(':') else {
            warnings.push(ParseWarning::at_line(line_number, trimmed, WarningReason::MissingColon));
            continue;
        };

        let key = key.trim();
        if key.is_empty() {
            list_key = None;
            warnings.push(ParseWarning::at_line(line_number, trimmed, WarningReason::EmptyKey));
            continue;
        }

        let value = rest.trim();
        let parsed = if value == "[]" || value.is_empty() {
            HeaderValue::List(Vec::new())
        } else {
            HeaderValue::Text(unquote(value))
        };
        list_key = value.is_empty().then(|| key.to_string());

        if header.insert(key, parsed).is_some() {
            warnings.push(ParseWarning::at_line(line_number, trimmed, WarningReason::DuplicateKey));
        }
    }

    ParsedHeader { header, warnings }
}

fn needs_quoting(s: &str) -> bool {
    s.is_empty()
        || s == "[]"
        || s.contains([':', '#', '\n', '\r'])
        || s.trim() != s
        || s.starts_with(['"', '\''])
        || s.ends_with(['"', '\''])
}

/// Write a scalar or list item, double-quoted and escaped when it would not
/// survive a plain round trip
fn quote_if_needed(s: &str) -> String {
    if needs_quoting(s) {
        format!("\"{}\"", escape(s))
    } else {
        s.to_string()
    }
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out
}

fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            // Unknown escapes are kept as written
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Strip one pair of matching surrounding quotes. Double-quoted values are unescaped.
fn unquote(value: &str) -> String {
    if value.len() >= 2 {
        if value.starts_with('"') && value.ends_with('"') {
            return unescape(&value[1..value.len() - 1]);
        }
        if value.starts_with('\'') && value.ends_with('\'') {
            return value[1..value.len() - 1].to_string();
        }
    }
    value.to_string()
}
