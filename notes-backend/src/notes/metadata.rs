//! Typed note metadata and its mapping onto the generic header codec.

use chrono::{DateTime, SecondsFormat, Utc};
use strum::{AsRefStr, EnumIter, EnumString, IntoEnumIterator};

use super::header::{Header, HeaderValue, ParseWarning, WarningReason};

/// Known header fields, in the order they are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, AsRefStr, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum MetadataField {
    Created,
    Updated,
    ConversationId,
    Tags,
    AiClient,
    Summary,
}

impl MetadataField {
    pub fn is_list(&self) -> bool {
        matches!(self, Self::Tags)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteMetadata {
    /// ISO-8601 creation timestamp (kept as text)
    pub created: String,
    /// ISO-8601 last-write timestamp (kept as text)
    pub updated: String,
    pub conversation_id: Option<String>,
    pub tags: Vec<String>,
    pub ai_client: Option<String>,
    pub summary: String,
    /// Keys outside the known schema, kept so a rewrite does not drop them
    pub extra: Vec<(String, HeaderValue)>,
}

/// Format a timestamp the way note headers store it, e.g. `2024-06-01T09:30:00.000Z`
pub fn timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl NoteMetadata {
    /// Default header for a newly created note.
    pub fn new_for_title(
        title: &str,
        summary: Option<&str>,
        tags: Vec<String>,
        conversation_id: Option<&str>,
        ai_client: Option<&str>,
        now: DateTime<Utc>,
    ) -> Self {
        let now = timestamp(now);
        Self {
            created: now.clone(),
            updated: now,
            conversation_id: non_blank(conversation_id),
            tags,
            ai_client: non_blank(ai_client),
            summary: non_blank(summary).unwrap_or_else(|| format!("Note about {}", title.trim())),
            extra: Vec::new(),
        }
    }

    fn field_value(&self, field: MetadataField) -> Option<HeaderValue> {
        match field {
            MetadataField::Created => Some(HeaderValue::Text(self.created.clone())),
            MetadataField::Updated => Some(HeaderValue::Text(self.updated.clone())),
            MetadataField::ConversationId => self.conversation_id.clone().map(HeaderValue::Text),
            MetadataField::Tags => Some(HeaderValue::List(self.tags.clone())),
            MetadataField::AiClient => self.ai_client.clone().map(HeaderValue::Text),
            MetadataField::Summary => Some(HeaderValue::Text(self.summary.clone())),
        }
    }

    /// Build the header map. Absent optional fields are left out entirely.
    pub fn to_header(&self) -> Header {
        let mut header = Header::new();
        for field in MetadataField::iter() {
            if let Some(value) = self.field_value(field) {
                header.insert(field.as_ref(), value);
            }
        }
        for (key, value) in &self.extra {
            header.insert(key.clone(), value.clone());
        }
        header
    }

    /// Read known fields out of a parsed header. Missing fields take their
    /// defaults; fields with the wrong shape take their defaults and are reported.
    pub fn from_header(header: &Header) -> (Self, Vec<ParseWarning>) {
        let mut meta = Self::default();
        let mut warnings = Vec::new();

        for (key, value) in header.iter() {
            let Ok(field) = key.parse::<MetadataField>() else {
                meta.extra.push((key.to_string(), value.clone()));
                continue;
            };

            match (field.is_list(), value) {
                (true, HeaderValue::List(items)) => meta.tags = items.clone(),
                (false, HeaderValue::Text(text)) => match field {
                    MetadataField::Created => meta.created = text.clone(),
                    MetadataField::Updated => meta.updated = text.clone(),
                    MetadataField::Summary => meta.summary = text.clone(),
                    MetadataField::ConversationId => meta.conversation_id = non_blank(Some(text.as_str())),
                    MetadataField::AiClient => meta.ai_client = non_blank(Some(text.as_str())),
                    MetadataField::Tags => {}
                },
                _ => warnings.push(ParseWarning::for_field(key, WarningReason::WrongShape)),
            }
        }

        (meta, warnings)
    }
}
