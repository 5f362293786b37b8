use std::fmt;
use std::str::FromStr;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Named slot for attachments, each forwarded under its own form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    /// Primary documents (`pdfs`).
    Pdfs,
    /// Secondary reports (`ctrs`).
    Ctrs,
}

impl Channel {
    pub const ALL: [Channel; 2] = [Channel::Pdfs, Channel::Ctrs];

    /// Form field name used for files in this channel.
    pub fn field_name(self) -> &'static str {
        match self {
            Self::Pdfs => "pdfs",
            Self::Ctrs => "ctrs",
        }
    }

    /// Form field name carrying the number of files in this channel.
    pub fn count_field_name(self) -> &'static str {
        match self {
            Self::Pdfs => "pdf_count",
            Self::Ctrs => "ctr_count",
        }
    }

    /// Look up a channel by its form field name.
    pub fn from_field_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.field_name() == name)
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

impl FromStr for Channel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_field_name(s).ok_or_else(|| format!("unknown attachment channel: {s}"))
    }
}

/// A named binary blob forwarded as-is.
///
/// The content is never inspected or re-encoded. `content_type` is whatever
/// the sender declared, if anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub filename: String,
    pub content_type: Option<String>,
    pub data: Bytes,
}

impl Attachment {
    pub fn new(filename: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            filename: filename.into(),
            content_type: None,
            data: data.into(),
        }
    }

    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
