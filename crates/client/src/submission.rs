use linkrelay_core::{Attachment, Channel, DEFAULT_TITLE, LinkSet};
use linkrelay_webhook::multipart_form;
use reqwest::multipart::Form;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One submission as the upload page would send it to `/api/submit`.
///
/// Links are held as a [`LinkSet`], so they are normalized and deduplicated
/// on the way in. Files keep their original names.
#[derive(Debug, Clone)]
pub struct SubmissionForm {
    title: String,
    links: LinkSet,
    pdfs: Vec<Attachment>,
    ctrs: Vec<Attachment>,
}

impl Default for SubmissionForm {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_owned(),
            links: LinkSet::default(),
            pdfs: Vec::new(),
            ctrs: Vec::new(),
        }
    }
}

impl SubmissionForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title. A blank title keeps the default.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        let title = title.into();
        if !title.trim().is_empty() {
            self.title = title;
        }
        self
    }

    /// Replace the link set.
    #[must_use]
    pub fn with_links(mut self, links: LinkSet) -> Self {
        self.links = links;
        self
    }

    /// Add one raw link. Returns `false` if it was blank or a duplicate.
    pub fn add_link(&mut self, raw: &str) -> bool {
        self.links.insert(raw)
    }

    /// Attach a file to the given channel.
    pub fn attach(&mut self, channel: Channel, attachment: Attachment) {
        match channel {
            Channel::Pdfs => self.pdfs.push(attachment),
            Channel::Ctrs => self.ctrs.push(attachment),
        }
    }

    /// Builder-style variant of [`attach`](Self::attach).
    #[must_use]
    pub fn with_attachment(mut self, channel: Channel, attachment: Attachment) -> Self {
        self.attach(channel, attachment);
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn links(&self) -> &LinkSet {
        &self.links
    }

    pub fn attachments(&self, channel: Channel) -> &[Attachment] {
        match channel {
            Channel::Pdfs => &self.pdfs,
            Channel::Ctrs => &self.ctrs,
        }
    }

    /// The scalar form fields, in the order they are sent.
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("title", self.title.clone()),
            ("links_json", self.links.to_json()),
            ("links_count", self.links.len().to_string()),
            (Channel::Pdfs.count_field_name(), self.pdfs.len().to_string()),
            (Channel::Ctrs.count_field_name(), self.ctrs.len().to_string()),
        ]
    }

    pub(crate) fn into_multipart(self) -> Form {
        let fields = self.fields();
        let files = [(Channel::Pdfs, self.pdfs), (Channel::Ctrs, self.ctrs)]
            .into_iter()
            .flat_map(|(channel, files)| files.into_iter().map(move |file| (channel, file)));
        multipart_form(fields, files)
    }
}

/// The decoded `/api/submit` envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub ok: bool,

    /// Interpreted webhook response on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n8n: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Interpreted webhook response on an upstream failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<Value>,

    /// HTTP status the server answered with.
    #[serde(skip)]
    pub status: u16,
}

impl SubmitResponse {
    pub(crate) fn without_envelope(status: u16) -> Self {
        Self {
            ok: false,
            n8n: None,
            error: None,
            detail: None,
            status,
        }
    }

    /// Whether the submission was accepted end to end.
    pub fn is_success(&self) -> bool {
        self.ok && (200..300).contains(&self.status)
    }

    /// The message to show for a failed submission: the envelope's `error`,
    /// or `HTTP <status>` when there is none.
    pub fn failure_message(&self) -> Option<String> {
        if self.is_success() {
            return None;
        }
        Some(
            self.error
                .clone()
                .unwrap_or_else(|| format!("HTTP {}", self.status)),
        )
    }
}
