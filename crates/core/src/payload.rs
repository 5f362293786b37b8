use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use serde_json::{Number, Value};

use crate::attachment::{Attachment, Channel};

/// Scalar form fields forwarded to the webhook. Anything else is dropped.
pub const ALLOWED_FIELDS: [&str; 5] = [
    "title",
    "links_json",
    "links_count",
    "pdf_count",
    "ctr_count",
];

/// Title used when a JSON submission carries none.
pub const DEFAULT_TITLE: &str = "Hills-and-partners AI";

/// Returns `true` if `key` may be forwarded as a scalar field.
pub fn is_allowed_field(key: &str) -> bool {
    ALLOWED_FIELDS.contains(&key)
}

/// Body sent to the webhook, in the encoding chosen by the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum OutgoingPayload {
    Multipart(MultipartPayload),
    Json(JsonPayload),
}

impl OutgoingPayload {
    /// Short name of the encoding, used in logs.
    pub fn encoding(&self) -> &'static str {
        match self {
            Self::Multipart(_) => "multipart",
            Self::Json(_) => "json",
        }
    }
}

/// Allow-listed scalar fields plus attachments grouped by channel.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultipartPayload {
    fields: Vec<(String, String)>,
    attachments: BTreeMap<Channel, Vec<Attachment>>,
}

impl MultipartPayload {
    /// Scalar fields in the order they were supplied.
    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    /// First value supplied for `key`, if it was forwarded.
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn attachments(&self, channel: Channel) -> &[Attachment] {
        self.attachments.get(&channel).map_or(&[][..], Vec::as_slice)
    }

    pub fn attachment_count(&self) -> usize {
        self.attachments.values().map(Vec::len).sum()
    }

    /// Hand over fields and attachments (channel order, then supplied order)
    /// to the transport.
    pub fn into_parts(self) -> (Vec<(String, String)>, Vec<(Channel, Attachment)>) {
        let files = self
            .attachments
            .into_iter()
            .flat_map(|(channel, list)| list.into_iter().map(move |att| (channel, att)))
            .collect();
        (self.fields, files)
    }
}

/// Fixed-schema JSON body stamped with the submission time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsonPayload {
    pub title: String,
    pub links: Vec<Value>,
    pub links_count: Number,
    #[serde(serialize_with = "serialize_ts")]
    pub ts: DateTime<Utc>,
}

fn serialize_ts<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Build a multipart payload from caller-supplied fields and attachments.
///
/// Only [`ALLOWED_FIELDS`] survive; attachments are kept only for known
/// channels and keep their original filenames and bytes.
pub fn build_multipart<F, K, V, A, C>(fields: F, attachments: A) -> OutgoingPayload
where
    F: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
    A: IntoIterator<Item = (C, Vec<Attachment>)>,
    C: AsRef<str>,
{
    let mut payload = MultipartPayload::default();

    for (key, value) in fields {
        let key = key.into();
        if is_allowed_field(&key) {
            payload.fields.push((key, value.into()));
        }
    }

    for (channel, files) in attachments {
        if let Some(channel) = Channel::from_field_name(channel.as_ref()) {
            payload.attachments.entry(channel).or_default().extend(files);
        }
    }

    OutgoingPayload::Multipart(payload)
}

/// Build a JSON payload from a submitted JSON document.
///
/// Missing or mistyped members fall back to defaults: the title to
/// [`DEFAULT_TITLE`], the link list to `[]`, the count to the length of the
/// link list. Any JSON number given as `links_count` is forwarded unchanged,
/// including negative and fractional values.
pub fn build_json(body: &Value, ts: DateTime<Utc>) -> OutgoingPayload {
    let title = body
        .get("title")
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_TITLE)
        .to_owned();
    let links = body
        .get("links")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    let links_count = body
        .get("links_count")
        .and_then(|count| match count {
            Value::Number(n) => Some(n.clone()),
            _ => None,
        })
        .unwrap_or_else(|| Number::from(links.len()));

    OutgoingPayload::Json(JsonPayload {
        title,
        links,
        links_count,
        ts,
    })
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;

    fn multipart(payload: OutgoingPayload) -> MultipartPayload {
        match payload {
            OutgoingPayload::Multipart(m) => m,
            OutgoingPayload::Json(_) => panic!("expected multipart"),
        }
    }

    fn json_payload(payload: OutgoingPayload) -> JsonPayload {
        match payload {
            OutgoingPayload::Json(j) => j,
            OutgoingPayload::Multipart(_) => panic!("expected json"),
        }
    }

    fn fixed_ts() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 12, 30, 0).unwrap()
    }

    #[test]
    fn multipart_drops_unknown_fields() {
        let payload = multipart(build_multipart(
            [
                ("title", "T"),
                ("links_json", "[]"),
                ("password", "hunter2"),
                ("links_count", "0"),
                ("ctr_count", "0"),
                ("pdf_count", "1"),
                ("extra", "x"),
            ],
            Vec::<(&str, Vec<Attachment>)>::new(),
        ));

        assert_eq!(payload.field("password"), None);
        assert_eq!(payload.field("extra"), None);
        assert_eq!(payload.field("title"), Some("T"));
        let keys: Vec<&str> = payload.fields().iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(
            keys,
            ["title", "links_json", "links_count", "ctr_count", "pdf_count"]
        );
    }

    #[test]
    fn multipart_groups_attachments_by_known_channel() {
        let payload = multipart(build_multipart(
            Vec::<(String, String)>::new(),
            [
                ("ctrs", vec![Attachment::new("r1.ctr", &b"ctr"[..])]),
                (
                    "pdfs",
                    vec![
                        Attachment::new("a.pdf", &b"%PDF-a"[..]),
                        Attachment::new("b.pdf", &b"%PDF-b"[..]),
                    ],
                ),
                ("images", vec![Attachment::new("x.png", &b"png"[..])]),
                ("pdfs", vec![Attachment::new("c.pdf", &b"%PDF-c"[..])]),
            ],
        ));

        let pdf_names: Vec<&str> = payload
            .attachments(Channel::Pdfs)
            .iter()
            .map(|a| a.filename.as_str())
            .collect();
        assert_eq!(pdf_names, ["a.pdf", "b.pdf", "c.pdf"]);
        assert_eq!(payload.attachments(Channel::Ctrs).len(), 1);
        assert_eq!(payload.attachment_count(), 4);

        let (_, files) = payload.into_parts();
        let order: Vec<(Channel, &str)> = files
            .iter()
            .map(|(c, a)| (*c, a.filename.as_str()))
            .collect();
        assert_eq!(
            order,
            [
                (Channel::Pdfs, "a.pdf"),
                (Channel::Pdfs, "b.pdf"),
                (Channel::Pdfs, "c.pdf"),
                (Channel::Ctrs, "r1.ctr"),
            ]
        );
    }

    #[test]
    fn json_mode_applies_defaults() {
        let payload = json_payload(build_json(&json!({}), fixed_ts()));
        assert_eq!(payload.title, DEFAULT_TITLE);
        assert!(payload.links.is_empty());
        assert_eq!(payload.links_count, Number::from(0));

        let payload = json_payload(build_json(
            &json!({"title": 5, "links": "a.com"}),
            fixed_ts(),
        ));
        assert_eq!(payload.title, DEFAULT_TITLE);
        assert!(payload.links.is_empty());
    }

    #[test]
    fn json_mode_count_defaults_to_link_len() {
        let payload = json_payload(build_json(
            &json!({"title": "Batch", "links": ["https://a.com", "https://b.com"]}),
            fixed_ts(),
        ));
        assert_eq!(payload.title, "Batch");
        assert_eq!(payload.links_count, Number::from(2));

        let payload = json_payload(build_json(
            &json!({"links": ["https://a.com"], "links_count": 7}),
            fixed_ts(),
        ));
        assert_eq!(payload.links_count, Number::from(7));
    }

    #[test]
    fn json_mode_forwards_any_numeric_count() {
        for count in [json!(-1), json!(2.5), json!(0)] {
            let payload = json_payload(build_json(
                &json!({"links": ["https://a.com"], "links_count": count.clone()}),
                fixed_ts(),
            ));
            assert_eq!(Value::Number(payload.links_count), count);
        }

        // Non-numeric counts are treated as absent.
        for count in [json!("3"), json!(null), json!([1])] {
            let payload = json_payload(build_json(
                &json!({"links": ["https://a.com"], "links_count": count}),
                fixed_ts(),
            ));
            assert_eq!(payload.links_count, Number::from(1));
        }
    }

    #[test]
    fn json_mode_serializes_with_timestamp() {
        let payload = build_json(
            &json!({"title": "T", "links": ["https://a.com"], "ignored": true}),
            fixed_ts(),
        );
        assert_eq!(payload.encoding(), "json");
        let value = serde_json::to_value(json_payload(payload)).unwrap();
        assert_eq!(
            value,
            json!({
                "title": "T",
                "links": ["https://a.com"],
                "links_count": 1,
                "ts": "2025-03-01T12:30:00.000Z"
            })
        );
    }
}
