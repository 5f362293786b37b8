//! Multipart form construction shared by every sender of a submission.

use std::borrow::Cow;

use linkrelay_core::{Attachment, Channel};
use reqwest::multipart::{Form, Part};

/// Build a multipart form: scalar fields first, then one file part per
/// attachment under its channel's field name.
pub fn multipart_form<F, K, V, A>(fields: F, attachments: A) -> Form
where
    F: IntoIterator<Item = (K, V)>,
    K: Into<Cow<'static, str>>,
    V: Into<Cow<'static, str>>,
    A: IntoIterator<Item = (Channel, Attachment)>,
{
    let mut form = Form::new();
    for (key, value) in fields {
        form = form.text(key, value);
    }
    for (channel, attachment) in attachments {
        form = form.part(channel.field_name(), attachment_part(attachment));
    }
    form
}

/// Wrap attachment bytes in a form part, keeping the original filename.
///
/// A declared content type that is not a valid MIME string is dropped
/// rather than failing the request.
pub fn attachment_part(attachment: Attachment) -> Part {
    let Attachment {
        filename,
        content_type,
        data,
    } = attachment;
    let len = data.len() as u64;
    let part = || Part::stream_with_length(data.clone(), len).file_name(filename.clone());

    match content_type {
        Some(mime) => part().mime_str(&mime).unwrap_or_else(|_| part()),
        None => part(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_mime_is_dropped() {
        let att = Attachment::new("a.pdf", bytes::Bytes::from_static(b"x"))
            .with_content_type("not a mime\n");
        // Builds a part without panicking.
        let _part = attachment_part(att);
    }

    #[test]
    fn form_uses_a_boundary() {
        let form = multipart_form(
            [("title", "T".to_owned())],
            [(Channel::Ctrs, Attachment::new("q.ctr", &b"c"[..]))],
        );
        assert!(!form.boundary().is_empty());
    }
}
