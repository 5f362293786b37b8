use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use linkrelay_client::{Attachment, Channel, LinkDraft, RelayServerClient, SubmissionForm};
use tracing::debug;

use crate::OutputFormat;

#[derive(Args, Debug)]
pub struct SubmitArgs {
    /// Submission title.
    #[arg(long)]
    pub title: Option<String>,
    /// A link to submit (repeatable). `https://` is added when no scheme is given.
    #[arg(long = "link")]
    pub links: Vec<String>,
    /// Links separated by commas or whitespace.
    #[arg(long, conflicts_with = "bulk_file")]
    pub bulk: Option<String>,
    /// Read bulk links from a file.
    #[arg(long)]
    pub bulk_file: Option<PathBuf>,
    /// PDF file to attach (repeatable).
    #[arg(long = "pdf")]
    pub pdfs: Vec<PathBuf>,
    /// CTR report file to attach (repeatable).
    #[arg(long = "ctr")]
    pub ctrs: Vec<PathBuf>,
}

pub async fn run(
    client: &RelayServerClient,
    args: &SubmitArgs,
    format: &OutputFormat,
) -> anyhow::Result<()> {
    let bulk = match (&args.bulk, &args.bulk_file) {
        (Some(text), _) => Some(text.clone()),
        (None, Some(path)) => Some(
            tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("failed to read {}", path.display()))?,
        ),
        (None, None) => None,
    };
    let draft = build_draft(&args.links, bulk.as_deref());

    let mut form = SubmissionForm::new().with_links(draft.links());
    if let Some(title) = &args.title {
        form = form.with_title(title);
    }
    for (channel, paths) in [(Channel::Pdfs, &args.pdfs), (Channel::Ctrs, &args.ctrs)] {
        for path in paths {
            form.attach(channel, read_attachment(path).await?);
        }
    }

    let summary = format!(
        "links={}, pdf={}, ctr={}",
        form.links().len(),
        form.attachments(Channel::Pdfs).len(),
        form.attachments(Channel::Ctrs).len()
    );

    let response = client.submit(form).await?;

    if let OutputFormat::Json = format {
        println!("{}", serde_json::to_string_pretty(&response)?);
    }

    match response.failure_message() {
        None => {
            if let OutputFormat::Text = format {
                println!("{summary}");
            }
            Ok(())
        }
        Some(message) => {
            eprintln!("Submission failed: {message}");
            std::process::exit(1);
        }
    }
}

/// Lay out `--link` values as draft rows, then merge the bulk blob.
fn build_draft(links: &[String], bulk: Option<&str>) -> LinkDraft {
    let mut draft = LinkDraft::new();
    for (index, link) in links.iter().enumerate() {
        if index > 0 {
            draft.add_row();
        }
        draft.set_row(index, link.as_str());
    }
    if let Some(text) = bulk {
        let added = draft.apply_bulk(text);
        debug!(added, "merged bulk links");
    }
    draft
}

async fn read_attachment(path: &Path) -> anyhow::Result<Attachment> {
    let data = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .with_context(|| format!("not a file path: {}", path.display()))?;

    let attachment = Attachment::new(filename, data);
    Ok(match content_type_for(path) {
        Some(mime) => attachment.with_content_type(mime),
        None => attachment,
    })
}

fn content_type_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "pdf" => Some("application/pdf"),
        "csv" => Some("text/csv"),
        "json" => Some("application/json"),
        "txt" => Some("text/plain"),
        _ => None,
    }
}
