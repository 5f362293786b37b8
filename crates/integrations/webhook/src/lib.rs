//! Outbound webhook relay for linkrelay.
//!
//! [`RelayClient`] performs the single POST to the configured endpoint, in
//! multipart or JSON encoding, and classifies the outcome into a
//! [`RelayResult`](linkrelay_core::RelayResult).
//!
//! # Quick start
//!
//! ```rust,no_run
//! use linkrelay_core::{Attachment, build_multipart};
//! use linkrelay_webhook::{RelayClient, WebhookConfig};
//!
//! # async fn example() -> Result<(), linkrelay_webhook::WebhookError> {
//! let config = WebhookConfig::new("https://n8n.example.com/webhook/intake")
//!     .with_timeout_secs(15);
//! let client = RelayClient::new(config)?;
//!
//! let payload = build_multipart(
//!     [("title", "Batch"), ("links_json", r#"["https://a.com"]"#)],
//!     [("pdfs", vec![Attachment::new("a.pdf", b"%PDF".to_vec())])],
//! );
//! let result = client.relay(payload).await;
//! println!("{}", result.to_envelope());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod form;

pub use client::RelayClient;
pub use config::{WEBHOOK_URL_ENV, WebhookConfig};
pub use error::WebhookError;
pub use form::{attachment_part, multipart_form};
