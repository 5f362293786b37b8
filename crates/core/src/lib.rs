//! Core pipeline for the linkrelay submission relay.
//!
//! Everything here is pure: link normalization and deduplication, payload
//! construction, response interpretation and result classification. The
//! outbound HTTP call lives in `linkrelay-webhook`.

pub mod attachment;
pub mod envelope;
pub mod error;
pub mod link;
pub mod payload;
pub mod response;

pub use attachment::{Attachment, Channel};
pub use envelope::{RelayResult, classify, is_2xx};
pub use error::{LOCAL_FAILURE_STATUS, RelayError, UPSTREAM_FAILURE_STATUS};
pub use link::{LinkDraft, LinkSet, dedupe, normalize, split};
pub use payload::{
    ALLOWED_FIELDS, DEFAULT_TITLE, JsonPayload, MultipartPayload, OutgoingPayload, build_json,
    build_multipart, is_allowed_field,
};
pub use response::{RawRelayResponse, ResponseBody, interpret};
