use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::error::RelayError;
use crate::response::{RawRelayResponse, ResponseBody, interpret};

/// Outcome of one relay attempt, as reported to the submitter.
///
/// Serializes to the response envelope: `{"ok": true, "n8n": <body>}` or
/// `{"ok": false, "error": "...", "detail": <body>}` (`detail` only for
/// upstream failures). The HTTP status travels separately via
/// [`RelayResult::status`].
#[derive(Debug, Clone, PartialEq)]
pub enum RelayResult {
    Success {
        status: u16,
        body: ResponseBody,
    },
    Failure {
        status: u16,
        error: String,
        detail: Option<ResponseBody>,
    },
}

impl RelayResult {
    pub fn ok(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Upstream status on success, 500 or 502 on failure.
    pub fn status(&self) -> u16 {
        match self {
            Self::Success { status, .. } | Self::Failure { status, .. } => *status,
        }
    }

    /// Status to answer the submitter with: 200 on success.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::Success { .. } => 200,
            Self::Failure { status, .. } => *status,
        }
    }

    pub fn body(&self) -> Option<&ResponseBody> {
        match self {
            Self::Success { body, .. } => Some(body),
            Self::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { error, .. } => Some(error),
        }
    }

    pub fn detail(&self) -> Option<&ResponseBody> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { detail, .. } => detail.as_ref(),
        }
    }

    pub fn to_envelope(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_else(|e| {
            serde_json::json!({ "ok": false, "error": e.to_string() })
        })
    }
}

impl From<RelayError> for RelayResult {
    fn from(err: RelayError) -> Self {
        let status = err.status_code();
        let error = err.to_string();
        let detail = match err {
            RelayError::Upstream { detail, .. } => Some(detail),
            _ => None,
        };
        Self::Failure {
            status,
            error,
            detail,
        }
    }
}

impl Serialize for RelayResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Success { body, .. } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("ok", &true)?;
                map.serialize_entry("n8n", body)?;
                map.end()
            }
            Self::Failure { error, detail, .. } => {
                let mut map = serializer.serialize_map(Some(2 + usize::from(detail.is_some())))?;
                map.serialize_entry("ok", &false)?;
                map.serialize_entry("error", error)?;
                if let Some(detail) = detail {
                    map.serialize_entry("detail", detail)?;
                }
                map.end()
            }
        }
    }
}

/// Map the outcome of a relay attempt to a [`RelayResult`].
///
/// `is_success` decides which upstream statuses count as success; everything
/// else becomes an upstream failure carrying the interpreted body as detail.
pub fn classify(
    outcome: Result<RawRelayResponse, RelayError>,
    is_success: impl Fn(u16) -> bool,
) -> RelayResult {
    match outcome {
        Ok(raw) => {
            let body = interpret(&raw.body_text);
            if is_success(raw.status) {
                RelayResult::Success {
                    status: raw.status,
                    body,
                }
            } else {
                RelayError::Upstream {
                    status: raw.status,
                    detail: body,
                }
                .into()
            }
        }
        Err(err) => err.into(),
    }
}

/// Default success range: any 2xx status.
pub fn is_2xx(status: u16) -> bool {
    (200..300).contains(&status)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn raw(status: u16, body: &str) -> Result<RawRelayResponse, RelayError> {
        Ok(RawRelayResponse {
            status,
            body_text: body.into(),
        })
    }

    #[test]
    fn not_configured_is_local_failure() {
        let result = classify(Err(RelayError::NotConfigured), is_2xx);
        assert!(!result.ok());
        assert_eq!(result.status(), 500);
        assert_eq!(result.error(), Some("endpoint not set"));
        assert_eq!(
            result.to_envelope(),
            json!({"ok": false, "error": "endpoint not set"})
        );
    }

    #[test]
    fn network_failure_keeps_message() {
        let result = classify(Err(RelayError::Network("dns failure".into())), is_2xx);
        assert_eq!(result.status(), 500);
        assert_eq!(result.http_status(), 500);
        assert_eq!(result.error(), Some("dns failure"));
        assert!(result.detail().is_none());
    }

    #[test]
    fn success_wraps_interpreted_body() {
        let result = classify(raw(200, r#"{"id":42}"#), is_2xx);
        assert!(result.ok());
        assert_eq!(result.status(), 200);
        assert_eq!(result.http_status(), 200);
        assert_eq!(result.to_envelope(), json!({"ok": true, "n8n": {"id": 42}}));
    }

    #[test]
    fn success_with_empty_body_has_null() {
        let result = classify(raw(204, ""), is_2xx);
        assert_eq!(result.status(), 204);
        assert_eq!(result.http_status(), 200);
        assert_eq!(result.to_envelope(), json!({"ok": true, "n8n": null}));
    }

    #[test]
    fn upstream_failure_is_502_with_detail() {
        let result = classify(raw(503, "server busy"), is_2xx);
        assert!(!result.ok());
        assert_eq!(result.status(), 502);
        assert_eq!(result.error(), Some("upstream error: 503"));
        assert_eq!(
            result.detail(),
            Some(&ResponseBody::Raw("server busy".into()))
        );
        assert_eq!(
            result.to_envelope(),
            json!({
                "ok": false,
                "error": "upstream error: 503",
                "detail": {"raw": "server busy"}
            })
        );
    }

    #[test]
    fn custom_success_predicate() {
        let result = classify(raw(201, "{}"), |s| s == 200);
        assert_eq!(result.status(), 502);
        let result = classify(raw(302, "{}"), |s| s == 302);
        assert!(result.ok());
    }

    #[test]
    fn is_2xx_range() {
        assert!(is_2xx(200));
        assert!(is_2xx(299));
        assert!(!is_2xx(199));
        assert!(!is_2xx(300));
        assert!(!is_2xx(500));
    }
}
