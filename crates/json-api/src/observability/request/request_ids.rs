//! `x-request-id` handling.

use salvo::{http::header::HeaderValue, prelude::Response};
use uuid::Uuid;

pub(super) const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest caller-supplied id that is echoed back.
const MAX_REQUEST_ID_LEN: usize = 128;

/// Keep a caller's id if it is short printable ASCII, otherwise mint a v7
/// UUID.
pub(super) fn resolve_request_id(supplied: Option<String>) -> String {
    supplied
        .map(|value| value.trim().to_owned())
        .filter(|value| is_acceptable(value))
        .unwrap_or_else(|| Uuid::now_v7().to_string())
}

fn is_acceptable(value: &str) -> bool {
    !value.is_empty()
        && value.len() <= MAX_REQUEST_ID_LEN
        && value.bytes().all(|byte| byte.is_ascii_graphic())
}

pub(super) fn set_request_id_header(res: &mut Response, request_id: &str) {
    if let Ok(value) = HeaderValue::from_str(request_id) {
        res.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supplied_request_id_is_kept() {
        assert_eq!(resolve_request_id(Some(" abc-123 ".to_string())), "abc-123");
    }

    #[test]
    fn unusable_request_ids_are_replaced() {
        for supplied in [
            None,
            Some("   ".to_string()),
            Some("a".repeat(MAX_REQUEST_ID_LEN + 1)),
            Some("two words".to_string()),
        ] {
            let request_id = resolve_request_id(supplied);

            assert!(
                Uuid::try_parse(&request_id).is_ok(),
                "expected generated uuid, got {request_id}"
            );
        }
    }
}
