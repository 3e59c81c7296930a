//! Helpers shared by the reqwest-backed adapters.

use reqwest::{StatusCode, Url};

/// Compact, truncated view of a response body for error messages.
pub(crate) fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

/// `status N` or `status N: <preview>` when the body is not empty.
pub(crate) fn status_message(status: StatusCode, body: &[u8]) -> String {
    let preview = body_preview(body);
    if preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), preview)
    }
}

/// Resolve `path` below `base`, keeping any path prefix `base` carries.
///
/// `Url::join` replaces the last segment of a base without a trailing
/// slash, so one is appended first.
pub(crate) fn join_path(base: &Url, path: &str) -> Result<Url, url::ParseError> {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let with_slash = format!("{}/", base.path());
        base.set_path(&with_slash);
    }
    base.join(path.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("http://localhost:8080", "users/usernames", "http://localhost:8080/users/usernames")]
    #[case("http://localhost:8080/", "/users/pagamentos", "http://localhost:8080/users/pagamentos")]
    #[case("http://gateway/api", "users/usernames", "http://gateway/api/users/usernames")]
    fn joins_below_the_base_path(#[case] base: &str, #[case] path: &str, #[case] expected: &str) {
        let base = Url::parse(base).expect("valid base");
        assert_eq!(join_path(&base, path).expect("joined").as_str(), expected);
    }

    #[rstest]
    fn status_message_includes_compacted_body() {
        let message = status_message(StatusCode::BAD_GATEWAY, b"  upstream \n down ");
        assert_eq!(message, "status 502: upstream down");
    }

    #[rstest]
    fn long_bodies_are_truncated() {
        let body = "x".repeat(400);
        let preview = body_preview(body.as_bytes());
        assert!(preview.ends_with("..."));
        assert_eq!(preview.chars().count(), 163);
    }
}
