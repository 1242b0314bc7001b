//! Hostname normalization
//!
//! Turns whatever a user typed (`https://example.com/path`, `example.com:8443`,
//! ` example.com `) into the bare hostname the fetcher connects to.

use url::Url;

/// Derive a bare hostname from raw user input.
///
/// Never fails. The result is not validated; an unusable hostname surfaces
/// later as a connection error.
pub fn normalize(raw: &str) -> String {
    let trimmed = raw.trim();

    if trimmed.contains("://") {
        let parsed = Url::parse(trimmed).ok();
        if let Some(host) = parsed.as_ref().and_then(Url::host_str) {
            return strip_brackets(host).to_string();
        }
        let without_scheme = trimmed
            .split_once("://")
            .map(|(_, rest)| rest)
            .unwrap_or(trimmed);
        return before(before(without_scheme, '/'), ':').to_string();
    }

    if trimmed.contains('/') {
        return before(trimmed, '/').to_string();
    }

    if trimmed.contains(':') {
        return before(trimmed, ':').to_string();
    }

    trimmed.to_string()
}

fn before(s: &str, delimiter: char) -> &str {
    s.split_once(delimiter).map(|(head, _)| head).unwrap_or(s)
}

fn strip_brackets(host: &str) -> &str {
    host.strip_prefix('[')
        .and_then(|h| h.strip_suffix(']'))
        .unwrap_or(host)
}
