//! CSRF token sources
//!
//! Django rejects mutating requests that do not echo the `csrftoken` cookie
//! back in a header. Where the token comes from depends on the target: the
//! browser reads `document.cookie`, native callers pass it in.

use std::fmt;

/// Supplies the CSRF token for each mutating request
pub trait CsrfSource: Send + Sync {
    /// Current token, read fresh for every request
    fn token(&self) -> Option<String>;
}

/// Sends no CSRF header
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCsrf;

impl CsrfSource for NoCsrf {
    fn token(&self) -> Option<String> {
        None
    }
}

/// A fixed token
#[derive(Clone)]
pub struct StaticCsrf(String);

impl StaticCsrf {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl fmt::Debug for StaticCsrf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StaticCsrf(..)")
    }
}

impl CsrfSource for StaticCsrf {
    fn token(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

/// Value of cookie `name` in a `document.cookie` style string
/// (`"a=1; csrftoken=abc"`), percent-decoded.
pub fn cookie_value(cookies: &str, name: &str) -> Option<String> {
    cookies
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| percent_decode(value))
        .filter(|value| !value.is_empty())
}

fn percent_decode(value: &str) -> String {
    let bytes = value.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut index = 0;
    while index < bytes.len() {
        if bytes[index] == b'%' {
            let hex = bytes
                .get(index + 1..index + 3)
                .and_then(|pair| std::str::from_utf8(pair).ok())
                .and_then(|pair| u8::from_str_radix(pair, 16).ok());
            if let Some(byte) = hex {
                out.push(byte);
                index += 3;
                continue;
            }
        }
        out.push(bytes[index]);
        index += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_named_cookie() {
        let cookies = "sessionid=xyz; csrftoken=abc123; theme=dark";
        assert_eq!(cookie_value(cookies, "csrftoken").as_deref(), Some("abc123"));
        assert_eq!(cookie_value(cookies, "missing"), None);
    }

    #[test]
    fn does_not_match_on_prefix() {
        assert_eq!(cookie_value("xcsrftoken=nope", "csrftoken"), None);
        assert_eq!(
            cookie_value("xcsrftoken=nope;csrftoken=yes", "csrftoken").as_deref(),
            Some("yes")
        );
    }

    #[test]
    fn decodes_percent_escapes() {
        assert_eq!(
            cookie_value("csrftoken=a%2Bb%3D", "csrftoken").as_deref(),
            Some("a+b=")
        );
        assert_eq!(cookie_value("csrftoken=50%", "csrftoken").as_deref(), Some("50%"));
    }

    #[test]
    fn empty_value_is_no_token() {
        assert_eq!(cookie_value("csrftoken=", "csrftoken"), None);
        assert_eq!(cookie_value("", "csrftoken"), None);
    }
}
