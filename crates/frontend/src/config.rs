//! Frontend configuration

/// Build-time settings of the web client
pub struct AppConfig;

impl AppConfig {
    /// API root. Relative values are resolved against the page origin.
    pub const API_BASE: &'static str = match option_env!("MIDART_API_BASE") {
        Some(base) => base,
        None => "/api",
    };

    /// Cookie Django stores the CSRF token in
    pub const CSRF_COOKIE: &'static str = "csrftoken";

    /// Maximum length of a verbalise post, in characters
    pub const VERBALISE_LIMIT: usize = 280;

    pub const LOGIN_PATH: &'static str = "/login";

    pub const LOG_FILTER: &'static str =
        "info,midart_frontend=debug,midart_core=debug,midart_http=debug";
}

/// Absolute API root for a page served from `origin`
pub fn resolve_api_base(origin: &str, base: &str) -> String {
    if base.starts_with("http://") || base.starts_with("https://") {
        return base.trim_end_matches('/').to_string();
    }
    format!(
        "{}/{}",
        origin.trim_end_matches('/'),
        base.trim_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_base_joins_origin() {
        assert_eq!(
            resolve_api_base("https://midart.studio", "/api"),
            "https://midart.studio/api"
        );
        assert_eq!(
            resolve_api_base("http://localhost:5173/", "api/"),
            "http://localhost:5173/api"
        );
    }

    #[test]
    fn absolute_base_is_kept() {
        assert_eq!(
            resolve_api_base("http://localhost:5173", "http://localhost:8000/api/"),
            "http://localhost:8000/api"
        );
    }
}
