//! Client configuration and initialization

use crate::auth::error_handler::trigger_unauthorized;
use crate::config::{AppConfig, resolve_api_base};
use midart_core::ApiError;
use midart_http::{ClientError, CsrfSource, MidartClient, cookie_value};
use std::cell::RefCell;
use wasm_bindgen::JsCast;
use web_sys::{HtmlDocument, window};

thread_local! {
    /// Shared client; built on first use
    static CLIENT: RefCell<Option<MidartClient>> = const { RefCell::new(None) };
}

/// Reads the CSRF token from `document.cookie` on every request
#[derive(Debug, Default, Clone, Copy)]
pub struct DocumentCookieCsrf;

impl CsrfSource for DocumentCookieCsrf {
    fn token(&self) -> Option<String> {
        let document = window()?.document()?.dyn_into::<HtmlDocument>().ok()?;
        let cookies = document.cookie().ok()?;
        cookie_value(&cookies, AppConfig::CSRF_COOKIE)
    }
}

fn base_url() -> String {
    let origin = window()
        .and_then(|window| window.location().origin().ok())
        .unwrap_or_default();
    resolve_api_base(&origin, AppConfig::API_BASE)
}

fn build() -> Result<MidartClient, ClientError> {
    MidartClient::builder()
        .base_url(base_url())
        .csrf(DocumentCookieCsrf)
        .on_unauthorized(trigger_unauthorized)
        .build()
}

/// The app-wide API client
pub fn api() -> Result<MidartClient, ApiError> {
    CLIENT.with(|slot| {
        if let Some(client) = slot.borrow().as_ref() {
            return Ok(client.clone());
        }
        let client = build()?;
        *slot.borrow_mut() = Some(client.clone());
        Ok(client)
    })
}
