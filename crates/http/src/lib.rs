//! Midart HTTP client
//!
//! A thin typed layer over `reqwest` for the Midart REST API. It owns the
//! cross-cutting glue every call needs (CSRF header on mutating requests,
//! session cookies, the global 401 hook, multipart encoding) and exposes one
//! method per endpoint.

pub mod client;

pub use client::csrf::{CsrfSource, NoCsrf, StaticCsrf, cookie_value};
pub use client::error::ClientError;
pub use client::{MidartClient, MidartClientBuilder, UnauthorizedHook};
