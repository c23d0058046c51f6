//! Midart web client
//!
//! Yew single-page app over [`midart_core`] state and the [`midart_http`]
//! client.

pub mod app;
pub mod auth;
pub mod auth_guard;
pub mod client;
pub mod components;
pub mod config;
pub mod hooks;
pub mod pages;
pub mod utils;

use app::App;
use config::AppConfig;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;
use tracing_web::MakeWebConsoleWriter;

/// Install logging and mount the app on `<body>`
pub fn run() {
    console_error_panic_hook::set_once();
    init_tracing();
    yew::Renderer::<App>::new().render();
}

fn init_tracing() {
    let console = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .without_time()
        .with_writer(MakeWebConsoleWriter::new());

    // A second init (hot reload) is harmless
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::new(AppConfig::LOG_FILTER))
        .with(console)
        .try_init();
}
