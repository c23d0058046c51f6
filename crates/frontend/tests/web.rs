//! Browser tests; run with `wasm-pack test --headless --firefox crates/frontend`

#![cfg(target_arch = "wasm32")]

use midart_frontend::app::Route;
use midart_frontend::client::DocumentCookieCsrf;
use midart_http::CsrfSource;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::HtmlDocument;

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> HtmlDocument {
    web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.dyn_into::<HtmlDocument>().ok())
        .expect("browser document")
}

#[wasm_bindgen_test]
fn csrf_token_is_read_from_document_cookie() {
    let document = document();
    document.set_cookie("csrftoken=abc%2B123; path=/").unwrap();
    assert_eq!(DocumentCookieCsrf.token().as_deref(), Some("abc+123"));

    document
        .set_cookie("csrftoken=; expires=Thu, 01 Jan 1970 00:00:00 GMT; path=/")
        .unwrap();
    assert_eq!(DocumentCookieCsrf.token(), None);
}

#[wasm_bindgen_test]
fn public_and_protected_paths() {
    assert!(!Route::is_protected_path("/login"));
    assert!(Route::is_protected_path("/messages"));
}
