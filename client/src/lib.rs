//! # client
//!
//! Leptos + WASM front end for the admin console.
//!
//! The session rules live in the `session` crate; this crate binds them to the
//! browser: a signal-backed session persisted to `localStorage`, `gloo-net`
//! transports, router-driven navigation and toast notifications. Layouts own
//! the lifecycle of the transport hooks and `ProtectedRoute` guards pages.

pub mod app;
pub mod components;
pub mod config;
pub mod layouts;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: hydrate the server-rendered shell.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        leptos::logging::warn!("console logger already installed: {e}");
    }
    leptos::mount::hydrate_body(app::App);
}
