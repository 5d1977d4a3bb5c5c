//! Networking modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` provides the `gloo-net` backend and the public/protected transports
//! built on the session crate's interceptor-aware `Transport`.

pub mod api;
