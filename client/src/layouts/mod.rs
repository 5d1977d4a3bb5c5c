//! Route layouts.
//!
//! ARCHITECTURE
//! ============
//! Each layout owns the hook registrations of one transport for as long as
//! its subtree is mounted, then renders nested routes through `<Outlet/>`.

pub mod app;
pub mod auth;
