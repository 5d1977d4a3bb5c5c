//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components read shared session and notification state from Leptos context
//! providers installed by the root `App`.

pub mod protected_route;
pub mod toaster;
