//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration; guarding and transport hooks
//! belong to the layouts and `ProtectedRoute` around it.

pub mod dashboard;
pub mod sign_in;
