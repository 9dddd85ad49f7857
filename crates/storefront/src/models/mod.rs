//! Storefront request-scoped models.

pub mod session;

pub use session::{CartSession, session_keys};
