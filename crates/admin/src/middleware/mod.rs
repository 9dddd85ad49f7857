//! Admin middleware.

pub mod auth;

pub use auth::RequireAdminAuth;
