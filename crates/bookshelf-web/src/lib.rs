//! Bookshelf web routes.
//!
//! Provides browser-facing access to the catalog:
//! - Overview and detail pages rendered from askama templates
//! - `/JSON` export endpoints
//! - Login-gated management routes (add, edit, delete)
//! - Status-specific error pages (401, 403, 404, 500)

pub mod error;
pub mod routes;
pub mod templates;

pub use error::WebError;
pub use routes::{web_routes, WebState};
