//! Server-rendered two-tab page: submission form and dashboard.
//!
//! Drives the same services as the JSON API through form posts and
//! `303 See Other` redirects.

pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;

pub use handlers::PageState;
pub use routes::routes;
pub use services::PageService;
