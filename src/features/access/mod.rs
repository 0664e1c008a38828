//! Shared-password access gate.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/session` | No | Whether the caller is authenticated |
//! | POST | `/api/session` | No | Check the password, open a session |
//! | DELETE | `/api/session` | No | Clear the session cookie |

mod cookies;

pub mod dtos;
pub mod guards;
pub mod handlers;
pub mod model;
pub mod routes;
pub mod services;

pub use cookies::{expired_session_cookie, session_cookie};
pub use services::AccessService;
