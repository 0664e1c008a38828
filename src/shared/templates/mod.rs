//! Server-rendered page templates.
//!
//! Templates live in `templates/` and are compiled into the binary.

pub mod engine;

pub use engine::{render_template, TemplateError};
