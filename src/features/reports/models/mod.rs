mod layout;
mod report;

pub use layout::{columns, ReportLayout, DEFAULT_BRANCHES};
pub use report::{Report, ReportSchema};
