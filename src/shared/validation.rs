use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for calendar dates as stored in the sheet
    /// - Valid: "2026-10-19", "1999-01-01"
    /// - Invalid: "2026-1-9", "2026/10/19", "19-10-2026", ""
    pub static ref DATE_REGEX: Regex = Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap();
}

/// A `YYYY-MM-DD` string that names a real calendar day.
///
/// The regex pins the shape (chrono alone accepts "2026-1-9"); chrono rejects
/// days that do not exist, such as "2026-02-30".
pub fn validate_calendar_date(value: &str) -> Result<(), validator::ValidationError> {
    if !DATE_REGEX.is_match(value) || NaiveDate::parse_from_str(value, "%Y-%m-%d").is_err() {
        return Err(validator::ValidationError::new("date"));
    }
    Ok(())
}

/// Content is required and must contain something other than whitespace.
pub fn validate_not_blank(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        return Err(validator::ValidationError::new("blank"));
    }
    Ok(())
}

/// Flatten validator errors into their user-facing messages, ordered by field.
///
/// Falls back to "<field>: <code>" when a rule carries no message.
pub fn error_messages(errors: &validator::ValidationErrors) -> Vec<String> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter()
                .map(move |e| match &e.message {
                    Some(message) => message.to_string(),
                    None => format!("{}: {}", field, e.code),
                })
                .collect::<Vec<_>>()
        })
        .collect()
}
