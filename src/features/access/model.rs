use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Per-request session state, resolved by the session middleware.
///
/// Never global: every handler that cares receives it as an extractor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SessionContext {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

impl SessionContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(session_id: String) -> Self {
        Self {
            authenticated: true,
            session_id: Some(session_id),
        }
    }
}
