/// Name of the cookie carrying the signed session token
pub const SESSION_COOKIE: &str = "report_session";

/// Category hidden from the dashboard unless explicitly revealed
pub const CONFIDENTIAL_CATEGORY: &str = "개인/보안(비공개)";

/// Status selected by default in the dashboard status filter
pub const DEFAULT_STATUS_FILTER: &str = "진행중";

// =============================================================================
// USER-FACING MESSAGES
// =============================================================================

pub const MSG_PASSWORD_MISMATCH: &str = "비밀번호가 틀렸습니다.";

pub const MSG_PASSWORD_REQUIRED: &str = "비밀번호를 입력하세요";

pub const MSG_SUBMITTED: &str = "제출 완료!";

pub const MSG_DELETED: &str = "선택한 보고가 삭제되었습니다.";

pub const MSG_NO_DATA: &str = "데이터가 없습니다.";

pub const MSG_LOGIN_REQUIRED: &str = "로그인이 필요합니다.";
