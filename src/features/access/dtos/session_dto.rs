use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request DTO for passing the password gate
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginRequestDto {
    #[validate(length(min = 1, message = "비밀번호를 입력하세요"))]
    pub password: String,
}

/// Response DTO for a newly opened session
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SessionResponseDto {
    pub authenticated: bool,
    /// Signed session token, also set as the `report_session` cookie
    pub token: String,
    /// Token lifetime in seconds
    pub expires_in: u64,
}

/// Response DTO describing the caller's session
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SessionStatusDto {
    pub authenticated: bool,
}
