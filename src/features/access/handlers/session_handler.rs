use std::sync::Arc;

use axum::{extract::State, Json};
use axum_extra::extract::cookie::CookieJar;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::access::cookies::{expired_session_cookie, session_cookie};
use crate::features::access::dtos::{LoginRequestDto, SessionResponseDto, SessionStatusDto};
use crate::features::access::model::SessionContext;
use crate::features::access::services::AccessService;
use crate::shared::types::ApiResponse;
use crate::shared::validation::error_messages;

/// Pass the password gate
///
/// On success the session token is returned and set as an HttpOnly cookie.
#[utoipa::path(
    post,
    path = "/api/session",
    request_body = LoginRequestDto,
    responses(
        (status = 200, description = "Session opened", body = ApiResponse<SessionResponseDto>),
        (status = 400, description = "Password missing"),
        (status = 401, description = "Wrong password")
    ),
    tag = "session"
)]
pub async fn login(
    State(service): State<Arc<AccessService>>,
    jar: CookieJar,
    AppJson(dto): AppJson<LoginRequestDto>,
) -> Result<(CookieJar, Json<ApiResponse<SessionResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(error_messages(&e).join(" ")))?;

    let session = service.login(&dto.password)?;
    let jar = jar.add(session_cookie(session.token.clone(), service.cookie_secure()));

    Ok((
        jar,
        Json(ApiResponse::success(
            Some(SessionResponseDto {
                authenticated: true,
                token: session.token,
                expires_in: session.expires_in.as_secs(),
            }),
            None,
            None,
        )),
    ))
}

/// Report whether the caller has passed the gate
#[utoipa::path(
    get,
    path = "/api/session",
    responses(
        (status = 200, description = "Session status", body = ApiResponse<SessionStatusDto>)
    ),
    tag = "session"
)]
pub async fn get_session(session: SessionContext) -> Json<ApiResponse<SessionStatusDto>> {
    Json(ApiResponse::success(
        Some(SessionStatusDto {
            authenticated: session.authenticated,
        }),
        None,
        None,
    ))
}

/// Drop the session cookie
#[utoipa::path(
    delete,
    path = "/api/session",
    responses(
        (status = 200, description = "Session closed", body = ApiResponse<SessionStatusDto>)
    ),
    tag = "session"
)]
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<ApiResponse<SessionStatusDto>>) {
    (
        jar.remove(expired_session_cookie()),
        Json(ApiResponse::success(
            Some(SessionStatusDto {
                authenticated: false,
            }),
            None,
            None,
        )),
    )
}
