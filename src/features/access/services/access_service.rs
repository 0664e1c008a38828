use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

use crate::core::config::AccessConfig;
use crate::core::error::{AppError, Result};
use crate::shared::constants::{MSG_PASSWORD_MISMATCH, MSG_PASSWORD_REQUIRED};

type HmacSha256 = Hmac<Sha256>;

/// Allowed clock drift for tokens issued "in the future"
const CLOCK_SKEW_SECS: i64 = 60;

/// Reasons a session token is refused
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("malformed session token")]
    Malformed,

    #[error("invalid session signature")]
    BadSignature,

    #[error("session expired")]
    Expired,
}

/// A freshly issued session
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub session_id: String,
    pub token: String,
    pub expires_in: Duration,
}

/// Shared-password gate.
///
/// There is one secret for everyone; whoever knows it gets full access.
/// Sessions are stateless tokens of the form
/// `<session-id>.<issued-at>.<hex hmac-sha256>`.
pub struct AccessService {
    password: String,
    secret: Vec<u8>,
    ttl: Duration,
    cookie_secure: bool,
}

impl AccessService {
    pub fn new(config: AccessConfig) -> Self {
        Self {
            password: config.password,
            secret: config.session_secret.into_bytes(),
            ttl: config.session_ttl,
            cookie_secure: config.cookie_secure,
        }
    }

    pub fn cookie_secure(&self) -> bool {
        self.cookie_secure
    }

    fn mac(&self) -> HmacSha256 {
        // HMAC accepts keys of any length.
        HmacSha256::new_from_slice(&self.secret).expect("HMAC can take key of any size")
    }

    fn sign(&self, payload: &str) -> Vec<u8> {
        let mut mac = self.mac();
        mac.update(payload.as_bytes());
        mac.finalize().into_bytes().to_vec()
    }

    /// Compare against the shared password in constant time.
    fn password_matches(&self, candidate: &str) -> bool {
        let expected = self.sign(&self.password);
        let mut mac = self.mac();
        mac.update(candidate.as_bytes());
        mac.verify_slice(&expected).is_ok()
    }

    /// Check `password` and open a new session on match
    pub fn login(&self, password: &str) -> Result<IssuedSession> {
        self.login_at(password, chrono::Utc::now().timestamp())
    }

    pub fn login_at(&self, password: &str, now: i64) -> Result<IssuedSession> {
        if password.is_empty() {
            return Err(AppError::Validation(MSG_PASSWORD_REQUIRED.to_string()));
        }
        if !self.password_matches(password) {
            tracing::warn!("Rejected login attempt with wrong password");
            return Err(AppError::Unauthorized(MSG_PASSWORD_MISMATCH.to_string()));
        }

        let session_id = Uuid::now_v7().to_string();
        let payload = format!("{}.{}", session_id, now);
        let token = format!("{}.{}", payload, hex::encode(self.sign(&payload)));

        tracing::info!("Session opened: {}", session_id);

        Ok(IssuedSession {
            session_id,
            token,
            expires_in: self.ttl,
        })
    }

    /// Verify a token and return its session id
    pub fn verify(&self, token: &str) -> std::result::Result<String, SessionError> {
        self.verify_at(token, chrono::Utc::now().timestamp())
    }

    pub fn verify_at(&self, token: &str, now: i64) -> std::result::Result<String, SessionError> {
        let (payload, signature) = token.rsplit_once('.').ok_or(SessionError::Malformed)?;
        let (session_id, issued_at) = payload.split_once('.').ok_or(SessionError::Malformed)?;
        if session_id.is_empty() {
            return Err(SessionError::Malformed);
        }
        let issued_at: i64 = issued_at.parse().map_err(|_| SessionError::Malformed)?;
        let signature = hex::decode(signature).map_err(|_| SessionError::Malformed)?;

        let mut mac = self.mac();
        mac.update(payload.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| SessionError::BadSignature)?;

        let age = now - issued_at;
        if age < -CLOCK_SKEW_SECS || age >= self.ttl.as_secs() as i64 {
            return Err(SessionError::Expired);
        }

        Ok(session_id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::test_access_config;

    const NOW: i64 = 1_792_400_000;

    fn service() -> AccessService {
        AccessService::new(test_access_config())
    }

    #[test]
    fn test_correct_password_issues_verifiable_token() {
        let service = service();
        let session = service.login_at("1234", NOW).unwrap();

        assert_eq!(
            service.verify_at(&session.token, NOW + 10),
            Ok(session.session_id)
        );
    }

    #[test]
    fn test_wrong_password_is_unauthorized() {
        let err = service().login_at("4321", NOW).unwrap_err();
        match err {
            AppError::Unauthorized(msg) => assert_eq!(msg, "비밀번호가 틀렸습니다."),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_prefix_of_password_is_rejected() {
        assert!(service().login_at("123", NOW).is_err());
        assert!(service().login_at("12345", NOW).is_err());
    }

    #[test]
    fn test_empty_password_is_validation_error() {
        assert!(matches!(
            service().login_at("", NOW),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_tampered_token_is_rejected() {
        let service = service();
        let token = service.login_at("1234", NOW).unwrap().token;
        let (payload, signature) = token.rsplit_once('.').unwrap();
        let (session_id, _) = payload.split_once('.').unwrap();

        let forged = format!("{}.{}.{}", session_id, NOW + 3600, signature);
        assert_eq!(service.verify_at(&forged, NOW), Err(SessionError::BadSignature));
    }

    #[test]
    fn test_token_from_other_secret_is_rejected() {
        let mut other_config = test_access_config();
        other_config.session_secret = "another-secret-of-enough-length".to_string();
        let other = AccessService::new(other_config);
        let token = other.login_at("1234", NOW).unwrap().token;

        assert_eq!(service().verify_at(&token, NOW), Err(SessionError::BadSignature));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let service = service();
        let token = service.login_at("1234", NOW).unwrap().token;
        let ttl = test_access_config().session_ttl.as_secs() as i64;

        assert!(service.verify_at(&token, NOW + ttl - 1).is_ok());
        assert_eq!(service.verify_at(&token, NOW + ttl), Err(SessionError::Expired));
        assert_eq!(
            service.verify_at(&token, NOW - CLOCK_SKEW_SECS - 1),
            Err(SessionError::Expired)
        );
    }

    #[test]
    fn test_garbage_is_malformed() {
        let service = service();
        for token in ["", "abc", "a.b", ".1.00", "id.notanumber.00", "id.1.zz"] {
            assert_eq!(service.verify_at(token, NOW), Err(SessionError::Malformed));
        }
    }
}
