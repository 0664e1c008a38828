use std::env;
use std::time::Duration;

use crate::features::reports::models::ReportLayout;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub access: AccessConfig,
    pub store: StoreConfig,
    pub report: ReportConfig,
    pub swagger: SwaggerConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
}

/// Shared-password gate and session token settings
#[derive(Clone)]
pub struct AccessConfig {
    /// The single shared password every caller must know
    pub password: String,
    /// Key used to sign session tokens
    pub session_secret: String,
    pub session_ttl: Duration,
    /// Mark the session cookie `Secure` (enable behind HTTPS)
    pub cookie_secure: bool,
}

// Secrets stay out of logs and panics.
impl std::fmt::Debug for AccessConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessConfig")
            .field("password", &"***")
            .field("session_secret", &"***")
            .field("session_ttl", &self.session_ttl)
            .field("cookie_secure", &self.cookie_secure)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Sheets,
    Memory,
}

/// Backing spreadsheet configuration
#[derive(Clone)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    /// Base URL of the spreadsheet values API
    pub api_base: String,
    pub spreadsheet_id: String,
    pub access_token: String,
    /// Worksheet (tab) name holding the report table
    pub worksheet: String,
    pub timeout: Duration,
    /// Read cache TTL; `None` means use the layout default
    pub cache_ttl: Option<Duration>,
}

impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("backend", &self.backend)
            .field("api_base", &self.api_base)
            .field("spreadsheet_id", &self.spreadsheet_id)
            .field("access_token", &"***")
            .field("worksheet", &self.worksheet)
            .field("timeout", &self.timeout)
            .field("cache_ttl", &self.cache_ttl)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub layout: ReportLayout,
    /// Overrides the default branch list when set
    pub branches: Option<Vec<String>>,
    pub title: String,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        let report = ReportConfig::from_env()?;

        Ok(Config {
            app: AppConfig::from_env()?,
            access: AccessConfig::from_env()?,
            store: StoreConfig::from_env()?,
            report,
            swagger: SwaggerConfig::from_env()?,
        })
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        // Parse CORS allowed origins from comma-separated string
        let cors_allowed_origins = split_list(
            &env::var("CORS_ALLOWED_ORIGINS").unwrap_or_else(|_| "*".to_string()),
        );

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl AccessConfig {
    const DEFAULT_SESSION_TTL_SECS: u64 = 12 * 60 * 60; // 12 hours
    const MIN_SECRET_LEN: usize = 16;

    pub fn from_env() -> Result<Self, String> {
        let password = env::var("REPORT_PASSWORD")
            .ok()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| "REPORT_PASSWORD environment variable is required".to_string())?;

        let session_secret = env::var("SESSION_SECRET")
            .map_err(|_| "SESSION_SECRET environment variable is required".to_string())?;
        if session_secret.len() < Self::MIN_SECRET_LEN {
            return Err(format!(
                "SESSION_SECRET must be at least {} bytes",
                Self::MIN_SECRET_LEN
            ));
        }

        let session_ttl_secs = env::var("SESSION_TTL_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_SESSION_TTL_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "SESSION_TTL_SECS must be a valid number".to_string())?;

        let cookie_secure = parse_bool("SESSION_COOKIE_SECURE", false)?;

        Ok(Self {
            password,
            session_secret,
            session_ttl: Duration::from_secs(session_ttl_secs),
            cookie_secure,
        })
    }
}

impl StoreConfig {
    const DEFAULT_TIMEOUT_SECS: u64 = 10;

    pub fn from_env() -> Result<Self, String> {
        let backend = match env::var("STORE_BACKEND")
            .unwrap_or_else(|_| "sheets".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "sheets" => StoreBackend::Sheets,
            "memory" => StoreBackend::Memory,
            other => {
                return Err(format!(
                    "STORE_BACKEND must be 'sheets' or 'memory', got '{}'",
                    other
                ))
            }
        };

        let api_base = env::var("SHEETS_API_BASE")
            .unwrap_or_else(|_| "https://sheets.googleapis.com/v4".to_string())
            .trim_end_matches('/')
            .to_string();

        let (spreadsheet_id, access_token) = match backend {
            StoreBackend::Sheets => (
                env::var("SHEETS_SPREADSHEET_ID").map_err(|_| {
                    "SHEETS_SPREADSHEET_ID environment variable is required".to_string()
                })?,
                env::var("SHEETS_ACCESS_TOKEN").map_err(|_| {
                    "SHEETS_ACCESS_TOKEN environment variable is required".to_string()
                })?,
            ),
            StoreBackend::Memory => (String::new(), String::new()),
        };

        let worksheet = env::var("SHEETS_WORKSHEET").unwrap_or_else(|_| "시트1".to_string());

        let timeout_secs = env::var("SHEETS_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "SHEETS_TIMEOUT_SECS must be a valid number".to_string())?;

        let cache_ttl = match env::var("STORE_CACHE_TTL_SECS") {
            Ok(raw) => Some(Duration::from_secs(raw.parse::<u64>().map_err(|_| {
                "STORE_CACHE_TTL_SECS must be a valid number".to_string()
            })?)),
            Err(_) => None,
        };

        Ok(Self {
            backend,
            api_base,
            spreadsheet_id,
            access_token,
            worksheet,
            timeout: Duration::from_secs(timeout_secs),
            cache_ttl,
        })
    }
}

impl ReportConfig {
    pub fn from_env() -> Result<Self, String> {
        let layout = env::var("REPORT_LAYOUT")
            .unwrap_or_else(|_| "field".to_string())
            .parse::<ReportLayout>()?;

        let branches = env::var("REPORT_BRANCHES")
            .ok()
            .map(|raw| split_list(&raw))
            .filter(|list| !list.is_empty());

        let title = env::var("APP_TITLE").unwrap_or_else(|_| "현장 리포트".to_string());

        Ok(Self {
            layout,
            branches,
            title,
        })
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Result<Self, String> {
        // Only use credentials if they are non-empty
        let username = env::var("SWAGGER_USERNAME").ok().filter(|s| !s.is_empty());
        let password = env::var("SWAGGER_PASSWORD").ok().filter(|s| !s.is_empty());
        let title = env::var("SWAGGER_TITLE").unwrap_or_else(|_| "Field Report API".to_string());
        let version = env::var("SWAGGER_VERSION").unwrap_or_else(|_| "0.1.0".to_string());
        let description = env::var("SWAGGER_DESCRIPTION")
            .unwrap_or_else(|_| "API documentation for the field report service".to_string());

        Ok(Self {
            username,
            password,
            title,
            version,
            description,
        })
    }

    /// Returns credentials in "username:password" format if auth is enabled
    pub fn credentials(&self) -> Option<String> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some(format!("{}:{}", user, pass)),
            _ => None,
        }
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn parse_bool(key: &str, default: bool) -> Result<bool, String> {
    match env::var(key) {
        Ok(raw) => match raw.to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(format!("{} must be a boolean", key)),
        },
        Err(_) => Ok(default),
    }
}
