//! Application Configuration
//!
//! Values baked in at build time through environment variables, with
//! defaults matching a local development backend.

use log::LevelFilter;

const DEFAULT_API_URL: &str = "http://localhost:8000/api/v1";
const DEFAULT_TOKEN_COOKIE: &str = "token";
const DEFAULT_LOGIN_PATH: &str = "/auth";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Base URL every endpoint path is appended to (no trailing slash)
    pub api_base_url: String,
    /// Cookie name holding the access token
    pub token_cookie: String,
    /// Where the browser is sent after a 401
    pub login_path: String,
    pub log_level: LevelFilter,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_parts(None, None, None, None)
    }
}

impl AppConfig {
    /// Read `TODO_API_URL`, `TODO_TOKEN_COOKIE`, `TODO_LOGIN_PATH` and
    /// `TODO_LOG_LEVEL` as captured at compile time.
    pub fn from_env() -> Self {
        Self::from_parts(
            option_env!("TODO_API_URL"),
            option_env!("TODO_TOKEN_COOKIE"),
            option_env!("TODO_LOGIN_PATH"),
            option_env!("TODO_LOG_LEVEL"),
        )
    }

    fn from_parts(
        api_url: Option<&str>,
        token_cookie: Option<&str>,
        login_path: Option<&str>,
        log_level: Option<&str>,
    ) -> Self {
        Self {
            api_base_url: non_empty(api_url)
                .unwrap_or(DEFAULT_API_URL)
                .trim_end_matches('/')
                .to_string(),
            token_cookie: non_empty(token_cookie).unwrap_or(DEFAULT_TOKEN_COOKIE).to_string(),
            login_path: non_empty(login_path).unwrap_or(DEFAULT_LOGIN_PATH).to_string(),
            log_level: non_empty(log_level)
                .and_then(|lvl| lvl.parse().ok())
                .unwrap_or(LevelFilter::Info),
        }
    }

    /// Join an endpoint path onto the base URL
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base_url, path.trim_start_matches('/'))
    }
}

/// Unset and blank values both mean "use the default"
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}
