//! Backend API
//!
//! `ApiClient` is the single point of egress: it attaches the bearer
//! credential, sends through a `Transport`, and reacts to 401 by dropping the
//! credential and sending the browser to the login view.

mod auth;
mod credentials;
mod fetch;
mod navigator;
mod todo;

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::AppConfig;
use crate::error::{ApiError, ApiResult};

pub use auth::*;
pub use credentials::{CookieCredentialStore, CredentialStore, MemoryCredentialStore};
pub use fetch::FetchTransport;
pub use navigator::{BrowserNavigator, Navigator};
pub use todo::*;

// ========================
// Request / Response
// ========================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Empty,
    /// Serialized JSON text
    Json(String),
    /// `application/x-www-form-urlencoded` text
    Form(String),
}

impl Body {
    pub fn content_type(&self) -> Option<&'static str> {
        match self {
            Body::Empty => None,
            Body::Json(_) => Some("application/json"),
            Body::Form(_) => Some("application/x-www-form-urlencoded"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Absolute URL
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Body,
}

impl ApiRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> ApiResult<T> {
        serde_json::from_str(&self.body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// Sends a fully built request. Futures are not `Send`: the browser runs
/// everything on one thread.
#[async_trait(?Send)]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> ApiResult<ApiResponse>;
}

// ========================
// Client
// ========================

/// Configured request sender shared by both providers
#[derive(Clone)]
pub struct ApiClient {
    config: AppConfig,
    transport: Arc<dyn Transport>,
    credentials: Arc<dyn CredentialStore>,
    navigator: Arc<dyn Navigator>,
}

impl ApiClient {
    pub fn new(
        config: &AppConfig,
        transport: Arc<dyn Transport>,
        credentials: Arc<dyn CredentialStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            config: config.clone(),
            transport,
            credentials,
            navigator,
        }
    }

    /// Client backed by `fetch`, a cookie credential store and real navigation
    pub fn browser(config: &AppConfig) -> Self {
        Self::new(
            config,
            Arc::new(FetchTransport),
            Arc::new(CookieCredentialStore::new(&config.token_cookie)),
            Arc::new(BrowserNavigator::new(&config.login_path)),
        )
    }

    pub fn credentials(&self) -> &dyn CredentialStore {
        self.credentials.as_ref()
    }

    /// Send one request. Non-2xx responses become errors; a 401 additionally
    /// clears the credential and navigates to the login view before the
    /// error is returned.
    pub async fn send(&self, method: Method, path: &str, body: Body) -> ApiResult<ApiResponse> {
        let mut headers = Vec::new();
        if let Some(token) = self.credentials.get() {
            headers.push(("Authorization".to_string(), format!("Bearer {}", token)));
        }
        if let Some(content_type) = body.content_type() {
            headers.push(("Content-Type".to_string(), content_type.to_string()));
        }
        let request = ApiRequest {
            method,
            url: self.config.endpoint(path),
            headers,
            body,
        };

        log::debug!("{} {}", method.as_str(), request.url);
        let response = self.transport.send(request).await.map_err(|e| {
            log::warn!("{} {} failed: {}", method.as_str(), path, e);
            e
        })?;

        if response.is_success() {
            return Ok(response);
        }

        let err = ApiError::from_response(response.status, &response.body);
        if let ApiError::Unauthorized { .. } = err {
            log::info!("{} {} rejected credential, returning to login", method.as_str(), path);
            self.credentials.clear();
            self.navigator.redirect_to_login();
        } else {
            log::warn!("{} {} -> {}", method.as_str(), path, response.status);
        }
        Err(err)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.send(Method::Get, path, Body::Empty).await?.json()
    }

    pub async fn post_json<B: Serialize>(&self, path: &str, body: &B) -> ApiResult<ApiResponse> {
        self.send(Method::Post, path, json_body(body)?).await
    }

    pub async fn post_form<B: Serialize>(&self, path: &str, form: &B) -> ApiResult<ApiResponse> {
        let encoded = serde_urlencoded::to_string(form).map_err(|e| ApiError::Encode(e.to_string()))?;
        self.send(Method::Post, path, Body::Form(encoded)).await
    }

    pub async fn patch_json<B: Serialize>(&self, path: &str, body: &B) -> ApiResult<ApiResponse> {
        self.send(Method::Patch, path, json_body(body)?).await
    }

    pub async fn delete(&self, path: &str) -> ApiResult<ApiResponse> {
        self.send(Method::Delete, path, Body::Empty).await
    }
}

fn json_body<B: Serialize>(body: &B) -> ApiResult<Body> {
    serde_json::to_string(body)
        .map(Body::Json)
        .map_err(|e| ApiError::Encode(e.to_string()))
}
