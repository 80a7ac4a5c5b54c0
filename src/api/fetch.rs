//! Fetch Transport
//!
//! `Transport` over the browser fetch API via `gloo-net`.

use async_trait::async_trait;

use super::{ApiRequest, ApiResponse, Transport};
use crate::error::{ApiError, ApiResult};

pub struct FetchTransport;

#[cfg(target_arch = "wasm32")]
#[async_trait(?Send)]
impl Transport for FetchTransport {
    async fn send(&self, request: ApiRequest) -> ApiResult<ApiResponse> {
        use super::{Body, Method};
        use gloo_net::http::Request;

        let mut builder = match request.method {
            Method::Get => Request::get(&request.url),
            Method::Post => Request::post(&request.url),
            Method::Patch => Request::patch(&request.url),
            Method::Delete => Request::delete(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        let built = match request.body {
            Body::Empty => builder.build(),
            Body::Json(text) | Body::Form(text) => builder.body(text),
        }
        .map_err(|e| ApiError::Encode(e.to_string()))?;

        let response = built
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;

        Ok(ApiResponse { status, body })
    }
}

/// Non-WASM stub
#[cfg(not(target_arch = "wasm32"))]
#[async_trait(?Send)]
impl Transport for FetchTransport {
    async fn send(&self, request: ApiRequest) -> ApiResult<ApiResponse> {
        Err(ApiError::Network(format!(
            "{} {}: HTTP requests require a browser runtime",
            request.method.as_str(),
            request.url
        )))
    }
}
