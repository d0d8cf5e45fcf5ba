//! JSON fetch wrapper
//!
//! Sends JSON requests with the page's CSRF token and reports failures twice:
//! as an error banner on the page and as an `Err` to the caller.

use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, StatusCode};
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::config::FetchConfig;
use crate::error::FlashError;
use crate::notification::{FlashTask, NotificationManager};
use crate::scheduler::Scheduler;
use crate::surface::{RenderSurface, Selector};

const JSON_MIME: &str = "application/json";

/// Header carrying the CSRF token
pub const CSRF_HEADER: &str = "x-csrftoken";

/// Per-request settings
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub method: Method,
    /// Extra headers; these win over the defaults
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            headers: Vec::new(),
            body: None,
        }
    }
}

impl FetchOptions {
    /// POST `body` as JSON
    pub fn post(body: Value) -> Self {
        Self {
            method: Method::POST,
            body: Some(body),
            ..Self::default()
        }
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }
}

#[derive(Debug, Clone)]
pub struct FetchClient {
    client: Client,
    csrf_meta_name: String,
}

impl FetchClient {
    pub fn new(config: &FetchConfig) -> Result<Self, FlashError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| FlashError::Network(e.to_string()))?;

        Ok(Self {
            client,
            csrf_meta_name: config.csrf_meta_name.clone(),
        })
    }

    /// `content` of the page's CSRF `<meta>` tag, if any
    pub fn csrf_token<'a, S: RenderSurface>(&self, surface: &'a S) -> Option<&'a str> {
        let selector = Selector::parse(&format!("meta[name=\"{}\"]", self.csrf_meta_name)).ok()?;
        let meta = surface.query_selector(&selector)?;
        surface.attribute(meta, "content")
    }

    /// Fetch `url` and decode the JSON response.
    ///
    /// Failures are shown as an `Error: ...` banner through `manager` and
    /// returned.
    pub async fn fetch_json<S, C>(
        &self,
        url: &str,
        options: &FetchOptions,
        manager: &mut NotificationManager<S, C>,
    ) -> Result<Value, FlashError>
    where
        S: RenderSurface,
        C: Scheduler<FlashTask>,
    {
        self.fetch_json_with_cancel(url, options, manager, &CancellationToken::new())
            .await
    }

    /// Like [`fetch_json`](Self::fetch_json), but gives up when `cancel_token`
    /// fires. A cancelled request shows no banner.
    pub async fn fetch_json_with_cancel<S, C>(
        &self,
        url: &str,
        options: &FetchOptions,
        manager: &mut NotificationManager<S, C>,
        cancel_token: &CancellationToken,
    ) -> Result<Value, FlashError>
    where
        S: RenderSurface,
        C: Scheduler<FlashTask>,
    {
        if cancel_token.is_cancelled() {
            return Err(FlashError::Cancelled);
        }

        let csrf = self.csrf_token(manager.surface()).map(str::to_string);

        let result = tokio::select! {
            biased;

            _ = cancel_token.cancelled() => Err(FlashError::Cancelled),
            result = self.request(url, options, csrf.as_deref()) => result,
        };

        match &result {
            Err(FlashError::Cancelled) => {
                log::debug!("Request to {} cancelled", url);
            }
            Err(e) => {
                log::error!("Fetch to {} failed: {}", url, e);
                manager.show_error(&format!("Error: {}", e.user_message()));
            }
            Ok(_) => {}
        }
        result
    }

    async fn request(
        &self,
        url: &str,
        options: &FetchOptions,
        csrf: Option<&str>,
    ) -> Result<Value, FlashError> {
        let headers = build_headers(csrf, &options.headers)?;
        let mut request = self
            .client
            .request(options.method.clone(), url)
            .headers(headers);
        if let Some(body) = &options.body {
            let body = serde_json::to_string(body).map_err(|e| FlashError::Parse(e.to_string()))?;
            request = request.body(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| FlashError::Network(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| FlashError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(FlashError::Http {
                status: status.as_u16(),
                message: error_message(status, &text),
            });
        }

        serde_json::from_str(&text).map_err(|e| FlashError::Parse(e.to_string()))
    }
}

/// Default JSON headers, the CSRF token when known, then the caller's headers
/// (which replace defaults of the same name)
pub fn build_headers(
    csrf: Option<&str>,
    extra: &[(String, String)],
) -> Result<HeaderMap, FlashError> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(JSON_MIME));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_MIME));

    if let Some(token) = csrf {
        let value =
            HeaderValue::from_str(token).map_err(|e| FlashError::Header(e.to_string()))?;
        headers.insert(HeaderName::from_static(CSRF_HEADER), value);
    }

    for (name, value) in extra {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| FlashError::Header(format!("{}: {}", name, e)))?;
        let value =
            HeaderValue::from_str(value).map_err(|e| FlashError::Header(e.to_string()))?;
        headers.insert(name, value);
    }

    Ok(headers)
}

/// Message for a non-success response.
///
/// A JSON body's `message` field wins; a body that is not JSON falls back to
/// the status reason. Either way `Error HTTP: {code}` is the last resort.
pub fn error_message(status: StatusCode, body: &str) -> String {
    let fallback = || format!("Error HTTP: {}", status.as_u16());

    match serde_json::from_str::<Value>(body) {
        Ok(json) => json
            .get("message")
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .map(str::to_string)
            .unwrap_or_else(fallback),
        Err(_) => status
            .canonical_reason()
            .map(str::to_string)
            .unwrap_or_else(fallback),
    }
}

#[cfg(test)]
#[path = "fetch_tests.rs"]
mod fetch_tests;
