// src/utils/http.rs

//! HTTP client utilities.
//!
//! The upstream filters on request headers, so the set below is sent
//! verbatim on every listing request.

use std::time::Duration;

use reqwest::header::{HOST, HeaderMap, HeaderName, HeaderValue};
use url::Url;

use crate::error::{AppError, Result};
use crate::models::UpstreamConfig;

/// Fixed headers expected by the listing endpoint, Host and User-Agent excluded.
pub const UPSTREAM_HEADERS: &[(&str, &str)] = &[
    ("connection", "keep-alive"),
    ("accept", "*/*"),
    ("errorwrap", "json"),
    ("origin", "https://cp.allcpp.cn"),
    ("sec-fetch-mode", "cors"),
    ("sec-fetch-site", "same-site"),
    ("sec-fetch-dest", "empty"),
    ("referer", "https://cp.allcpp.cn/"),
    ("accept-encoding", "gzip, deflate, br"),
    (
        "accept-language",
        "zh-CN,zh;q=0.9,en;q=0.8,en-GB;q=0.7,en-US;q=0.6",
    ),
];

/// `host[:port]` of the listing URL, as sent in the Host header.
pub fn host_header(list_url: &Url) -> Result<String> {
    let host = list_url
        .host_str()
        .ok_or_else(|| AppError::config(format!("List URL has no host: {list_url}")))?;
    Ok(match list_url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    })
}

/// Build the default header map for requests to `list_url`.
pub fn upstream_headers(list_url: &Url) -> Result<HeaderMap> {
    let mut headers = HeaderMap::with_capacity(UPSTREAM_HEADERS.len() + 1);
    let host = host_header(list_url)?;
    let host = HeaderValue::from_str(&host)
        .map_err(|e| AppError::config(format!("Invalid host {host}: {e}")))?;
    headers.insert(HOST, host);
    for &(name, value) in UPSTREAM_HEADERS {
        let name = HeaderName::from_static(name);
        let value = HeaderValue::from_str(value)
            .map_err(|e| AppError::config(format!("Invalid header value for {name}: {e}")))?;
        headers.insert(name, value);
    }
    Ok(headers)
}

/// Create a configured asynchronous HTTP client.
pub fn create_async_client(config: &UpstreamConfig) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .default_headers(upstream_headers(&Url::parse(&config.list_url)?)?)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;
    Ok(client)
}
