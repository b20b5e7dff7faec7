//! Request relay
//!
//! `{prefix}/{*path}` is forwarded to `{backend}/{path}?{query}` with the same
//! method, headers and body. The response comes back as-is apart from its
//! cookies, which are rewritten for localhost (see [`crate::cookie`]).

use std::sync::Arc;

use axum::Json;
use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::response::Response;
use http::header::{self, HeaderMap, HeaderName, HeaderValue};
use http::{Method, Uri};
use reqwest::Client;
use reqwest::redirect::Policy;
use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::cookie::{rewrite_set_cookie, split_set_cookie};
use crate::{ProxyConfig, ProxyError, ProxyResult};

/// Not forwarded upstream; reqwest computes its own framing
static SKIP_REQUEST: [HeaderName; 5] = [
    header::HOST,
    header::CONTENT_LENGTH,
    header::TRANSFER_ENCODING,
    header::CONNECTION,
    // responses are relayed without decoding
    header::ACCEPT_ENCODING,
];

/// Not copied back; Set-Cookie is rewritten separately
static SKIP_RESPONSE: [HeaderName; 4] = [
    header::SET_COOKIE,
    header::TRANSFER_ENCODING,
    header::CONTENT_ENCODING,
    header::CONTENT_LENGTH,
];

/// Shared proxy state
#[derive(Debug, Clone)]
pub struct ProxyState {
    pub config: Arc<ProxyConfig>,
    client: Client,
}

impl ProxyState {
    pub fn new(config: ProxyConfig) -> ProxyResult<Self> {
        let client = Client::builder()
            .redirect(Policy::none())
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self {
            config: Arc::new(config),
            client,
        })
    }

    /// Backend URL for an incoming proxied URI
    pub fn target_url(&self, uri: &Uri) -> ProxyResult<String> {
        let path = uri.path();
        let rest = path
            .strip_prefix(self.config.prefix.as_str())
            .filter(|rest| rest.is_empty() || rest.starts_with('/'))
            .ok_or_else(|| ProxyError::InvalidRequest(format!("path {path} is outside the proxy prefix")))?;

        let mut url = format!("{}{rest}", self.config.backend_url);
        if let Some(query) = uri.query() {
            url.push('?');
            url.push_str(query);
        }
        Ok(url)
    }
}

/// Relay one request to the backend
pub async fn forward(
    State(state): State<ProxyState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> ProxyResult<Response> {
    let url = state.target_url(&uri)?;
    debug!(%method, %url, "Forwarding request");

    let mut upstream = state
        .client
        .request(method.clone(), &url)
        .headers(forward_headers(&headers));

    if method != Method::GET && method != Method::HEAD && !body.is_empty() {
        upstream = upstream.body(body);
    }

    let resp = upstream.send().await?;
    let status = resp.status();
    let resp_headers = resp.headers().clone();
    let bytes = resp.bytes().await?;

    let mut response = Response::new(Body::from(bytes));
    *response.status_mut() = status;
    copy_response_headers(&resp_headers, response.headers_mut());
    // HEAD has no body to measure, keep the upstream length
    if method == Method::HEAD
        && let Some(length) = resp_headers.get(header::CONTENT_LENGTH)
    {
        response.headers_mut().insert(header::CONTENT_LENGTH, length.clone());
    }

    debug!(%method, %url, status = status.as_u16(), "Upstream responded");
    Ok(response)
}

/// Request headers minus hop-specific ones, with cookies folded into one header
pub fn forward_headers(incoming: &HeaderMap) -> HeaderMap {
    let mut out = HeaderMap::with_capacity(incoming.len());
    for (name, value) in incoming {
        if SKIP_REQUEST.contains(name) || *name == header::COOKIE {
            continue;
        }
        out.append(name.clone(), value.clone());
    }

    // HTTP/2 clients may send one Cookie header per pair
    let cookies: Vec<&str> = incoming
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .collect();
    if !cookies.is_empty()
        && let Ok(value) = HeaderValue::from_str(&cookies.join("; "))
    {
        out.insert(header::COOKIE, value);
    }
    out
}

/// Copy upstream headers and emit one rewritten Set-Cookie per cookie
///
/// Only a lone Set-Cookie header is checked for comma-joined cookies; separate
/// headers are taken one cookie each.
pub fn copy_response_headers(upstream: &HeaderMap, out: &mut HeaderMap) {
    for (name, value) in upstream {
        if SKIP_RESPONSE.contains(name) {
            continue;
        }
        out.append(name.clone(), value.clone());
    }

    let values: Vec<&HeaderValue> = upstream.get_all(header::SET_COOKIE).iter().collect();
    let joined = values.len() == 1;

    for value in values {
        let Ok(text) = value.to_str() else {
            warn!("Relaying non-ASCII Set-Cookie unchanged");
            out.append(header::SET_COOKIE, value.clone());
            continue;
        };
        let cookies = if joined { split_set_cookie(text) } else { vec![text] };
        for cookie in cookies {
            match HeaderValue::from_str(&rewrite_set_cookie(cookie)) {
                Ok(rewritten) => {
                    out.append(header::SET_COOKIE, rewritten);
                }
                Err(e) => {
                    warn!(error = %e, "Relaying unrewritable Set-Cookie unchanged");
                    out.append(header::SET_COOKIE, value.clone());
                }
            }
        }
    }
}

/// `GET /health`
pub async fn health(State(state): State<ProxyState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "backend": state.config.backend_url,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> ProxyState {
        ProxyState::new(ProxyConfig::new("http://backend.test")).unwrap()
    }

    #[test]
    fn test_target_url_strips_prefix_keeps_query() {
        let state = state();
        let uri: Uri = "/api/proxy/properties/7/availability?from=2026-01-01&to=2026-01-31"
            .parse()
            .unwrap();
        assert_eq!(
            state.target_url(&uri).unwrap(),
            "http://backend.test/properties/7/availability?from=2026-01-01&to=2026-01-31"
        );
    }

    #[test]
    fn test_target_url_rejects_lookalike_prefix() {
        let state = state();
        let uri: Uri = "/api/proxyish/users".parse().unwrap();
        assert!(matches!(state.target_url(&uri), Err(ProxyError::InvalidRequest(_))));
    }

    #[test]
    fn test_forward_headers() {
        let mut incoming = HeaderMap::new();
        incoming.insert(header::HOST, HeaderValue::from_static("localhost:3000"));
        incoming.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        incoming.append(header::COOKIE, HeaderValue::from_static("accessToken=a1"));
        incoming.append(header::COOKIE, HeaderValue::from_static("refreshToken=r1"));

        let out = forward_headers(&incoming);
        assert!(out.get(header::HOST).is_none());
        assert_eq!(out[header::ACCEPT], "application/json");
        assert_eq!(out.get_all(header::COOKIE).iter().count(), 1);
        assert_eq!(out[header::COOKIE], "accessToken=a1; refreshToken=r1");
    }

    #[test]
    fn test_copy_response_headers_fans_out_cookies() {
        let mut upstream = HeaderMap::new();
        upstream.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
        upstream.insert(header::CONTENT_ENCODING, HeaderValue::from_static("gzip"));
        upstream.append(header::VARY, HeaderValue::from_static("Origin"));
        upstream.append(header::VARY, HeaderValue::from_static("Accept"));
        upstream.append(
            header::SET_COOKIE,
            HeaderValue::from_static("accessToken=a1; Secure; SameSite=None; Path=/auth"),
        );
        upstream.append(
            header::SET_COOKIE,
            HeaderValue::from_static("refreshToken=r1; Domain=example.com; HttpOnly"),
        );

        let mut out = HeaderMap::new();
        copy_response_headers(&upstream, &mut out);

        assert!(out.get(header::CONTENT_ENCODING).is_none());
        assert_eq!(out.get_all(header::VARY).iter().count(), 2);
        let cookies: Vec<_> = out
            .get_all(header::SET_COOKIE)
            .iter()
            .map(|v| v.to_str().unwrap())
            .collect();
        assert_eq!(
            cookies,
            vec![
                "accessToken=a1; SameSite=Lax; Path=/",
                "refreshToken=r1; HttpOnly; Path=/",
            ]
        );
    }

    #[test]
    fn test_separate_set_cookie_headers_are_not_split() {
        let mut upstream = HeaderMap::new();
        upstream.append(header::SET_COOKIE, HeaderValue::from_static("prefs=a,b=c"));
        upstream.append(header::SET_COOKIE, HeaderValue::from_static("sid=s1; Secure"));

        let mut out = HeaderMap::new();
        copy_response_headers(&upstream, &mut out);

        let cookies: Vec<_> = out
            .get_all(header::SET_COOKIE)
            .iter()
            .map(|v| v.to_str().unwrap())
            .collect();
        assert_eq!(cookies, vec!["prefs=a,b=c; Path=/", "sid=s1; Path=/"]);
    }

    #[test]
    fn test_non_ascii_set_cookie_is_relayed() {
        let mut upstream = HeaderMap::new();
        upstream.append(header::SET_COOKIE, HeaderValue::from_bytes(b"name=caf\xe9").unwrap());
        upstream.append(header::SET_COOKIE, HeaderValue::from_static("sid=s1"));

        let mut out = HeaderMap::new();
        copy_response_headers(&upstream, &mut out);

        let cookies: Vec<_> = out.get_all(header::SET_COOKIE).iter().collect();
        assert_eq!(cookies.len(), 2);
        assert_eq!(cookies[0].as_bytes(), b"name=caf\xe9");
        assert_eq!(cookies[1], "sid=s1; Path=/");
    }
}
