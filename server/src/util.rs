//! Request metadata helpers.

use std::net::{IpAddr, SocketAddr};

use axum::extract::ConnectInfo;
use axum::http::header::USER_AGENT;
use axum::http::HeaderMap;

/// Longest user agent string kept in the view log.
pub const MAX_USER_AGENT_LEN: usize = 512;

fn header_ip(headers: &HeaderMap, name: &str) -> Option<IpAddr> {
    let value = headers.get(name)?.to_str().ok()?;
    value.split(',').next()?.trim().parse().ok()
}

/// Client IP from proxy headers or the connection.
///
/// Proxy headers (`X-Forwarded-For`, then `X-Real-IP`) are only honoured when
/// `trust_proxy` is set. `None` when neither source yields an address.
pub fn extract_client_ip(
    headers: &HeaderMap,
    connect_info: Option<&ConnectInfo<SocketAddr>>,
    trust_proxy: bool,
) -> Option<IpAddr> {
    if trust_proxy {
        if let Some(ip) =
            header_ip(headers, "X-Forwarded-For").or_else(|| header_ip(headers, "X-Real-IP"))
        {
            return Some(ip);
        }
    }
    connect_info.map(|c| c.0.ip())
}

/// User agent header, truncated to `MAX_USER_AGENT_LEN` bytes on a char boundary.
pub fn extract_user_agent(headers: &HeaderMap) -> Option<String> {
    let ua = headers.get(USER_AGENT)?.to_str().ok()?.trim();
    if ua.is_empty() {
        return None;
    }

    let mut end = ua.len().min(MAX_USER_AGENT_LEN);
    while !ua.is_char_boundary(end) {
        end -= 1;
    }
    Some(ua[..end].to_string())
}
