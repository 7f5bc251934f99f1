//! API utilities for talking to the inventory service
//!
//! The console is served from the same origin as the API; every request
//! carries the ambient session cookie.

use gloo_net::http::Response;

/// Get the base URL for API requests
///
/// # Returns
/// - API origin like "https://console.example.com"
/// - Empty string if window is not available (relative URLs still work)
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let host = location.host().unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}", protocol, host)
}

/// Build a full API URL from a path
///
/// # Example
/// ```no_run
/// # use frontend::shared::api_utils::api_url;
/// let url = api_url("/api/v1/products/123");
/// ```
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

/// Достать текст ошибки из неуспешного ответа.
///
/// 401/403 — неустранимая ошибка уровня страницы: сессией управляет
/// внешний контур, консоль её не продлевает.
pub async fn error_from_response(response: &Response) -> String {
    let status = response.status();
    if status == 401 || status == 403 {
        return "Сессия истекла — войдите заново".to_string();
    }

    #[derive(serde::Deserialize)]
    struct ErrorBody {
        error: Option<String>,
        detail: Option<String>,
    }
    if let Ok(body) = response.json::<ErrorBody>().await {
        if let Some(message) = body.error.or(body.detail) {
            return message;
        }
    }
    format!("HTTP {}", status)
}
