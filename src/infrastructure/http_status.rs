//! HTTP status classification shared by the backend adapters

/// Non-success outcome of an outbound call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusFault {
    /// 401 or 403
    Unauthorized,
    /// 429
    RateLimited,
    /// Any other non-2xx, rendered as `HTTP <status>: <body>`
    Other(String),
}

/// Pass successful responses through; classify everything else.
pub async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, StatusFault> {
    let status = response.status();

    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        return Err(StatusFault::Unauthorized);
    }

    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(StatusFault::RateLimited);
    }

    if !status.is_success() {
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(StatusFault::Other(format!("HTTP {}: {}", status, error_text)));
    }

    Ok(response)
}

/// Transport error text with the request URL stripped
pub fn redact_transport(error: reqwest::Error) -> String {
    error.without_url().to_string()
}
