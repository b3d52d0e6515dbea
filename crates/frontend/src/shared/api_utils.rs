//! API utilities for frontend-backend communication
//!
//! The gateway is addressed through one base path. It is taken from the
//! `MULTICHAT_API_BASE` environment variable at build time and defaults to
//! `/api`, which works when the SPA is served behind the same origin.

use serde::Serialize;

pub const DEFAULT_API_BASE: &str = "/api";

/// Get the base URL for API requests (without trailing slash)
pub fn api_base() -> String {
    option_env!("MULTICHAT_API_BASE")
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(DEFAULT_API_BASE)
        .trim_end_matches('/')
        .to_string()
}

/// Build a full API URL from a path such as `/chat/sessions`
pub fn api_url(path: &str) -> String {
    join_url(&api_base(), path)
}

/// Join base and path with exactly one slash between them
pub fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        base.to_string()
    } else {
        format!("{}/{}", base, path)
    }
}

/// Append serialized query parameters to a path
///
/// # Example
/// ```text
/// let path = with_query("/stats/user/history", &PageLimit { limit: 20 });
/// assert_eq!(path, "/stats/user/history?limit=20");
/// ```
pub fn with_query<Q: Serialize>(path: &str, query: &Q) -> Result<String, String> {
    let qs = serde_qs::to_string(query).map_err(|e| format!("Failed to encode query: {}", e))?;
    if qs.is_empty() {
        Ok(path.to_string())
    } else {
        Ok(format!("{}?{}", path, qs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::dashboards::d400_profile::dto::PageLimit;
    use contracts::dashboards::d401_admin_overview::dto::AdjustBalanceQuery;

    #[test]
    fn join_handles_slashes() {
        assert_eq!(join_url("/api", "/chat/models"), "/api/chat/models");
        assert_eq!(join_url("/api/", "chat/models"), "/api/chat/models");
        assert_eq!(
            join_url("https://gw.example.com/api", "/auth/me"),
            "https://gw.example.com/api/auth/me"
        );
        assert_eq!(join_url("/api", ""), "/api");
    }

    #[test]
    fn query_encoding() {
        assert_eq!(
            with_query("/stats/user/history", &PageLimit { limit: 20 }).unwrap(),
            "/stats/user/history?limit=20"
        );
        let q = AdjustBalanceQuery {
            amount: -2.5,
            description: Some("refund & bonus".to_string()),
        };
        let path = with_query("/stats/admin/user/3/adjust-balance", &q).unwrap();
        assert!(path.starts_with("/stats/admin/user/3/adjust-balance?amount=-2.5&description="));
        assert!(!path.contains(' '));
        assert!(!path.contains("& "));
    }

    #[test]
    fn query_without_optional_field() {
        let q = AdjustBalanceQuery {
            amount: 10.0,
            description: None,
        };
        let path = with_query("/x", &q).unwrap();
        assert!(path.starts_with("/x?amount=10"));
        assert!(!path.contains("description"));
    }
}
