//! Single configured request layer for the gateway API.
//!
//! Every call goes through [`dispatch`]: the stored bearer token is attached,
//! non-2xx responses are mapped onto [`ApiError`] and a 401 clears the
//! credential and sends the browser to the login route.

use contracts::shared::error::ErrorBody;
use gloo_net::http::{Request, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::shared::api_utils::{api_url, with_query};
use crate::system::auth::storage;

pub const LOGIN_ROUTE: &str = "/login";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Сессия истекла, войдите снова")]
    Unauthorized,
    #[error("{message}")]
    Api { status: u16, message: String },
    #[error("Ошибка сети: {0}")]
    Network(String),
    #[error("Некорректный ответ сервера: {0}")]
    Decode(String),
    #[error("Не удалось сформировать запрос: {0}")]
    Encode(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized => Some(401),
            ApiError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// What to do with a 401.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnauthorizedPolicy {
    /// Drop the credential and go to the login route.
    Redirect,
    /// Report it like any other business error (used by the login form).
    Inline,
}

#[derive(Debug, Clone, Copy)]
enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl Method {
    fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

fn fallback_message(status: u16) -> &'static str {
    match status {
        400 => "Некорректный запрос",
        401 => "Неверное имя пользователя или пароль",
        402 => "Недостаточно средств на балансе",
        403 => "Недостаточно прав",
        404 => "Не найдено",
        413 => "Файл слишком большой",
        422 => "Ошибка валидации данных",
        500..=599 => "Ошибка сервера, попробуйте позже",
        _ => "Неизвестная ошибка",
    }
}

/// Map a failed response onto the error taxonomy.
pub fn error_from_response(status: u16, body: &str, policy: UnauthorizedPolicy) -> ApiError {
    if status == 401 && policy == UnauthorizedPolicy::Redirect {
        return ApiError::Unauthorized;
    }
    let message = ErrorBody::parse(body)
        .and_then(|b| b.message())
        .unwrap_or_else(|| fallback_message(status).to_string());
    ApiError::Api { status, message }
}

/// `path` with `query` serialized into its query string.
pub fn query_path<Q: Serialize>(path: &str, query: &Q) -> ApiResult<String> {
    with_query(path, query).map_err(ApiError::Encode)
}

/// Decode a successful body.
pub fn decode<T: DeserializeOwned>(body: &str) -> ApiResult<T> {
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}

fn handle_unauthorized() {
    log::info!("401 from gateway, clearing stored credential");
    storage::clear_token();
    if let Some(window) = web_sys::window() {
        let location = window.location();
        let on_login = location
            .pathname()
            .map(|p| p == LOGIN_ROUTE)
            .unwrap_or(false);
        if !on_login {
            let _ = location.set_href(LOGIN_ROUTE);
        }
    }
}

fn builder(method: Method, path: &str, with_token: bool) -> RequestBuilder {
    let url = api_url(path);
    let builder = match method {
        Method::Get => Request::get(&url),
        Method::Post => Request::post(&url),
        Method::Patch => Request::patch(&url),
        Method::Delete => Request::delete(&url),
    };
    match storage::get_token().filter(|_| with_token) {
        Some(token) => builder.header("Authorization", &bearer(&token)),
        None => builder,
    }
}

async fn dispatch(
    method: Method,
    path: &str,
    request: Result<Request, gloo_net::Error>,
    policy: UnauthorizedPolicy,
) -> ApiResult<String> {
    let request = request.map_err(|e| ApiError::Encode(e.to_string()))?;
    log::debug!("{} {}", method.as_str(), path);

    let response = request.send().await.map_err(|e| {
        log::error!("{} {} failed: {}", method.as_str(), path, e);
        ApiError::Network(e.to_string())
    })?;

    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    if (200..300).contains(&status) {
        return Ok(body);
    }

    let err = error_from_response(status, &body, policy);
    match &err {
        ApiError::Unauthorized => handle_unauthorized(),
        _ => log::warn!("{} {} -> {}: {}", method.as_str(), path, status, err),
    }
    Err(err)
}

pub async fn get_json<T: DeserializeOwned>(path: &str) -> ApiResult<T> {
    let request = builder(Method::Get, path, true).build();
    let body = dispatch(Method::Get, path, request, UnauthorizedPolicy::Redirect).await?;
    decode(&body)
}

pub async fn post_json<B, T>(path: &str, payload: &B) -> ApiResult<T>
where
    B: Serialize + ?Sized,
    T: DeserializeOwned,
{
    let request = builder(Method::Post, path, true).json(payload);
    let body = dispatch(Method::Post, path, request, UnauthorizedPolicy::Redirect).await?;
    decode(&body)
}

pub async fn patch_json<B, T>(path: &str, payload: &B) -> ApiResult<T>
where
    B: Serialize + ?Sized,
    T: DeserializeOwned,
{
    let request = builder(Method::Patch, path, true).json(payload);
    let body = dispatch(Method::Patch, path, request, UnauthorizedPolicy::Redirect).await?;
    decode(&body)
}

/// POST without a body; parameters travel in the query string.
pub async fn post_empty<T: DeserializeOwned>(path: &str) -> ApiResult<T> {
    let request = builder(Method::Post, path, true).build();
    let body = dispatch(Method::Post, path, request, UnauthorizedPolicy::Redirect).await?;
    decode(&body)
}

/// DELETE; the response body (often empty, 204) is ignored.
pub async fn delete(path: &str) -> ApiResult<()> {
    let request = builder(Method::Delete, path, true).build();
    dispatch(Method::Delete, path, request, UnauthorizedPolicy::Redirect).await?;
    Ok(())
}

/// Multipart upload. The browser sets the boundary header itself.
pub async fn post_multipart<T: DeserializeOwned>(
    path: &str,
    form: web_sys::FormData,
) -> ApiResult<T> {
    let request = builder(Method::Post, path, true).body(form);
    let body = dispatch(Method::Post, path, request, UnauthorizedPolicy::Redirect).await?;
    decode(&body)
}

/// Unauthenticated `application/x-www-form-urlencoded` POST (login).
pub async fn post_form<F, T>(path: &str, form: &F) -> ApiResult<T>
where
    F: Serialize,
    T: DeserializeOwned,
{
    let encoded = serde_qs::to_string(form)
        .map_err(|e| ApiError::Encode(e.to_string()))?;
    let request = builder(Method::Post, path, false)
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(encoded);
    let body = dispatch(Method::Post, path, request, UnauthorizedPolicy::Inline).await?;
    decode(&body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_is_global_by_default() {
        let err = error_from_response(401, r#"{"detail":"Could not validate credentials"}"#, UnauthorizedPolicy::Redirect);
        assert_eq!(err, ApiError::Unauthorized);
        assert_eq!(err.status(), Some(401));
    }

    #[test]
    fn login_401_keeps_backend_message() {
        let err = error_from_response(
            401,
            r#"{"detail":"Incorrect username or password"}"#,
            UnauthorizedPolicy::Inline,
        );
        assert_eq!(err.to_string(), "Incorrect username or password");
    }

    #[test]
    fn business_error_is_surfaced_verbatim() {
        let err = error_from_response(
            402,
            r#"{"detail":"Insufficient balance. Required: $0.0100, Available: $0.00"}"#,
            UnauthorizedPolicy::Redirect,
        );
        assert_eq!(
            err,
            ApiError::Api {
                status: 402,
                message: "Insufficient balance. Required: $0.0100, Available: $0.00".into()
            }
        );
    }

    #[test]
    fn generic_fallbacks() {
        let err = error_from_response(502, "<html>Bad Gateway</html>", UnauthorizedPolicy::Redirect);
        assert_eq!(err.to_string(), "Ошибка сервера, попробуйте позже");
        let err = error_from_response(418, "", UnauthorizedPolicy::Redirect);
        assert_eq!(err.to_string(), "Неизвестная ошибка");
    }

    #[test]
    fn decode_errors_are_typed() {
        let ok: ApiResult<Vec<i64>> = decode("[1,2]");
        assert_eq!(ok.unwrap(), vec![1, 2]);
        let bad: ApiResult<Vec<i64>> = decode("not json");
        assert!(matches!(bad, Err(ApiError::Decode(_))));
    }

    #[test]
    fn query_encoding_failure_is_a_request_error() {
        let err = query_path("/stats/user/history", &5).unwrap_err();
        assert!(matches!(err, ApiError::Encode(_)));
        assert!(err.to_string().starts_with("Не удалось сформировать запрос"));
    }

    #[test]
    fn bearer_header() {
        assert_eq!(bearer("abc.def"), "Bearer abc.def");
    }
}
