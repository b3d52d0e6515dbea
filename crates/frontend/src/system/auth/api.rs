use contracts::system::auth::{LoginRequest, LoginResponse, UserInfo};

use crate::shared::http::{self, ApiResult};

/// Exchange username/password for a bearer token
pub async fn login(username: String, password: String) -> ApiResult<LoginResponse> {
    let request = LoginRequest { username, password };
    http::post_form("/auth/login", &request).await
}

/// Get current user info for the stored token
pub async fn get_current_user() -> ApiResult<UserInfo> {
    http::get_json("/auth/me").await
}
