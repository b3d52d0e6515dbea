use contracts::dashboards::d401_admin_overview::dto::{AdjustBalanceQuery, AdjustBalanceResponse};
use contracts::system::users::{CreateUserDto, UpdateUserDto, User};

use crate::shared::http::{self, ApiResult};

/// Fetch all users
pub async fn fetch_users() -> ApiResult<Vec<User>> {
    http::get_json("/users").await
}

/// Create new user
pub async fn create_user(dto: &CreateUserDto) -> ApiResult<User> {
    http::post_json("/users", dto).await
}

/// Partial update; only the fields set in `dto` change
pub async fn update_user(id: i64, dto: &UpdateUserDto) -> ApiResult<User> {
    http::patch_json(&format!("/users/{}", id), dto).await
}

pub async fn delete_user(id: i64) -> ApiResult<()> {
    http::delete(&format!("/users/{}", id)).await
}

/// Credit (positive) or debit (negative) a balance. Parameters go in the query string.
pub async fn adjust_balance(id: i64, query: &AdjustBalanceQuery) -> ApiResult<AdjustBalanceResponse> {
    let path = http::query_path(&format!("/stats/admin/user/{}/adjust-balance", id), query)?;
    http::post_empty(&path).await
}
