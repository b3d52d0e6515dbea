use contracts::dashboards::d401_admin_overview::dto::AdminOverview;
use contracts::system::users::User;

use crate::shared::http::{self, ApiResult};
use crate::system::users::api as users_api;

/// Revenue, activity and top users across the whole gateway
pub async fn get_overview() -> ApiResult<AdminOverview> {
    http::get_json("/stats/admin/overview").await
}

/// Statistics and roster are requested together and awaited jointly.
pub async fn load_admin_data() -> (ApiResult<AdminOverview>, ApiResult<Vec<User>>) {
    futures::join!(get_overview(), users_api::fetch_users())
}
