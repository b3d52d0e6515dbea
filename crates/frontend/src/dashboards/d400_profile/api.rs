use contracts::dashboards::d400_profile::dto::{
    PageLimit, Transaction, TransactionsResponse, UsageHistoryResponse, UsageRecord, UserStats,
};

use crate::shared::http::{self, ApiResult};

/// Page size of the history and transaction tabs
pub const HISTORY_LIMIT: u32 = 20;

/// Totals, per-model and per-day usage of the current user
pub async fn get_user_stats() -> ApiResult<UserStats> {
    http::get_json("/stats/user").await
}

pub async fn get_usage_history() -> ApiResult<Vec<UsageRecord>> {
    let path = limited("/stats/user/history")?;
    let response: UsageHistoryResponse = http::get_json(&path).await?;
    Ok(response.history)
}

pub async fn get_transactions() -> ApiResult<Vec<Transaction>> {
    let path = limited("/stats/user/transactions")?;
    let response: TransactionsResponse = http::get_json(&path).await?;
    Ok(response.transactions)
}

fn limited(path: &str) -> ApiResult<String> {
    http::query_path(path, &PageLimit { limit: HISTORY_LIMIT })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_paths_are_bounded() {
        assert_eq!(
            limited("/stats/user/history").unwrap(),
            "/stats/user/history?limit=20"
        );
    }
}
