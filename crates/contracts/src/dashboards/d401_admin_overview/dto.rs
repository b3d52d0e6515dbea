use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Response of `GET /stats/admin/overview`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminOverview {
    pub total_users: i64,
    pub active_users: i64,
    pub total_revenue: f64,
    pub total_requests: i64,
    pub total_tokens: i64,
    pub requests_24h: i64,
    pub revenue_24h: f64,
    pub top_users: Vec<TopUser>,
    pub usage_by_model: Vec<ModelRevenue>,
    pub daily_stats: Vec<DailyStat>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopUser {
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    pub total_spent: f64,
    pub request_count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelRevenue {
    pub model: String,
    pub count: i64,
    #[serde(default)]
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyStat {
    pub date: NaiveDate,
    pub requests: i64,
    #[serde(default)]
    pub revenue: f64,
    #[serde(default)]
    pub active_users: i64,
}

/// Query parameters of `POST /stats/admin/user/:id/adjust-balance`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustBalanceQuery {
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustBalanceResponse {
    #[serde(default)]
    pub message: String,
    pub new_balance: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overview_decodes_partial_payload() {
        let o: AdminOverview = serde_json::from_str(
            r#"{"total_users":3,"active_users":2,"total_revenue":4.5,
                "daily_stats":[{"date":"2025-02-28","requests":7,"revenue":0.7,"active_users":2}]}"#,
        )
        .unwrap();
        assert_eq!(o.total_users, 3);
        assert!(o.top_users.is_empty());
        assert_eq!(o.daily_stats[0].requests, 7);
    }
}
