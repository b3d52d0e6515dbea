use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Query for the bounded history endpoints.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PageLimit {
    pub limit: u32,
}

/// Response of `GET /stats/user`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserStats {
    pub total_spent: f64,
    pub total_requests: i64,
    pub total_input_tokens: i64,
    pub total_output_tokens: i64,
    pub recent_spending_30d: f64,
    pub usage_by_model: Vec<ModelUsage>,
    pub usage_by_day: Vec<DailyUsage>,
}

impl UserStats {
    pub fn total_tokens(&self) -> i64 {
        self.total_input_tokens + self.total_output_tokens
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelUsage {
    pub model: String,
    pub count: i64,
    #[serde(default)]
    pub total_cost: f64,
    #[serde(default)]
    pub total_input: i64,
    #[serde(default)]
    pub total_output: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyUsage {
    pub date: NaiveDate,
    pub requests: i64,
    #[serde(default)]
    pub cost: f64,
}

/// Single billed call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageRecord {
    pub id: i64,
    pub model: String,
    #[serde(default)]
    pub input_tokens: i64,
    #[serde(default)]
    pub output_tokens: i64,
    #[serde(default)]
    pub cost: f64,
    /// "chat" or "arena"
    #[serde(default)]
    pub session_type: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageHistoryResponse {
    pub history: Vec<UsageRecord>,
}

/// Append-only ledger entry. `amount` is signed: deposits positive, spending negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub amount: f64,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub description: Option<String>,
    pub balance_after: f64,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Transaction {
    pub fn is_credit(&self) -> bool {
        self.amount >= 0.0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionsResponse {
    pub transactions: Vec<Transaction>,
}
