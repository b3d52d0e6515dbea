//! Arena - Model (API functions)

use contracts::domain::a002_arena::aggregate::{
    ArbitrationRequest, ArbitrationResponse, ArenaModel, CompareRequest, CompareResponse,
};

use crate::shared::http::{self, ApiResult};

pub async fn fetch_models() -> ApiResult<Vec<ArenaModel>> {
    http::get_json("/arena/models").await
}

/// One request; the gateway queries every model in parallel.
pub async fn compare(request: &CompareRequest) -> ApiResult<CompareResponse> {
    http::post_json("/arena/compare", request).await
}

pub async fn summarize(request: &ArbitrationRequest) -> ApiResult<ArbitrationResponse> {
    http::post_json("/arbitration/summarize", request).await
}
