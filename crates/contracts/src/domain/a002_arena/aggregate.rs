use serde::{Deserialize, Serialize};

/// Model eligible for comparison (`GET /arena/models` returns a bare array).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArenaModel {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub provider: String,
}

/// Body of `POST /arena/compare`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompareRequest {
    pub models: Vec<String>,
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_ids: Option<Vec<i64>>,
}

impl CompareRequest {
    pub fn new(models: Vec<String>, prompt: String, file_ids: Vec<i64>) -> Self {
        Self {
            models,
            prompt,
            file_ids: if file_ids.is_empty() {
                None
            } else {
                Some(file_ids)
            },
        }
    }
}

/// One model's outcome within a comparison run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelResponse {
    pub model: String,
    #[serde(default)]
    pub model_name: String,
    #[serde(default)]
    pub response: String,
    #[serde(default)]
    pub input_tokens: i64,
    #[serde(default)]
    pub output_tokens: i64,
    #[serde(default)]
    pub cost: f64,
    #[serde(default)]
    pub error: Option<String>,
}

impl ModelResponse {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    pub fn display_name(&self) -> &str {
        if self.model_name.is_empty() {
            &self.model
        } else {
            &self.model_name
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompareResponse {
    #[serde(default)]
    pub prompt: String,
    pub responses: Vec<ModelResponse>,
    #[serde(default)]
    pub total_cost: f64,
}

impl CompareResponse {
    /// Sum of every entry's `cost`. Failed entries carry zero cost.
    pub fn summed_cost(&self) -> f64 {
        self.responses.iter().map(|r| r.cost).sum()
    }

    pub fn successful(&self) -> impl Iterator<Item = &ModelResponse> {
        self.responses.iter().filter(|r| r.is_success())
    }
}

/// Successful answer forwarded to the arbiter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseSummary {
    pub model: String,
    pub model_name: String,
    pub response: String,
}

impl From<&ModelResponse> for ResponseSummary {
    fn from(r: &ModelResponse) -> Self {
        Self {
            model: r.model.clone(),
            model_name: r.model_name.clone(),
            response: r.response.clone(),
        }
    }
}

/// Body of `POST /arbitration/summarize`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArbitrationRequest {
    pub prompt: String,
    pub responses: Vec<ResponseSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArbitrationResponse {
    pub summary: String,
    #[serde(default)]
    pub cost: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMPARE_JSON: &str = r#"{
        "prompt": "hello",
        "responses": [
            {"model":"gpt-4","model_name":"GPT-4","response":"Hi!","input_tokens":3,"output_tokens":5,"cost":0.0021},
            {"model":"claude","model_name":"Claude","response":"Hello.","input_tokens":3,"output_tokens":4,"cost":0.0013}
        ],
        "total_cost": 0.0034
    }"#;

    #[test]
    fn total_cost_equals_sum_of_entries() {
        let resp: CompareResponse = serde_json::from_str(COMPARE_JSON).unwrap();
        assert_eq!(resp.responses.len(), 2);
        assert!((resp.summed_cost() - resp.total_cost).abs() < 1e-9);
    }

    #[test]
    fn failed_entries_are_not_successful() {
        let resp: CompareResponse = serde_json::from_str(
            r#"{"prompt":"x","responses":[
                {"model":"a","model_name":"A","response":"","input_tokens":0,"output_tokens":0,"cost":0.0,"error":"timeout"},
                {"model":"b","model_name":"B","response":"ok","input_tokens":1,"output_tokens":1,"cost":0.5,"error":null}
            ],"total_cost":0.5}"#,
        )
        .unwrap();
        let ok: Vec<_> = resp.successful().map(|r| r.model.as_str()).collect();
        assert_eq!(ok, vec!["b"]);
        assert_eq!(resp.summed_cost(), 0.5);
    }

    #[test]
    fn compare_request_drops_empty_file_ids() {
        let req = CompareRequest::new(vec!["gpt-4".into(), "claude".into()], "hello".into(), vec![]);
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            serde_json::json!({ "models": ["gpt-4", "claude"], "prompt": "hello" })
        );
        let req = CompareRequest::new(vec!["a".into(), "b".into()], "p".into(), vec![1, 2]);
        assert_eq!(req.file_ids, Some(vec![1, 2]));
    }

    #[test]
    fn display_name_falls_back_to_id() {
        let r = ModelResponse {
            model: "gpt-4".into(),
            model_name: String::new(),
            response: String::new(),
            input_tokens: 0,
            output_tokens: 0,
            cost: 0.0,
            error: None,
        };
        assert_eq!(r.display_name(), "gpt-4");
    }
}
