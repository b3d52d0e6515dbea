//! Arena rules: bounded model selection, compare preconditions and
//! arbitration eligibility.

use contracts::domain::a002_arena::aggregate::{
    ArbitrationRequest, ArbitrationResponse, CompareRequest, CompareResponse, ResponseSummary,
};

use crate::shared::components::model_picker::{ModelOption, ModelSelection};

pub const MAX_MODELS: usize = 5;
pub const MIN_MODELS: usize = 2;
pub const MIN_ARBITRATION_RESPONSES: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArenaRejected {
    TooManyModels,
    NotEnoughModels,
    EmptyPrompt,
    Busy,
    NotEnoughResults,
}

impl ArenaRejected {
    pub fn message(self) -> String {
        match self {
            ArenaRejected::TooManyModels => format!("Максимум {} моделей", MAX_MODELS),
            ArenaRejected::NotEnoughModels => format!("Выберите минимум {} модели", MIN_MODELS),
            ArenaRejected::EmptyPrompt => "Введите запрос".to_string(),
            ArenaRejected::Busy => "Запрос уже выполняется".to_string(),
            ArenaRejected::NotEnoughResults => format!(
                "Нужно минимум {} успешных ответа для арбитража",
                MIN_ARBITRATION_RESPONSES
            ),
        }
    }
}

/// Models and prompt frozen at submit time; file ids are added after upload.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparePlan {
    pub models: Vec<String>,
    pub prompt: String,
}

impl ComparePlan {
    pub fn into_request(self, file_ids: Vec<i64>) -> CompareRequest {
        CompareRequest::new(self.models, self.prompt, file_ids)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArenaState {
    pub selection: ModelSelection,
    pub result: Option<CompareResponse>,
    pub summary: Option<ArbitrationResponse>,
    pub comparing: bool,
    pub arbitrating: bool,
    pub error: Option<String>,
}

impl Default for ArenaState {
    fn default() -> Self {
        Self {
            selection: ModelSelection::with_cap(MAX_MODELS),
            result: None,
            summary: None,
            comparing: false,
            arbitrating: false,
            error: None,
        }
    }
}

impl ArenaState {
    pub fn is_busy(&self) -> bool {
        self.comparing || self.arbitrating
    }

    pub fn toggle_model(&mut self, id: &str) -> Result<(), ArenaRejected> {
        self.selection
            .toggle(id)
            .map_err(|_| ArenaRejected::TooManyModels)
    }

    pub fn retain_available(&mut self, options: &[ModelOption]) {
        self.selection.retain_available(options);
    }

    /// "2 / 5"
    pub fn selected_label(&self) -> String {
        format!("{} / {}", self.selection.len(), self.selection.cap())
    }

    pub fn can_compare(&self, prompt: &str) -> bool {
        !self.is_busy() && self.selection.len() >= MIN_MODELS && !prompt.trim().is_empty()
    }

    pub fn begin_compare(&mut self, prompt: &str) -> Result<ComparePlan, ArenaRejected> {
        if self.is_busy() {
            return Err(ArenaRejected::Busy);
        }
        if self.selection.len() < MIN_MODELS {
            return Err(ArenaRejected::NotEnoughModels);
        }
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(ArenaRejected::EmptyPrompt);
        }
        self.comparing = true;
        self.result = None;
        self.summary = None;
        self.error = None;
        Ok(ComparePlan {
            models: self.selection.ids().to_vec(),
            prompt: prompt.to_string(),
        })
    }

    pub fn finish_compare(&mut self, response: CompareResponse) {
        self.comparing = false;
        self.result = Some(response);
    }

    pub fn fail_compare(&mut self, message: impl Into<String>) {
        self.comparing = false;
        self.error = Some(message.into());
    }

    pub fn successful_count(&self) -> usize {
        self.result
            .as_ref()
            .map(|r| r.successful().count())
            .unwrap_or(0)
    }

    pub fn can_arbitrate(&self) -> bool {
        !self.is_busy() && self.successful_count() >= MIN_ARBITRATION_RESPONSES
    }

    pub fn total_cost(&self) -> f64 {
        self.result.as_ref().map(|r| r.total_cost).unwrap_or(0.0)
    }

    pub fn begin_arbitration(&mut self) -> Result<ArbitrationRequest, ArenaRejected> {
        if self.is_busy() {
            return Err(ArenaRejected::Busy);
        }
        if self.successful_count() < MIN_ARBITRATION_RESPONSES {
            return Err(ArenaRejected::NotEnoughResults);
        }
        let result = self.result.as_ref().ok_or(ArenaRejected::NotEnoughResults)?;
        let request = ArbitrationRequest {
            prompt: result.prompt.clone(),
            responses: result.successful().map(ResponseSummary::from).collect(),
        };
        self.arbitrating = true;
        self.summary = None;
        self.error = None;
        Ok(request)
    }

    pub fn finish_arbitration(&mut self, response: ArbitrationResponse) {
        self.arbitrating = false;
        self.summary = Some(response);
    }

    pub fn fail_arbitration(&mut self, message: impl Into<String>) {
        self.arbitrating = false;
        self.error = Some(message.into());
    }

    pub fn clear_results(&mut self) {
        self.result = None;
        self.summary = None;
        self.error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a002_arena::aggregate::ModelResponse;

    fn reply(model: &str, cost: f64, error: Option<&str>) -> ModelResponse {
        ModelResponse {
            model: model.into(),
            model_name: model.to_uppercase(),
            response: if error.is_some() { String::new() } else { format!("{} says hi", model) },
            input_tokens: 3,
            output_tokens: 5,
            cost,
            error: error.map(str::to_string),
        }
    }

    fn compare_response(prompt: &str, responses: Vec<ModelResponse>) -> CompareResponse {
        let total_cost = responses.iter().map(|r| r.cost).sum();
        CompareResponse {
            prompt: prompt.into(),
            responses,
            total_cost,
        }
    }

    fn selected(ids: &[&str]) -> ArenaState {
        let mut state = ArenaState::default();
        for id in ids {
            state.toggle_model(id).unwrap();
        }
        state
    }

    #[test]
    fn sixth_model_is_rejected_and_selection_unchanged() {
        let mut state = selected(&["a", "b", "c", "d", "e"]);
        assert_eq!(state.toggle_model("f"), Err(ArenaRejected::TooManyModels));
        assert_eq!(state.selection.ids(), &["a", "b", "c", "d", "e"]);
        assert_eq!(state.selected_label(), "5 / 5");
        assert_eq!(ArenaRejected::TooManyModels.message(), "Максимум 5 моделей");
    }

    #[test]
    fn deselecting_frees_a_slot() {
        let mut state = selected(&["a", "b", "c", "d", "e"]);
        state.toggle_model("c").unwrap();
        assert!(state.toggle_model("f").is_ok());
        assert!(state.selection.contains("f"));
    }

    #[test]
    fn compare_needs_two_models() {
        let mut state = selected(&["gpt-4"]);
        assert_eq!(state.begin_compare("hello"), Err(ArenaRejected::NotEnoughModels));
        assert!(!state.comparing);
        assert!(!state.can_compare("hello"));
    }

    #[test]
    fn compare_needs_prompt() {
        let mut state = selected(&["gpt-4", "claude"]);
        assert_eq!(state.begin_compare("  \n"), Err(ArenaRejected::EmptyPrompt));
        assert!(state.can_compare("hello"));
    }

    #[test]
    fn compare_round_trip_keeps_cost_total() {
        let mut state = selected(&["gpt-4", "claude"]);
        let plan = state.begin_compare(" hello ").unwrap();
        assert_eq!(plan.models, vec!["gpt-4", "claude"]);
        assert!(state.is_busy());
        assert_eq!(state.begin_compare("hello"), Err(ArenaRejected::Busy));

        let request = plan.into_request(vec![]);
        assert_eq!(request.prompt, "hello");
        assert_eq!(request.file_ids, None);

        state.finish_compare(compare_response(
            "hello",
            vec![reply("gpt-4", 0.0021, None), reply("claude", 0.0013, None)],
        ));
        let result = state.result.as_ref().unwrap();
        assert_eq!(result.responses.len(), 2);
        assert!((state.total_cost() - result.summed_cost()).abs() < 1e-12);
    }

    #[test]
    fn new_compare_clears_previous_results_and_summary() {
        let mut state = selected(&["a", "b"]);
        state.begin_compare("x").unwrap();
        state.finish_compare(compare_response("x", vec![reply("a", 1.0, None), reply("b", 1.0, None)]));
        state.begin_arbitration().unwrap();
        state.finish_arbitration(ArbitrationResponse {
            summary: "A лучше".into(),
            cost: 0.1,
        });

        state.begin_compare("y").unwrap();
        assert!(state.result.is_none());
        assert!(state.summary.is_none());
    }

    #[test]
    fn arbitration_needs_two_successful_results() {
        let mut state = selected(&["a", "b"]);
        state.begin_compare("x").unwrap();
        state.finish_compare(compare_response(
            "x",
            vec![reply("a", 0.5, None), reply("b", 0.0, Some("timeout"))],
        ));
        assert!(!state.can_arbitrate());
        assert_eq!(state.begin_arbitration(), Err(ArenaRejected::NotEnoughResults));
    }

    #[test]
    fn arbitration_sends_only_successful_answers() {
        let mut state = selected(&["a", "b", "c"]);
        state.begin_compare("x").unwrap();
        state.finish_compare(compare_response(
            "x",
            vec![
                reply("a", 0.5, None),
                reply("b", 0.0, Some("boom")),
                reply("c", 0.2, None),
            ],
        ));
        let request = state.begin_arbitration().unwrap();
        let models: Vec<_> = request.responses.iter().map(|r| r.model.as_str()).collect();
        assert_eq!(models, vec!["a", "c"]);
        assert_eq!(request.prompt, "x");
        assert!(state.arbitrating);
    }

    #[test]
    fn failures_release_busy_flags() {
        let mut state = selected(&["a", "b"]);
        state.begin_compare("x").unwrap();
        state.fail_compare("Недостаточно средств на балансе");
        assert!(!state.is_busy());
        assert_eq!(state.error.as_deref(), Some("Недостаточно средств на балансе"));
    }

    #[test]
    fn clear_results_resets_summary() {
        let mut state = selected(&["a", "b"]);
        state.begin_compare("x").unwrap();
        state.finish_compare(compare_response("x", vec![reply("a", 1.0, None), reply("b", 2.0, None)]));
        state.clear_results();
        assert!(state.result.is_none());
        assert!(state.summary.is_none());
        assert_eq!(state.total_cost(), 0.0);
        assert_eq!(state.selection.len(), 2);
    }
}
