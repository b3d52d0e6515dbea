//! Arena - View Model

use contracts::domain::a002_arena::aggregate::CompareResponse;
use leptos::prelude::*;
use leptos::task::spawn_local;
use uuid::Uuid;

use super::model;
use crate::domain::a002_arena::ui::state::{ArenaState, ComparePlan};
use crate::layout::ModalService;
use crate::shared::attachments::upload_queue;
use crate::shared::components::attachment_picker::{new_file_queue, FileQueue};
use crate::shared::components::model_picker::ModelOption;
use crate::shared::http::ApiResult;
use crate::system::auth::context::{refresh_user, AuthState};

#[derive(Clone, Copy)]
pub struct ArenaVm {
    pub state: RwSignal<ArenaState>,
    pub models: RwSignal<Vec<ModelOption>>,
    pub prompt: RwSignal<String>,
    pub pending_files: FileQueue,
    modal: ModalService,
    set_auth_state: WriteSignal<AuthState>,
}

impl ArenaVm {
    pub fn new(modal: ModalService, set_auth_state: WriteSignal<AuthState>) -> Self {
        Self {
            state: RwSignal::new(ArenaState::default()),
            models: RwSignal::new(Vec::new()),
            prompt: RwSignal::new(String::new()),
            pending_files: new_file_queue(),
            modal,
            set_auth_state,
        }
    }

    pub fn load(self) {
        spawn_local(async move {
            match model::fetch_models().await {
                Ok(models) => {
                    let options: Vec<ModelOption> = models.into_iter().map(ModelOption::from).collect();
                    self.state.update(|s| s.retain_available(&options));
                    self.models.set(options);
                }
                Err(e) => self.modal.show_error(format!("Не удалось загрузить модели: {}", e)),
            }
        });
    }

    pub fn toggle(self, id: String) {
        if let Some(Err(rejected)) = self.state.try_update(|s| s.toggle_model(&id)) {
            self.modal.show_info(rejected.message());
        }
    }

    pub fn selected_ids(self) -> Signal<Vec<String>> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.selection.ids().to_vec()))
    }

    pub fn compare(self) {
        let prompt = self.prompt.get_untracked();
        let plan = match self.state.try_update(|s| s.begin_compare(&prompt)) {
            Some(Ok(plan)) => plan,
            Some(Err(rejected)) => {
                self.modal.show_info(rejected.message());
                return;
            }
            None => return,
        };
        log::info!("Comparing {} models", plan.models.len());

        spawn_local(async move {
            match run_compare(plan, self.pending_files).await {
                Ok((response, consumed)) => {
                    self.state.update(|s| s.finish_compare(response));
                    self.pending_files.update(|q| q.remove_all(&consumed));
                    refresh_user(self.set_auth_state).await;
                }
                Err(e) => self.state.update(|s| s.fail_compare(e.to_string())),
            }
        });
    }

    pub fn arbitrate(self) {
        let request = match self.state.try_update(|s| s.begin_arbitration()) {
            Some(Ok(request)) => request,
            Some(Err(rejected)) => {
                self.modal.show_info(rejected.message());
                return;
            }
            None => return,
        };

        spawn_local(async move {
            match model::summarize(&request).await {
                Ok(response) => {
                    self.state.update(|s| s.finish_arbitration(response));
                    refresh_user(self.set_auth_state).await;
                }
                Err(e) => self.state.update(|s| s.fail_arbitration(e.to_string())),
            }
        });
    }

    pub fn clear_results(self) {
        self.state.update(|s| s.clear_results());
    }
}

async fn run_compare(plan: ComparePlan, queue: FileQueue) -> ApiResult<(CompareResponse, Vec<Uuid>)> {
    let (keys, file_ids): (Vec<Uuid>, Vec<i64>) = upload_queue(queue).await?.into_iter().unzip();
    let response = model::compare(&plan.into_request(file_ids)).await?;
    Ok((response, keys))
}
