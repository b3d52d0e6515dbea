//! Chat - View Model

use leptos::prelude::*;
use leptos::task::spawn_local;
use uuid::Uuid;

use contracts::domain::a001_chat::aggregate::ChatMessage;

use super::model;
use crate::domain::a001_chat::ui::state::{ConversationState, SendRejected, SendTicket};
use crate::layout::ModalService;
use crate::shared::attachments::upload_queue;
use crate::shared::components::attachment_picker::{new_file_queue, FileQueue};
use crate::shared::components::model_picker::ModelOption;
use crate::shared::http::ApiResult;
use crate::system::auth::context::{refresh_user, AuthState};

#[derive(Clone, Copy)]
pub struct ChatVm {
    pub state: RwSignal<ConversationState>,
    pub models: RwSignal<Vec<ModelOption>>,
    pub draft: RwSignal<String>,
    pub pending_files: FileQueue,
    pub loading_messages: RwSignal<bool>,
    // New chat form
    pub new_model: RwSignal<String>,
    pub new_title: RwSignal<String>,
    pub creating: RwSignal<bool>,
    // Inline rename
    pub renaming_id: RwSignal<Option<i64>>,
    pub rename_text: RwSignal<String>,
    modal: ModalService,
    set_auth_state: WriteSignal<AuthState>,
}

impl ChatVm {
    pub fn new(modal: ModalService, set_auth_state: WriteSignal<AuthState>) -> Self {
        Self {
            state: RwSignal::new(ConversationState::default()),
            models: RwSignal::new(Vec::new()),
            draft: RwSignal::new(String::new()),
            pending_files: new_file_queue(),
            loading_messages: RwSignal::new(false),
            new_model: RwSignal::new(String::new()),
            new_title: RwSignal::new(String::new()),
            creating: RwSignal::new(false),
            renaming_id: RwSignal::new(None),
            rename_text: RwSignal::new(String::new()),
            modal,
            set_auth_state,
        }
    }

    pub fn is_sending(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.is_sending()))
    }

    /// Initial load: models for the new-chat form, then the session list.
    pub fn load(self) {
        spawn_local(async move {
            match model::fetch_models().await {
                Ok(models) => {
                    if self.new_model.get_untracked().is_empty() {
                        if let Some(first) = models.first() {
                            self.new_model.set(first.id.clone());
                        }
                    }
                    self.models
                        .set(models.into_iter().map(ModelOption::from).collect());
                }
                Err(e) => self.modal.show_error(format!("Не удалось загрузить модели: {}", e)),
            }
            self.reload_sessions().await;
        });
    }

    async fn reload_sessions(self) {
        match model::fetch_sessions().await {
            Ok(sessions) => {
                let changed = self.state.try_update(|s| s.set_sessions(sessions)).flatten();
                if let Some(id) = changed {
                    self.load_messages(id).await;
                }
            }
            Err(e) => self.modal.show_error(format!("Не удалось загрузить чаты: {}", e)),
        }
    }

    async fn load_messages(self, session_id: i64) {
        self.loading_messages.set(true);
        match model::fetch_messages(session_id).await {
            Ok(messages) => {
                self.state.update(|s| {
                    s.apply_messages(session_id, messages);
                });
            }
            Err(e) => self.modal.show_error(format!("Не удалось загрузить сообщения: {}", e)),
        }
        self.loading_messages.set(false);
    }

    pub fn select(self, session_id: i64) {
        let changed = self.state.try_update(|s| s.select(session_id)).unwrap_or(false);
        if changed {
            self.renaming_id.set(None);
            spawn_local(self.load_messages(session_id));
        }
    }

    pub fn create_session(self) {
        let model_id = self.new_model.get_untracked();
        if model_id.is_empty() {
            self.modal.show_error("Выберите модель");
            return;
        }
        let title = Some(self.new_title.get_untracked().trim().to_string()).filter(|t| !t.is_empty());

        self.creating.set(true);
        spawn_local(async move {
            match model::create_session(model_id, title).await {
                Ok(session) => {
                    log::info!("Created chat session {}", session.id);
                    self.new_title.set(String::new());
                    self.reload_sessions().await;
                    self.select(session.id);
                }
                Err(e) => self.modal.show_error(format!("Не удалось создать чат: {}", e)),
            }
            self.creating.set(false);
        });
    }

    pub fn start_rename(self, session_id: i64, current_title: String) {
        self.rename_text.set(current_title);
        self.renaming_id.set(Some(session_id));
    }

    pub fn cancel_rename(self) {
        self.renaming_id.set(None);
    }

    pub fn commit_rename(self) {
        let Some(session_id) = self.renaming_id.get_untracked() else {
            return;
        };
        let title = self.rename_text.get_untracked().trim().to_string();
        if title.is_empty() {
            self.modal.show_error("Название не может быть пустым");
            return;
        }
        self.renaming_id.set(None);
        spawn_local(async move {
            match model::rename_session(session_id, title).await {
                Ok(_) => self.reload_sessions().await,
                Err(e) => self.modal.show_error(format!("Не удалось переименовать чат: {}", e)),
            }
        });
    }

    pub fn delete_session(self, session_id: i64) {
        spawn_local(async move {
            match model::delete_session(session_id).await {
                Ok(()) => {
                    log::info!("Deleted chat session {}", session_id);
                    self.reload_sessions().await;
                }
                Err(e) => self.modal.show_error(format!("Не удалось удалить чат: {}", e)),
            }
        });
    }

    /// Upload queued files, send, then show the server's message list.
    pub fn send(self) {
        let draft = self.draft.get_untracked();
        let ticket = match self.state.try_update(|s| s.begin_send(&draft)) {
            Some(Ok(ticket)) => ticket,
            Some(Err(SendRejected::AlreadySending)) | None => return,
            Some(Err(rejected)) => {
                self.modal.show_info(rejected.message());
                return;
            }
        };
        spawn_local(async move {
            let session_id = ticket.session_id;
            let sent = ticket.content.clone();
            match submit(ticket, self.pending_files).await {
                Ok((messages, consumed)) => {
                    self.state.update(|s| s.finish_send(session_id, messages));
                    // Keep anything typed or picked while the send was running
                    if self.draft.with_untracked(|d| d.trim() == sent) {
                        self.draft.set(String::new());
                    }
                    self.pending_files.update(|q| q.remove_all(&consumed));
                    // Usage was charged; pick up the new balance
                    refresh_user(self.set_auth_state).await;
                }
                Err(e) => self.state.update(|s| s.fail_send(session_id, e.to_string())),
            }
        });
    }

    pub fn dismiss_error(self) {
        self.state.update(|s| s.dismiss_error());
    }
}

async fn submit(ticket: SendTicket, queue: FileQueue) -> ApiResult<(Vec<ChatMessage>, Vec<Uuid>)> {
    let (keys, file_ids): (Vec<Uuid>, Vec<i64>) = upload_queue(queue).await?.into_iter().unzip();
    model::send_message(ticket.session_id, ticket.content, &file_ids).await?;
    let messages = model::fetch_messages(ticket.session_id).await?;
    Ok((messages, keys))
}
