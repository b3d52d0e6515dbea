//! Chat - View Component

use contracts::domain::a001_chat::aggregate::{ChatMessage, ChatRole, ChatSession};
use leptos::prelude::*;
use thaw::*;

use super::view_model::ChatVm;
use crate::layout::{confirm, use_modal};
use crate::shared::components::attachment_picker::AttachmentPicker;
use crate::shared::components::model_picker::ModelSelect;
use crate::shared::date_utils::format_datetime_opt;
use crate::shared::icons::icon;
use crate::system::auth::context::use_auth;

#[component]
#[allow(non_snake_case)]
pub fn ChatPage() -> impl IntoView {
    let (_, set_auth_state) = use_auth();
    let vm = ChatVm::new(use_modal(), set_auth_state);
    vm.load();

    view! {
        <div class="chat-page">
            <SessionSidebar vm=vm />
            <Conversation vm=vm />
        </div>
    }
}

#[component]
fn SessionSidebar(vm: ChatVm) -> impl IntoView {
    let models = Signal::derive(move || vm.models.get());

    view! {
        <aside class="chat-sidebar">
            <div class="chat-sidebar__new">
                <Label>"Новый чат"</Label>
                <ModelSelect options=models value=vm.new_model disabled=vm.creating />
                <Input value=vm.new_title placeholder="Название (необязательно)" />
                <Button
                    appearance=ButtonAppearance::Primary
                    disabled=vm.creating
                    on_click=move |_| vm.create_session()
                >
                    {icon("plus")}
                    " Создать"
                </Button>
            </div>

            <div class="chat-sidebar__list">
                <Show when=move || vm.state.with(|s| s.sessions.is_empty())>
                    <div class="chat-sidebar__empty">"Чатов пока нет"</div>
                </Show>
                <For
                    each=move || vm.state.with(|s| s.sessions.clone())
                    key=|s| (s.id, s.title.clone())
                    children=move |session: ChatSession| view! { <SessionItem vm=vm session=session /> }
                />
            </div>
        </aside>
    }
}

#[component]
fn SessionItem(vm: ChatVm, session: ChatSession) -> impl IntoView {
    let id = session.id;
    let is_active = move || vm.state.with(|s| s.active_id == Some(id));
    let is_renaming = move || vm.renaming_id.get() == Some(id);
    let title = session.title.clone();

    let on_delete = {
        let title = title.clone();
        move |ev: leptos::ev::MouseEvent| {
            ev.stop_propagation();
            if confirm(&format!("Удалить чат \"{}\"?", title)) {
                vm.delete_session(id);
            }
        }
    };
    let on_rename = {
        let title = title.clone();
        move |ev: leptos::ev::MouseEvent| {
            ev.stop_propagation();
            vm.start_rename(id, title.clone());
        }
    };

    view! {
        <div
            class=move || if is_active() { "chat-session chat-session--active" } else { "chat-session" }
            on:click=move |_| vm.select(id)
        >
            <Show
                when=is_renaming
                fallback=move || {
                    let title = title.clone();
                    let model = session.model.clone();
                    view! {
                        <div class="chat-session__text">
                            <div class="chat-session__title">{title}</div>
                            <div class="chat-session__model">{model}</div>
                        </div>
                    }
                }
            >
                <input
                    class="chat-session__rename"
                    prop:value=move || vm.rename_text.get()
                    on:input=move |ev| vm.rename_text.set(event_target_value(&ev))
                    on:click=|ev| ev.stop_propagation()
                    on:keydown=move |ev: web_sys::KeyboardEvent| match ev.key().as_str() {
                        "Enter" => vm.commit_rename(),
                        "Escape" => vm.cancel_rename(),
                        _ => {}
                    }
                />
            </Show>
            <div class="chat-session__actions">
                <button class="icon-btn" title="Переименовать" on:click=on_rename>
                    {icon("edit")}
                </button>
                <button class="icon-btn" title="Удалить" on:click=on_delete>
                    {icon("trash")}
                </button>
            </div>
        </div>
    }
}

#[component]
fn Conversation(vm: ChatVm) -> impl IntoView {
    let is_sending = vm.is_sending();
    let messages_ref = NodeRef::<leptos::html::Div>::new();

    // Keep the newest message in view
    Effect::new(move |_| {
        vm.state.track();
        if let Some(container) = messages_ref.get() {
            request_animation_frame(move || {
                container.set_scroll_top(container.scroll_height());
            });
        }
    });

    let header = move || {
        vm.state
            .with(|s| s.active_session().map(|session| (session.title.clone(), session.model.clone())))
            .map(|(title, model)| {
                view! {
                    <div class="chat-header">
                        <h2>{title}</h2>
                        <Badge>{model}</Badge>
                    </div>
                }
            })
    };

    let error_view = move || {
        vm.state.with(|s| s.error().map(str::to_string)).map(|e| {
            view! {
                <div class="chat-error">
                    <span>{e}</span>
                    <button class="icon-btn" on:click=move |_| vm.dismiss_error()>
                        {icon("close")}
                    </button>
                </div>
            }
        })
    };

    view! {
        <section class="chat-main">
            <Show
                when=move || vm.state.with(|s| s.active_id.is_some())
                fallback=|| view! {
                    <div class="chat-empty">"Создайте новый чат, чтобы начать разговор"</div>
                }
            >
                {header}

                <div node_ref=messages_ref class="chat-messages">
                    <Show when=move || vm.loading_messages.get()>
                        <div class="chat-messages__loading"><Spinner /></div>
                    </Show>
                    <For
                        each=move || vm.state.with(|s| s.messages.clone())
                        key=|m| m.id
                        children=|msg: ChatMessage| view! { <MessageBubble msg=msg /> }
                    />
                    <Show when=move || vm.state.with(|s| s.is_sending_in_active())>
                        <div class="chat-message chat-message--assistant chat-message--pending">
                            <Spinner />
                            " Модель отвечает..."
                        </div>
                    </Show>
                </div>

                {error_view}

                <div class="chat-input">
                    <AttachmentPicker queue=vm.pending_files disabled=is_sending />
                    <Flex style="gap: 8px; align-items: flex-end;">
                        <div style="flex: 1;">
                            <Textarea
                                value=vm.draft
                                placeholder="Введите сообщение... (Ctrl+Enter для отправки)"
                                attr:style="width: 100%; min-height: 60px; max-height: 200px; resize: vertical;"
                                disabled=is_sending
                                on:keydown=move |ev: web_sys::KeyboardEvent| {
                                    if ev.key() == "Enter" && ev.ctrl_key() {
                                        ev.prevent_default();
                                        vm.send();
                                    }
                                }
                            />
                        </div>
                        <Button
                            appearance=ButtonAppearance::Primary
                            disabled=Signal::derive(move || {
                                is_sending.get() || vm.draft.with(|d| d.trim().is_empty())
                            })
                            on_click=move |_| vm.send()
                        >
                            {icon("send")}
                            {move || if is_sending.get() { " Отправка..." } else { " Отправить" }}
                        </Button>
                    </Flex>
                </div>
            </Show>
        </section>
    }
}

#[component]
fn MessageBubble(msg: ChatMessage) -> impl IntoView {
    let class = match msg.role {
        ChatRole::User => "chat-message chat-message--user",
        ChatRole::System => "chat-message chat-message--system",
        _ => "chat-message chat-message--assistant",
    };
    let meta = message_meta(&msg);
    let attachments = msg
        .attachment_names()
        .into_iter()
        .map(|name| view! { <span class="chat-message__file">{icon("document")}" "{name.to_string()}</span> })
        .collect_view();

    view! {
        <div class=class>
            <div class="chat-message__content">{msg.content.clone()}</div>
            <div class="chat-message__files">{attachments}</div>
            <div class="chat-message__meta">{meta}</div>
        </div>
    }
}

/// "model • N токенов • time" footer line of a message.
fn message_meta(msg: &ChatMessage) -> String {
    let mut parts = Vec::new();
    if !msg.is_user() {
        if let Some(model) = &msg.model {
            parts.push(model.clone());
        }
    }
    if let Some(tokens) = msg.tokens {
        parts.push(format!("{} токенов", tokens));
    }
    if msg.created_at.is_some() {
        parts.push(format_datetime_opt(&msg.created_at));
    }
    parts.join(" • ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meta_for_assistant_reply() {
        let msg = ChatMessage {
            id: 2,
            session_id: Some(1),
            role: ChatRole::Assistant,
            content: "ответ".into(),
            model: Some("gpt-4".into()),
            tokens: Some(42),
            attachments: None,
            created_at: None,
        };
        assert_eq!(message_meta(&msg), "gpt-4 • 42 токенов");
    }

    #[test]
    fn meta_skips_model_for_user_messages() {
        let msg = ChatMessage {
            id: 1,
            session_id: Some(1),
            role: ChatRole::User,
            content: "вопрос".into(),
            model: Some("gpt-4".into()),
            tokens: None,
            attachments: None,
            created_at: None,
        };
        assert_eq!(message_meta(&msg), "");
    }
}
