use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

const INFO_TIMEOUT_MS: u32 = 4_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

/// Сервис всплывающих уведомлений (ошибки и информационные сообщения)
#[derive(Clone, Copy)]
pub struct ModalService {
    notice: RwSignal<Option<Notice>>,
}

impl ModalService {
    pub fn new() -> Self {
        Self {
            notice: RwSignal::new(None),
        }
    }

    pub fn show_error(&self, message: impl Into<String>) {
        let message = message.into();
        log::warn!("{}", message);
        self.notice.set(Some(Notice {
            kind: NoticeKind::Error,
            message,
        }));
    }

    /// Informational notices close themselves after a few seconds.
    pub fn show_info(&self, message: impl Into<String>) {
        let notice = Notice {
            kind: NoticeKind::Info,
            message: message.into(),
        };
        self.notice.set(Some(notice.clone()));

        let slot = self.notice;
        spawn_local(async move {
            TimeoutFuture::new(INFO_TIMEOUT_MS).await;
            // Leave a newer notice alone
            if slot.with_untracked(|n| n.as_ref() == Some(&notice)) {
                slot.set(None);
            }
        });
    }

    pub fn hide(&self) {
        self.notice.set(None);
    }
}

impl Default for ModalService {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_modal() -> ModalService {
    use_context::<ModalService>().unwrap_or_default()
}

/// Блокирующее подтверждение через `window.confirm`. Без окна считаем отказом.
pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

/// Окно уведомления, закрывается кликом по подложке или кнопке
#[component]
pub fn NoticeModal() -> impl IntoView {
    let modal = use_modal();

    move || {
        modal.notice.get().map(|notice| {
            let (class, title) = match notice.kind {
                NoticeKind::Error => ("modal-content modal-content--error", "Ошибка"),
                NoticeKind::Info => ("modal-content", "Сообщение"),
            };
            view! {
                <div class="modal-overlay" on:click=move |_| modal.hide()>
                    <div class=class on:click=|e| e.stop_propagation()>
                        <h3>{title}</h3>
                        <p>{notice.message}</p>
                        <thaw::Button on_click=move |_| modal.hide()>"OK"</thaw::Button>
                    </div>
                </div>
            }
        })
    }
}
