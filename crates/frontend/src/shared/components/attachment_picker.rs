use leptos::prelude::*;

use crate::shared::attachments::{take_input_files, AttachmentQueue, ACCEPTED_FILE_TYPES};
use crate::shared::icons::icon;
use contracts::domain::a003_files::aggregate::format_file_size;

/// Queue held by a screen for files waiting for its next submit.
pub type FileQueue = RwSignal<AttachmentQueue<web_sys::File>, LocalStorage>;

pub fn new_file_queue() -> FileQueue {
    RwSignal::new_local(AttachmentQueue::default())
}

/// Paperclip button plus the list of queued files with per-file remove.
#[component]
pub fn AttachmentPicker(queue: FileQueue, #[prop(into)] disabled: Signal<bool>) -> impl IntoView {
    let input_ref = NodeRef::<leptos::html::Input>::new();

    let on_change = move |_| {
        if let Some(input) = input_ref.get() {
            queue.update(|q| take_input_files(&input, q));
        }
    };

    let open_dialog = move |_| {
        if let Some(input) = input_ref.get() {
            input.click();
        }
    };

    view! {
        <div class="attachments">
            <input
                node_ref=input_ref
                type="file"
                multiple=true
                accept=ACCEPTED_FILE_TYPES
                style="display: none;"
                on:change=on_change
            />
            <button
                type="button"
                class="attachments__button"
                title="Прикрепить файлы"
                disabled=move || disabled.get()
                on:click=open_dialog
            >
                {icon("attach")}
            </button>
            <div class="attachments__list">
                <For
                    each=move || queue.with(|q| q.entries())
                    key=|entry| entry.key
                    children=move |entry| {
                        let key = entry.key;
                        view! {
                            <span class="attachments__chip">
                                {icon("document")}
                                {format!(" {} ({})", entry.name, format_file_size(entry.size as i64))}
                                <button
                                    type="button"
                                    class="attachments__remove"
                                    disabled=move || disabled.get()
                                    on:click=move |_| queue.update(|q| q.remove(key))
                                >
                                    {icon("close")}
                                </button>
                            </span>
                        }
                    }
                />
            </div>
        </div>
    }
}
