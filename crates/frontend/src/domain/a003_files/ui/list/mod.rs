use contracts::domain::a003_files::aggregate::{format_file_size, StoredFile};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a003_files::api;
use crate::layout::{confirm, use_modal};
use crate::shared::components::page_header::PageHeader;
use crate::shared::date_utils::format_datetime_opt;
use crate::shared::icons::icon;

/// "My files": everything the current user has uploaded as attachments.
#[component]
pub fn FilesListPage() -> impl IntoView {
    let modal = use_modal();
    let files: RwSignal<Vec<StoredFile>> = RwSignal::new(Vec::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (loading, set_loading) = signal(false);

    let load_data = move || {
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            match api::fetch_files().await {
                Ok(data) => files.set(data),
                Err(e) => set_error.set(Some(format!("Не удалось загрузить файлы: {}", e))),
            }
            set_loading.set(false);
        });
    };

    load_data();

    let delete_file = move |file: StoredFile| {
        if !confirm(&format!("Удалить файл \"{}\"?", file.filename)) {
            return;
        }
        spawn_local(async move {
            match api::delete_file(file.id).await {
                Ok(()) => {
                    log::info!("Deleted file {}", file.id);
                    load_data();
                }
                Err(e) => modal.show_error(format!("Не удалось удалить файл: {}", e)),
            }
        });
    };

    view! {
        <div class="page">
            <PageHeader title="Мои файлы" subtitle="Файлы, прикреплённые к сообщениям и запросам">
                <Badge>{move || files.with(|f| f.len().to_string())}</Badge>
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| load_data()
                    disabled=Signal::derive(move || loading.get())
                >
                    {icon("refresh")}
                    {move || if loading.get() { " Загрузка..." } else { " Обновить" }}
                </Button>
            </PageHeader>

            <div class="page__content">
                {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

                <Show when=move || files.with(|f| f.is_empty()) && !loading.get()>
                    <div class="empty-state">"Файлов пока нет"</div>
                </Show>

                <Table attr:style="width: 100%;">
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCell>"Имя файла"</TableHeaderCell>
                            <TableHeaderCell>"Тип"</TableHeaderCell>
                            <TableHeaderCell>"Размер"</TableHeaderCell>
                            <TableHeaderCell>"Текст"</TableHeaderCell>
                            <TableHeaderCell>"Загружен"</TableHeaderCell>
                            <TableHeaderCell>""</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        <For
                            each=move || files.get()
                            key=|f| f.id
                            children=move |file: StoredFile| {
                                let for_delete = file.clone();
                                view! {
                                    <TableRow>
                                        <TableCell>
                                            <TableCellLayout truncate=true>
                                                {icon("document")}
                                                <span style="font-weight: 500;">" "{file.filename.clone()}</span>
                                            </TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>
                                                {file.content_type.clone().unwrap_or_else(|| "-".to_string())}
                                            </TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>{format_file_size(file.file_size)}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>
                                                {if file.has_text {
                                                    view! { <span class="badge badge--success">"Извлечён"</span> }.into_any()
                                                } else {
                                                    view! { <span class="badge badge--neutral">"Нет"</span> }.into_any()
                                                }}
                                            </TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>{format_datetime_opt(&file.created_at)}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <Button
                                                appearance=ButtonAppearance::Subtle
                                                on_click=move |_| delete_file(for_delete.clone())
                                                attr:title="Удалить"
                                            >
                                                {icon("trash")}
                                            </Button>
                                        </TableCell>
                                    </TableRow>
                                }
                            }
                        />
                    </TableBody>
                </Table>
            </div>
        </div>
    }
}
