pub mod state;

use contracts::system::users::{UpdateUserDto, User};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::details::{BalanceForm, CreateUserForm};
use crate::layout::{confirm, use_modal};
use crate::shared::date_utils::format_datetime_opt;
use crate::shared::icons::icon;
use crate::shared::number_format::format_usd;
use crate::system::auth::context::use_auth;
use crate::system::users::api;
use state::{can_delete, filter_users};

/// Roster table. The owner loads `users` and reloads after `on_changed`.
#[component]
pub fn UsersList(
    users: RwSignal<Vec<User>>,
    #[prop(into)] loading: Signal<bool>,
    on_changed: Callback<()>,
) -> impl IntoView {
    let modal = use_modal();
    let (auth_state, _) = use_auth();
    let current_user_id = Signal::derive(move || auth_state.with(|s| s.user_id()));

    let search = RwSignal::new(String::new());
    let (show_create_form, set_show_create_form) = signal(false);
    let balance_user: RwSignal<Option<User>> = RwSignal::new(None);

    let visible = move || users.with(|list| filter_users(list, &search.get()));

    let toggle_active = move |user: User| {
        let dto = UpdateUserDto::set_active(!user.is_active);
        spawn_local(async move {
            match api::update_user(user.id, &dto).await {
                Ok(_) => on_changed.run(()),
                Err(e) => modal.show_error(format!("Ошибка при обновлении пользователя: {}", e)),
            }
        });
    };

    let delete_user = move |user: User| {
        if !can_delete(&user, current_user_id.get_untracked()) {
            return;
        }
        if !confirm("Вы уверены, что хотите удалить этого пользователя?") {
            return;
        }
        spawn_local(async move {
            match api::delete_user(user.id).await {
                Ok(()) => {
                    log::info!("Deleted user {}", user.username);
                    on_changed.run(());
                }
                Err(e) => modal.show_error(format!("Ошибка при удалении пользователя: {}", e)),
            }
        });
    };

    view! {
        <div class="users-list">
            <div class="page__header">
                <div class="page__header-left">
                    <h2 class="page__title">"Пользователи"</h2>
                    <Badge>{move || users.with(|u| u.len().to_string())}</Badge>
                </div>
                <div class="page__header-right">
                    <div style="max-width: 280px;">
                        <Input value=search placeholder="Логин или Email..." />
                    </div>
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| set_show_create_form.set(true)
                    >
                        {icon("plus")}
                        " Новый"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| on_changed.run(())
                        disabled=loading
                    >
                        {icon("refresh")}
                        {move || if loading.get() { " Загрузка..." } else { " Обновить" }}
                    </Button>
                </div>
            </div>

            <Table attr:style="width: 100%;">
                <TableHeader>
                    <TableRow>
                        <TableHeaderCell>"Логин"</TableHeaderCell>
                        <TableHeaderCell>"Email"</TableHeaderCell>
                        <TableHeaderCell>"Роль"</TableHeaderCell>
                        <TableHeaderCell>"Статус"</TableHeaderCell>
                        <TableHeaderCell>"Баланс"</TableHeaderCell>
                        <TableHeaderCell>"Создан"</TableHeaderCell>
                        <TableHeaderCell>"Действия"</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    <For
                        each=visible
                        key=|u| (u.id, u.is_active, u.balance.to_bits())
                        children=move |user: User| {
                            let deletable = can_delete(&user, current_user_id.get_untracked());
                            let for_balance = user.clone();
                            let for_toggle = user.clone();
                            let for_delete = user.clone();
                            view! {
                                <TableRow>
                                    <TableCell>
                                        <TableCellLayout truncate=true>
                                            <span style="font-weight: 500;">{user.username.clone()}</span>
                                        </TableCellLayout>
                                    </TableCell>
                                    <TableCell>
                                        <TableCellLayout truncate=true>
                                            {user.email.clone().unwrap_or_default()}
                                        </TableCellLayout>
                                    </TableCell>
                                    <TableCell>
                                        <TableCellLayout>
                                            {if user.is_admin {
                                                view! { <span class="badge badge--warning">"Админ"</span> }.into_any()
                                            } else {
                                                view! { <span class="badge badge--neutral">"Пользователь"</span> }.into_any()
                                            }}
                                        </TableCellLayout>
                                    </TableCell>
                                    <TableCell>
                                        <TableCellLayout>
                                            {if user.is_active {
                                                view! { <span class="badge badge--success">"Активен"</span> }.into_any()
                                            } else {
                                                view! { <span class="badge badge--error">"Заблок."</span> }.into_any()
                                            }}
                                        </TableCellLayout>
                                    </TableCell>
                                    <TableCell>
                                        <TableCellLayout>{format_usd(user.balance)}</TableCellLayout>
                                    </TableCell>
                                    <TableCell>
                                        <TableCellLayout>{format_datetime_opt(&user.created_at)}</TableCellLayout>
                                    </TableCell>
                                    <TableCell>
                                        <Button
                                            appearance=ButtonAppearance::Subtle
                                            on_click=move |_| balance_user.set(Some(for_balance.clone()))
                                            attr:title="Изменить баланс"
                                        >
                                            {icon("wallet")}
                                        </Button>
                                        <Button
                                            appearance=ButtonAppearance::Subtle
                                            on_click=move |_| toggle_active(for_toggle.clone())
                                            attr:title=if user.is_active { "Заблокировать" } else { "Активировать" }
                                        >
                                            {icon("shield")}
                                        </Button>
                                        <Button
                                            appearance=ButtonAppearance::Subtle
                                            disabled=!deletable
                                            on_click=move |_| delete_user(for_delete.clone())
                                            attr:title=if deletable { "Удалить" } else { "Нельзя удалить себя" }
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

            {move || show_create_form.get().then(|| view! {
                <CreateUserForm
                    on_close=Callback::new(move |_| set_show_create_form.set(false))
                    on_created=Callback::new(move |_| {
                        set_show_create_form.set(false);
                        on_changed.run(());
                    })
                />
            })}

            {move || balance_user.get().map(|user| view! {
                <BalanceForm
                    user=user
                    on_close=Callback::new(move |_| balance_user.set(None))
                    on_saved=Callback::new(move |_| {
                        balance_user.set(None);
                        on_changed.run(());
                    })
                />
            })}
        </div>
    }
}
