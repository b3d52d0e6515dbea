use contracts::system::users::User;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::list::state::{parse_balance_delta, NewUserForm, DEFAULT_BALANCE_DESCRIPTION};
use crate::shared::icons::icon;
use crate::shared::number_format::{format_signed_usd, format_usd};
use crate::system::users::api;

#[component]
pub fn CreateUserForm(on_close: Callback<()>, on_created: Callback<()>) -> impl IntoView {
    let username = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let is_admin = RwSignal::new(false);
    let (error, set_error) = signal::<Option<String>>(None);
    let (saving, set_saving) = signal(false);

    let on_save = move |_| {
        let form = NewUserForm {
            username: username.get_untracked(),
            email: email.get_untracked(),
            password: password.get_untracked(),
            is_admin: is_admin.get_untracked(),
        };
        let dto = match form.validate() {
            Ok(dto) => dto,
            Err(e) => {
                set_error.set(Some(e));
                return;
            }
        };

        set_saving.set(true);
        set_error.set(None);
        spawn_local(async move {
            match api::create_user(&dto).await {
                Ok(user) => {
                    log::info!("Created user {}", user.username);
                    on_created.run(());
                }
                Err(e) => {
                    set_error.set(Some(format!("Ошибка при создании пользователя: {}", e)));
                    set_saving.set(false);
                }
            }
        });
    };

    let disabled = Signal::derive(move || saving.get());

    view! {
        <div class="modal-overlay" on:click=move |_| on_close.run(())>
            <div class="modal" on:click=move |ev| ev.stop_propagation()>
                <div class="modal-header">
                    <h2 class="modal-title">"Новый пользователь"</h2>
                    <Button appearance=ButtonAppearance::Subtle on_click=move |_| on_close.run(())>
                        {icon("x")}
                    </Button>
                </div>

                <div class="modal-body">
                    {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

                    <div class="form__group">
                        <Label>"Имя пользователя *"</Label>
                        <Input value=username disabled=disabled />
                    </div>
                    <div class="form__group">
                        <Label>"Email *"</Label>
                        <Input value=email input_type=InputType::Email disabled=disabled />
                    </div>
                    <div class="form__group">
                        <Label>"Пароль *"</Label>
                        <Input value=password input_type=InputType::Password disabled=disabled />
                    </div>
                    <div class="form__group">
                        <Checkbox checked=is_admin label="Администратор" />
                    </div>
                </div>

                <div class="modal-footer">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| on_close.run(())
                        disabled=disabled
                    >
                        "Отмена"
                    </Button>
                    <Button appearance=ButtonAppearance::Primary on_click=on_save disabled=disabled>
                        {move || if saving.get() { "Создание..." } else { "Создать" }}
                    </Button>
                </div>
            </div>
        </div>
    }
}

/// Credit or debit one user's balance.
#[component]
pub fn BalanceForm(user: User, on_close: Callback<()>, on_saved: Callback<()>) -> impl IntoView {
    let amount = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (saving, set_saving) = signal(false);
    let user_id = user.id;

    let preview = move || {
        parse_balance_delta(&amount.get(), "")
            .ok()
            .map(|q| format!("Изменение: {}", format_signed_usd(q.amount)))
    };

    let on_save = move |_| {
        let query = match parse_balance_delta(&amount.get_untracked(), &description.get_untracked()) {
            Ok(query) => query,
            Err(e) => {
                set_error.set(Some(e));
                return;
            }
        };

        set_saving.set(true);
        set_error.set(None);
        spawn_local(async move {
            match api::adjust_balance(user_id, &query).await {
                Ok(response) => {
                    log::info!("Balance of user {} is now {}", user_id, response.new_balance);
                    on_saved.run(());
                }
                Err(e) => {
                    set_error.set(Some(format!("Ошибка при изменении баланса: {}", e)));
                    set_saving.set(false);
                }
            }
        });
    };

    let disabled = Signal::derive(move || saving.get());

    view! {
        <div class="modal-overlay" on:click=move |_| on_close.run(())>
            <div class="modal" on:click=move |ev| ev.stop_propagation()>
                <div class="modal-header">
                    <h2 class="modal-title">{format!("Баланс: {}", user.username)}</h2>
                    <Button appearance=ButtonAppearance::Subtle on_click=move |_| on_close.run(())>
                        {icon("x")}
                    </Button>
                </div>

                <div class="modal-body">
                    {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

                    <p>"Текущий баланс: " <strong>{format_usd(user.balance)}</strong></p>

                    <div class="form__group">
                        <Label>"Сумма (отрицательная для списания)"</Label>
                        <Input value=amount placeholder="10.00" disabled=disabled />
                        <div class="form__hint">{preview}</div>
                    </div>
                    <div class="form__group">
                        <Label>"Описание"</Label>
                        <Input value=description placeholder=DEFAULT_BALANCE_DESCRIPTION disabled=disabled />
                    </div>
                </div>

                <div class="modal-footer">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| on_close.run(())
                        disabled=disabled
                    >
                        "Отмена"
                    </Button>
                    <Button appearance=ButtonAppearance::Primary on_click=on_save disabled=disabled>
                        {icon("wallet")}
                        {move || if saving.get() { " Сохранение..." } else { " Применить" }}
                    </Button>
                </div>
            </div>
        </div>
    }
}
