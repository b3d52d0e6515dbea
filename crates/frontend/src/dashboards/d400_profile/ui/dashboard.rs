use contracts::dashboards::d400_profile::dto::{Transaction, UsageRecord, UserStats};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::dashboards::d400_profile::api;
use crate::dashboards::d400_profile::state::{days_newest_first, session_type_label, ProfileTab};
use crate::shared::components::page_header::PageHeader;
use crate::shared::components::stat_card::{StatCard, StatTone};
use crate::shared::date_utils::{format_date, format_datetime_opt};
use crate::shared::number_format::{format_cost, format_count, format_signed_usd, format_usd};
use crate::system::auth::context::use_auth;

/// Read-only usage and billing view of the signed-in user.
#[component]
pub fn ProfileDashboard() -> impl IntoView {
    let (auth_state, _) = use_auth();
    let selected_tab = RwSignal::new(ProfileTab::Overview.value().to_string());
    let tab = Signal::derive(move || ProfileTab::from_value(&selected_tab.get()));

    let stats: RwSignal<Option<UserStats>> = RwSignal::new(None);
    let history: RwSignal<Option<Vec<UsageRecord>>> = RwSignal::new(None);
    let transactions: RwSignal<Option<Vec<Transaction>>> = RwSignal::new(None);
    let (error, set_error) = signal::<Option<String>>(None);

    // The three requests are independent; each section renders when its own data lands
    spawn_local(async move {
        match api::get_user_stats().await {
            Ok(data) => stats.set(Some(data)),
            Err(e) => set_error.set(Some(format!("Не удалось загрузить статистику: {}", e))),
        }
    });
    spawn_local(async move {
        match api::get_usage_history().await {
            Ok(data) => history.set(Some(data)),
            Err(e) => set_error.set(Some(format!("Не удалось загрузить историю: {}", e))),
        }
    });
    spawn_local(async move {
        match api::get_transactions().await {
            Ok(data) => transactions.set(Some(data)),
            Err(e) => set_error.set(Some(format!("Не удалось загрузить транзакции: {}", e))),
        }
    });

    let subtitle = move || {
        auth_state.with(|s| {
            s.user_info
                .as_ref()
                .map(|u| format!("{} • баланс {}", u.username, format_usd(u.balance)))
        })
    };

    view! {
        <div class="page profile-page">
            <PageHeader title="Профиль" subtitle=Signal::derive(subtitle) />

            {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

            <TabList selected_value=selected_tab>
                {ProfileTab::ALL
                    .into_iter()
                    .map(|t| view! { <Tab value=t.value()>{t.label()}</Tab> })
                    .collect_view()}
            </TabList>

            <div class="profile-page__body">
                {move || match tab.get() {
                    ProfileTab::Overview => view! { <OverviewTab stats=stats /> }.into_any(),
                    ProfileTab::History => view! { <HistoryTab history=history /> }.into_any(),
                    ProfileTab::Transactions => {
                        view! { <TransactionsTab transactions=transactions /> }.into_any()
                    }
                }}
            </div>
        </div>
    }
}

fn loading_view() -> AnyView {
    view! { <div class="page-loading"><Spinner /></div> }.into_any()
}

#[component]
fn OverviewTab(stats: RwSignal<Option<UserStats>>) -> impl IntoView {
    move || {
        let Some(s) = stats.get() else {
            return loading_view();
        };
        let models = s.usage_by_model.clone();
        let days = days_newest_first(&s.usage_by_day);
        view! {
            <div class="stat-grid">
                <StatCard label="Потрачено всего" icon_name="wallet" value=format_usd(s.total_spent) />
                <StatCard label="Запросов" icon_name="activity" value=format_count(s.total_requests) />
                <StatCard
                    label="Токенов"
                    icon_name="chat"
                    value=format_count(s.total_tokens())
                    subtitle=Some(format!(
                        "вх. {} / вых. {}",
                        format_count(s.total_input_tokens),
                        format_count(s.total_output_tokens)
                    ))
                />
                <StatCard
                    label="За 30 дней"
                    icon_name="wallet"
                    value=format_usd(s.recent_spending_30d)
                    tone=StatTone::Neutral
                />
            </div>

            <h3>"Использование по моделям"</h3>
            <Table attr:style="width: 100%;">
                <TableHeader>
                    <TableRow>
                        <TableHeaderCell>"Модель"</TableHeaderCell>
                        <TableHeaderCell>"Запросов"</TableHeaderCell>
                        <TableHeaderCell>"Токены (вх. / вых.)"</TableHeaderCell>
                        <TableHeaderCell>"Стоимость"</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {models
                        .into_iter()
                        .map(|m| view! {
                            <TableRow>
                                <TableCell><TableCellLayout>{m.model}</TableCellLayout></TableCell>
                                <TableCell><TableCellLayout>{format_count(m.count)}</TableCellLayout></TableCell>
                                <TableCell>
                                    <TableCellLayout>
                                        {format!("{} / {}", format_count(m.total_input), format_count(m.total_output))}
                                    </TableCellLayout>
                                </TableCell>
                                <TableCell><TableCellLayout>{format_cost(m.total_cost)}</TableCellLayout></TableCell>
                            </TableRow>
                        })
                        .collect_view()}
                </TableBody>
            </Table>

            <h3>"Последние 7 дней"</h3>
            <Table attr:style="width: 100%;">
                <TableHeader>
                    <TableRow>
                        <TableHeaderCell>"Дата"</TableHeaderCell>
                        <TableHeaderCell>"Запросов"</TableHeaderCell>
                        <TableHeaderCell>"Стоимость"</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {days
                        .into_iter()
                        .map(|d| view! {
                            <TableRow>
                                <TableCell><TableCellLayout>{format_date(&d.date)}</TableCellLayout></TableCell>
                                <TableCell><TableCellLayout>{format_count(d.requests)}</TableCellLayout></TableCell>
                                <TableCell><TableCellLayout>{format_cost(d.cost)}</TableCellLayout></TableCell>
                            </TableRow>
                        })
                        .collect_view()}
                </TableBody>
            </Table>
        }
        .into_any()
    }
}

#[component]
fn HistoryTab(history: RwSignal<Option<Vec<UsageRecord>>>) -> impl IntoView {
    move || {
        let Some(records) = history.get() else {
            return loading_view();
        };
        if records.is_empty() {
            return view! { <div class="empty-state">"Запросов пока не было"</div> }.into_any();
        }
        view! {
            <Table attr:style="width: 100%;">
                <TableHeader>
                    <TableRow>
                        <TableHeaderCell>"Дата"</TableHeaderCell>
                        <TableHeaderCell>"Тип"</TableHeaderCell>
                        <TableHeaderCell>"Модель"</TableHeaderCell>
                        <TableHeaderCell>"Токены (вх. / вых.)"</TableHeaderCell>
                        <TableHeaderCell>"Стоимость"</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {records
                        .into_iter()
                        .map(|r| view! {
                            <TableRow>
                                <TableCell><TableCellLayout>{format_datetime_opt(&r.created_at)}</TableCellLayout></TableCell>
                                <TableCell>
                                    <TableCellLayout>
                                        <span class="badge badge--neutral">{session_type_label(&r.session_type).to_string()}</span>
                                    </TableCellLayout>
                                </TableCell>
                                <TableCell><TableCellLayout>{r.model.clone()}</TableCellLayout></TableCell>
                                <TableCell>
                                    <TableCellLayout>
                                        {format!("{} / {}", format_count(r.input_tokens), format_count(r.output_tokens))}
                                    </TableCellLayout>
                                </TableCell>
                                <TableCell><TableCellLayout>{format_cost(r.cost)}</TableCellLayout></TableCell>
                            </TableRow>
                        })
                        .collect_view()}
                </TableBody>
            </Table>
        }
        .into_any()
    }
}

#[component]
fn TransactionsTab(transactions: RwSignal<Option<Vec<Transaction>>>) -> impl IntoView {
    move || {
        let Some(items) = transactions.get() else {
            return loading_view();
        };
        if items.is_empty() {
            return view! { <div class="empty-state">"Транзакций пока нет"</div> }.into_any();
        }
        view! {
            <Table attr:style="width: 100%;">
                <TableHeader>
                    <TableRow>
                        <TableHeaderCell>"Дата"</TableHeaderCell>
                        <TableHeaderCell>"Описание"</TableHeaderCell>
                        <TableHeaderCell>"Сумма"</TableHeaderCell>
                        <TableHeaderCell>"Баланс после"</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {items
                        .into_iter()
                        .map(|t| {
                            let class = if t.is_credit() { "amount amount--credit" } else { "amount amount--debit" };
                            view! {
                                <TableRow>
                                    <TableCell><TableCellLayout>{format_datetime_opt(&t.created_at)}</TableCellLayout></TableCell>
                                    <TableCell>
                                        <TableCellLayout truncate=true>
                                            {t.description.clone().unwrap_or_else(|| t.kind.clone())}
                                        </TableCellLayout>
                                    </TableCell>
                                    <TableCell>
                                        <TableCellLayout>
                                            <span class=class>{format_signed_usd(t.amount)}</span>
                                        </TableCellLayout>
                                    </TableCell>
                                    <TableCell><TableCellLayout>{format_usd(t.balance_after)}</TableCellLayout></TableCell>
                                </TableRow>
                            }
                        })
                        .collect_view()}
                </TableBody>
            </Table>
        }
        .into_any()
    }
}
