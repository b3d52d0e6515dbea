use contracts::dashboards::d401_admin_overview::dto::AdminOverview;
use contracts::system::users::User;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::dashboards::d401_admin_overview::api;
use crate::layout::use_modal;
use crate::shared::components::page_header::PageHeader;
use crate::shared::components::stat_card::StatCard;
use crate::shared::date_utils::format_date;
use crate::shared::number_format::{format_count, format_usd};
use crate::system::users::ui::list::UsersList;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AdminTab {
    Overview,
    Users,
}

impl AdminTab {
    fn value(self) -> &'static str {
        match self {
            AdminTab::Overview => "overview",
            AdminTab::Users => "users",
        }
    }

    fn from_value(value: &str) -> Self {
        if value == AdminTab::Users.value() {
            AdminTab::Users
        } else {
            AdminTab::Overview
        }
    }
}

#[component]
pub fn AdminDashboard() -> impl IntoView {
    let modal = use_modal();
    let selected_tab = RwSignal::new(AdminTab::Overview.value().to_string());
    let overview: RwSignal<Option<AdminOverview>> = RwSignal::new(None);
    let users: RwSignal<Vec<User>> = RwSignal::new(Vec::new());
    let (loading, set_loading) = signal(false);

    let reload = Callback::new(move |_: ()| {
        set_loading.set(true);
        spawn_local(async move {
            let (stats, roster) = api::load_admin_data().await;
            match stats {
                Ok(data) => overview.set(Some(data)),
                Err(e) => modal.show_error(format!("Не удалось загрузить статистику: {}", e)),
            }
            match roster {
                Ok(data) => users.set(data),
                Err(e) => modal.show_error(format!("Не удалось загрузить пользователей: {}", e)),
            }
            set_loading.set(false);
        });
    });
    reload.run(());

    view! {
        <div class="page admin-page">
            <PageHeader title="Администрирование" subtitle="Статистика и управление пользователями" />

            <TabList selected_value=selected_tab>
                <Tab value=AdminTab::Overview.value()>"Обзор"</Tab>
                <Tab value=AdminTab::Users.value()>"Пользователи"</Tab>
            </TabList>

            {move || match AdminTab::from_value(&selected_tab.get()) {
                AdminTab::Overview => view! { <OverviewTab overview=overview /> }.into_any(),
                AdminTab::Users => view! {
                    <UsersList users=users loading=loading on_changed=reload />
                }
                .into_any(),
            }}
        </div>
    }
}

#[component]
fn OverviewTab(overview: RwSignal<Option<AdminOverview>>) -> impl IntoView {
    move || {
        let Some(o) = overview.get() else {
            return view! { <div class="page-loading"><Spinner /></div> }.into_any();
        };
        view! {
            <div class="stat-grid">
                <StatCard
                    label="Пользователи"
                    icon_name="users"
                    value=format_count(o.total_users)
                    subtitle=Some(format!("активных: {}", format_count(o.active_users)))
                />
                <StatCard
                    label="Выручка"
                    icon_name="wallet"
                    value=format_usd(o.total_revenue)
                    subtitle=Some(format!("за 24ч: {}", format_usd(o.revenue_24h)))
                />
                <StatCard
                    label="Запросов"
                    icon_name="activity"
                    value=format_count(o.total_requests)
                    subtitle=Some(format!("за 24ч: {}", format_count(o.requests_24h)))
                />
                <StatCard label="Токенов" icon_name="chat" value=format_count(o.total_tokens) />
            </div>

            <div class="admin-page__tables">
                <section>
                    <h3>"Топ пользователей"</h3>
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell>"Пользователь"</TableHeaderCell>
                                <TableHeaderCell>"Запросов"</TableHeaderCell>
                                <TableHeaderCell>"Потрачено"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            {o.top_users
                                .into_iter()
                                .map(|u| view! {
                                    <TableRow>
                                        <TableCell>
                                            <TableCellLayout truncate=true>
                                                <span style="font-weight: 500;">{u.username}</span>
                                                " "
                                                <span class="muted">{u.email.unwrap_or_default()}</span>
                                            </TableCellLayout>
                                        </TableCell>
                                        <TableCell><TableCellLayout>{format_count(u.request_count)}</TableCellLayout></TableCell>
                                        <TableCell><TableCellLayout>{format_usd(u.total_spent)}</TableCellLayout></TableCell>
                                    </TableRow>
                                })
                                .collect_view()}
                        </TableBody>
                    </Table>
                </section>

                <section>
                    <h3>"Выручка по моделям"</h3>
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell>"Модель"</TableHeaderCell>
                                <TableHeaderCell>"Запросов"</TableHeaderCell>
                                <TableHeaderCell>"Выручка"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            {o.usage_by_model
                                .into_iter()
                                .map(|m| view! {
                                    <TableRow>
                                        <TableCell><TableCellLayout>{m.model}</TableCellLayout></TableCell>
                                        <TableCell><TableCellLayout>{format_count(m.count)}</TableCellLayout></TableCell>
                                        <TableCell><TableCellLayout>{format_usd(m.revenue)}</TableCellLayout></TableCell>
                                    </TableRow>
                                })
                                .collect_view()}
                        </TableBody>
                    </Table>
                </section>

                <section>
                    <h3>"По дням"</h3>
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell>"Дата"</TableHeaderCell>
                                <TableHeaderCell>"Запросов"</TableHeaderCell>
                                <TableHeaderCell>"Активных"</TableHeaderCell>
                                <TableHeaderCell>"Выручка"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            {o.daily_stats
                                .into_iter()
                                .map(|d| view! {
                                    <TableRow>
                                        <TableCell><TableCellLayout>{format_date(&d.date)}</TableCellLayout></TableCell>
                                        <TableCell><TableCellLayout>{format_count(d.requests)}</TableCellLayout></TableCell>
                                        <TableCell><TableCellLayout>{format_count(d.active_users)}</TableCellLayout></TableCell>
                                        <TableCell><TableCellLayout>{format_usd(d.revenue)}</TableCellLayout></TableCell>
                                    </TableRow>
                                })
                                .collect_view()}
                        </TableBody>
                    </Table>
                </section>
            </div>
        }
        .into_any()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_tab_value_shows_overview() {
        assert_eq!(AdminTab::from_value("users"), AdminTab::Users);
        assert_eq!(AdminTab::from_value(""), AdminTab::Overview);
    }
}
