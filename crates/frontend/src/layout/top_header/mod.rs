//! TopHeader component - application top navigation bar.
//!
//! Contains:
//! - Section links (admin link only for administrators)
//! - Current user name and balance
//! - Logout button

use crate::shared::http::LOGIN_ROUTE;
use crate::shared::icons::icon;
use crate::shared::number_format::format_usd;
use crate::system::auth::context::{do_logout, use_auth};
use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

struct NavItem {
    href: &'static str,
    label: &'static str,
    icon: &'static str,
    admin_only: bool,
}

const NAV_ITEMS: &[NavItem] = &[
    NavItem { href: "/chat", label: "Чат", icon: "chat", admin_only: false },
    NavItem { href: "/arena", label: "Арена", icon: "arena", admin_only: false },
    NavItem { href: "/files", label: "Файлы", icon: "files", admin_only: false },
    NavItem { href: "/profile", label: "Профиль", icon: "user", admin_only: false },
    NavItem { href: "/admin", label: "Админ", icon: "shield", admin_only: true },
];

fn visible_items(is_admin: bool) -> impl Iterator<Item = &'static NavItem> {
    NAV_ITEMS.iter().filter(move |item| is_admin || !item.admin_only)
}

#[component]
pub fn TopHeader() -> impl IntoView {
    let (auth_state, set_auth_state) = use_auth();
    let navigate = use_navigate();

    let logout = move |_| {
        do_logout(set_auth_state);
        navigate(LOGIN_ROUTE, Default::default());
    };

    let nav_links = move || {
        visible_items(auth_state.get().is_admin())
            .map(|item| {
                view! {
                    <A href=item.href attr:class="top-header__link">
                        {icon(item.icon)}
                        <span>{item.label}</span>
                    </A>
                }
            })
            .collect_view()
    };

    let user_label = move || {
        auth_state
            .get()
            .user_info
            .map(|u| u.username)
            .unwrap_or_default()
    };
    let balance_label = move || {
        auth_state
            .get()
            .user_info
            .map(|u| format_usd(u.balance))
            .unwrap_or_default()
    };

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <span class="top-header__title">"MultiChat"</span>
            </div>

            <nav class="top-header__nav">{nav_links}</nav>

            <div class="top-header__actions">
                <span class="top-header__user">{user_label}</span>
                <span class="top-header__balance" title="Баланс">
                    {icon("wallet")}
                    {balance_label}
                </span>
                <button class="top-header__icon-btn" on:click=logout title="Выйти">
                    {icon("logout")}
                </button>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_link_only_for_admins() {
        let user_links: Vec<_> = visible_items(false).map(|i| i.href).collect();
        assert_eq!(user_links, vec!["/chat", "/arena", "/files", "/profile"]);
        assert!(visible_items(true).any(|i| i.href == "/admin"));
    }
}
