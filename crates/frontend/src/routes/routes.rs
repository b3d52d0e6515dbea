use leptos::prelude::*;
use leptos_router::components::{Redirect, Route, Router, Routes, A};
use leptos_router::path;

use crate::dashboards::{AdminDashboard, ProfileDashboard};
use crate::domain::a001_chat::ui::details::ChatPage;
use crate::domain::a002_arena::ui::details::ArenaPage;
use crate::domain::a003_files::ui::list::FilesListPage;
use crate::layout::Shell;
use crate::system::auth::guard::{RequireAdmin, RequireAuth, DEFAULT_ROUTE};
use crate::system::pages::login::LoginPage;

#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="not-found">
            <h1>"404"</h1>
            <p>"Страница не найдена"</p>
            <A href=DEFAULT_ROUTE>"Перейти в чат"</A>
        </div>
    }
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Router>
            <Routes fallback=|| view! { <NotFound /> }>
                <Route path=path!("/login") view=LoginPage />
                <Route path=path!("/") view=|| view! { <Redirect path=DEFAULT_ROUTE /> } />
                <Route
                    path=path!("/chat")
                    view=|| view! { <RequireAuth><Shell><ChatPage /></Shell></RequireAuth> }
                />
                <Route
                    path=path!("/arena")
                    view=|| view! { <RequireAuth><Shell><ArenaPage /></Shell></RequireAuth> }
                />
                <Route
                    path=path!("/files")
                    view=|| view! { <RequireAuth><Shell><FilesListPage /></Shell></RequireAuth> }
                />
                <Route
                    path=path!("/profile")
                    view=|| view! { <RequireAuth><Shell><ProfileDashboard /></Shell></RequireAuth> }
                />
                <Route
                    path=path!("/admin")
                    view=|| view! { <RequireAdmin><Shell><AdminDashboard /></Shell></RequireAdmin> }
                />
            </Routes>
        </Router>
    }
}
