use leptos::prelude::*;
use leptos_router::components::Redirect;

use super::context::{use_auth, AuthState};
use crate::shared::http::LOGIN_ROUTE;

pub const DEFAULT_ROUTE: &str = "/chat";

/// What a protected view should render for the current auth state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    Loading,
    RedirectToLogin,
    RedirectToDefault,
    Allow,
}

pub fn decide(state: &AuthState, admin_only: bool) -> GuardOutcome {
    if state.loading {
        return GuardOutcome::Loading;
    }
    if !state.is_authenticated() {
        return GuardOutcome::RedirectToLogin;
    }
    if admin_only && !state.is_admin() {
        return GuardOutcome::RedirectToDefault;
    }
    GuardOutcome::Allow
}

fn guarded(admin_only: bool, children: ChildrenFn) -> impl IntoView {
    let (auth_state, _) = use_auth();

    move || match decide(&auth_state.get(), admin_only) {
        GuardOutcome::Loading => view! {
            <div class="page-loading">"Загрузка..."</div>
        }
        .into_any(),
        GuardOutcome::RedirectToLogin => view! { <Redirect path=LOGIN_ROUTE /> }.into_any(),
        GuardOutcome::RedirectToDefault => view! { <Redirect path=DEFAULT_ROUTE /> }.into_any(),
        GuardOutcome::Allow => children().into_any(),
    }
}

/// Component that requires authentication
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    guarded(false, children)
}

/// Component that requires admin privileges; other users go to the chat
#[component]
pub fn RequireAdmin(children: ChildrenFn) -> impl IntoView {
    guarded(true, children)
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::system::auth::UserInfo;

    fn signed_in(is_admin: bool) -> AuthState {
        AuthState::signed_in(
            "token".into(),
            UserInfo {
                id: 2,
                username: "u".into(),
                email: None,
                is_admin,
                is_active: true,
                balance: 0.0,
            },
        )
    }

    #[test]
    fn loading_wins() {
        let state = AuthState::restoring(Some("token".into()));
        assert_eq!(decide(&state, false), GuardOutcome::Loading);
        assert_eq!(decide(&state, true), GuardOutcome::Loading);
    }

    #[test]
    fn anonymous_goes_to_login() {
        assert_eq!(decide(&AuthState::default(), false), GuardOutcome::RedirectToLogin);
        assert_eq!(decide(&AuthState::default(), true), GuardOutcome::RedirectToLogin);
    }

    #[test]
    fn token_without_user_is_anonymous() {
        let state = AuthState {
            token: Some("stale".into()),
            user_info: None,
            loading: false,
        };
        assert_eq!(decide(&state, false), GuardOutcome::RedirectToLogin);
    }

    #[test]
    fn admin_only_redirects_regular_users() {
        assert_eq!(decide(&signed_in(false), true), GuardOutcome::RedirectToDefault);
        assert_eq!(decide(&signed_in(false), false), GuardOutcome::Allow);
        assert_eq!(decide(&signed_in(true), true), GuardOutcome::Allow);
    }
}
