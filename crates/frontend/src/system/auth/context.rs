use contracts::system::auth::UserInfo;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{api, storage};
use crate::shared::http::ApiError;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub token: Option<String>,
    pub user_info: Option<UserInfo>,
    /// A stored token exists but `/auth/me` has not answered yet.
    pub loading: bool,
}

impl AuthState {
    /// State at application start, before `/auth/me` resolves.
    pub fn restoring(token: Option<String>) -> Self {
        Self {
            loading: token.is_some(),
            token,
            user_info: None,
        }
    }

    pub fn signed_in(token: String, user_info: UserInfo) -> Self {
        Self {
            token: Some(token),
            user_info: Some(user_info),
            loading: false,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some() && self.user_info.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.user_info.as_ref().map(|u| u.is_admin).unwrap_or(false)
    }

    pub fn user_id(&self) -> Option<i64> {
        self.user_info.as_ref().map(|u| u.id)
    }
}

/// Auth context provider component
#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let (auth_state, set_auth_state) = signal(AuthState::restoring(storage::get_token()));

    // Restore session from localStorage on mount
    Effect::new(move |_| {
        let Some(token) = auth_state.get_untracked().token else {
            return;
        };
        spawn_local(async move {
            match api::get_current_user().await {
                Ok(user_info) => {
                    log::info!("Session restored for {}", user_info.username);
                    set_auth_state.set(AuthState::signed_in(token, user_info));
                }
                Err(e) => {
                    log::warn!("Stored token rejected: {}", e);
                    storage::clear_token();
                    set_auth_state.set(AuthState::default());
                }
            }
        });
    });

    provide_context(auth_state);
    provide_context(set_auth_state);

    children()
}

/// Hook to access auth state
pub fn use_auth() -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
    let auth_state =
        use_context::<ReadSignal<AuthState>>().expect("AuthProvider not found in component tree");
    let set_auth_state =
        use_context::<WriteSignal<AuthState>>().expect("AuthProvider not found in component tree");

    (auth_state, set_auth_state)
}

/// Helper: Perform login, store the token and load the user record
pub async fn do_login(
    username: String,
    password: String,
    set_auth_state: WriteSignal<AuthState>,
) -> Result<(), ApiError> {
    let response = api::login(username, password).await?;
    storage::save_token(&response.access_token);

    match api::get_current_user().await {
        Ok(user_info) => {
            log::info!("Signed in as {}", user_info.username);
            set_auth_state.set(AuthState::signed_in(response.access_token, user_info));
            Ok(())
        }
        Err(e) => {
            storage::clear_token();
            Err(e)
        }
    }
}

/// Helper: Perform logout
pub fn do_logout(set_auth_state: WriteSignal<AuthState>) {
    storage::clear_token();
    set_auth_state.set(AuthState::default());
}

/// Re-read `/auth/me`, e.g. to pick up a balance changed by usage charges.
pub async fn refresh_user(set_auth_state: WriteSignal<AuthState>) {
    match api::get_current_user().await {
        Ok(user_info) => set_auth_state.update(|s| s.user_info = Some(user_info)),
        Err(e) => log::warn!("Failed to refresh current user: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(is_admin: bool) -> UserInfo {
        UserInfo {
            id: 1,
            username: "alice".into(),
            email: None,
            is_admin,
            is_active: true,
            balance: 5.0,
        }
    }

    #[test]
    fn restoring_is_loading_only_with_token() {
        assert!(AuthState::restoring(Some("t".into())).loading);
        assert!(!AuthState::restoring(None).loading);
        assert!(!AuthState::restoring(Some("t".into())).is_authenticated());
    }

    #[test]
    fn signed_in_flags() {
        let s = AuthState::signed_in("t".into(), user(true));
        assert!(s.is_authenticated());
        assert!(s.is_admin());
        assert_eq!(s.user_id(), Some(1));
        assert!(!AuthState::signed_in("t".into(), user(false)).is_admin());
    }
}
