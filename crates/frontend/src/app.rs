use crate::layout::{ModalService, NoticeModal};
use crate::routes::routes::AppRoutes;
use crate::system::auth::context::AuthProvider;
use leptos::prelude::*;
use thaw::ConfigProvider;

#[component]
pub fn App() -> impl IntoView {
    // Blocking notices for request failures, shared by every screen
    provide_context(ModalService::new());

    view! {
        <ConfigProvider>
            <AuthProvider>
                <AppRoutes />
                <NoticeModal />
            </AuthProvider>
        </ConfigProvider>
    }
}
