pub mod modal_service;
pub mod top_header;

pub use modal_service::{confirm, use_modal, ModalService, NoticeModal};

use leptos::prelude::*;
use top_header::TopHeader;

/// Main application shell for signed-in pages.
///
/// ```text
/// +------------------------------------------+
/// |              TopHeader                   |
/// +------------------------------------------+
/// |               Content                    |
/// +------------------------------------------+
/// ```
#[component]
pub fn Shell(children: Children) -> impl IntoView {
    view! {
        <div class="app-layout">
            <TopHeader />
            <main class="app-main">{children()}</main>
        </div>
    }
}
