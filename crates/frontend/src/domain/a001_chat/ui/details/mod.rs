//! Chat screen (MVVM)
//!
//! Structure:
//! - model.rs: API functions
//! - view_model.rs: ChatVm with RwSignals and the send flow
//! - view.rs: ChatPage component (session sidebar + conversation)

mod model;
mod view;
mod view_model;

pub use view::ChatPage;
pub use view_model::ChatVm;
