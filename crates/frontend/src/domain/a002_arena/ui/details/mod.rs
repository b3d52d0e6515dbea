//! Arena screen (MVVM)
//!
//! Structure:
//! - model.rs: API functions
//! - view_model.rs: ArenaVm with RwSignals
//! - view.rs: ArenaPage component and result cards

mod model;
mod view;
mod view_model;

pub use view::ArenaPage;
pub use view_model::ArenaVm;
