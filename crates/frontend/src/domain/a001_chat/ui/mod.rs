pub mod details;
pub mod state;
