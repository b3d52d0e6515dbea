pub mod d400_profile;
pub mod d401_admin_overview;

pub use d400_profile::ui::ProfileDashboard;
pub use d401_admin_overview::ui::AdminDashboard;
