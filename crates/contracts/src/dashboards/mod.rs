pub mod d400_profile;
pub mod d401_admin_overview;
