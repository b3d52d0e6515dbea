pub mod attachment_picker;
pub mod model_picker;
pub mod page_header;
pub mod stat_card;
