pub mod progress_view;
pub mod reading_view;
pub mod word_panel;
