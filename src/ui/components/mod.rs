pub mod chapter_menu;
pub mod confirm_dialog;
pub mod practice;
pub mod progress_bar;
