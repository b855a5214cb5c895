pub mod board;
pub mod palette;
pub mod settings_panel;
