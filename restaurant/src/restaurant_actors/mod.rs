pub mod menu_manager;
pub mod ui_handler;
