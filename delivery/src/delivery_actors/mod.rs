pub mod delivery_board;
pub mod ui_handler;
