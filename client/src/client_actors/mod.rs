pub mod cart_store;
pub mod order_tracker;
pub mod ui_handler;
