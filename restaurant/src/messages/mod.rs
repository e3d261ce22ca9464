pub mod menu_messages;
