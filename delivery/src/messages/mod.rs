pub mod board_messages;
