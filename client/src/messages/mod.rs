pub mod cart_messages;
pub mod order_messages;
