pub mod communicator;
pub mod connections;
pub mod line_reader;
pub mod order_channel;
pub mod ws_receiver;
pub mod ws_sender;
