pub mod client_actors;
pub mod commands;
pub mod messages;
