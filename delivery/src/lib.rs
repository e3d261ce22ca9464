pub mod commands;
pub mod delivery_actors;
pub mod messages;
