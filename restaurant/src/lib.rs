pub mod commands;
pub mod messages;
pub mod restaurant_actors;
