pub mod api;
pub mod app_context;
pub mod config;
pub mod constants;
pub mod errors;
pub mod logger;
pub mod messages;
pub mod network;
pub mod render;
pub mod session;
pub mod types;
pub mod utils;
pub mod validation;
