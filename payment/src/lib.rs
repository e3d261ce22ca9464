pub mod payment_api;
pub mod payment_gateway;
