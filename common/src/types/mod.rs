pub mod cart;
pub mod dtos;
pub mod identity;
pub mod menu;
pub mod order;
pub mod order_board;
pub mod order_status;
pub mod payment;
pub mod restaurant_info;
pub mod review;
