pub const AUTH_SERVICE_URL: &str = "http://localhost:5000";
pub const ORDER_SERVICE_URL: &str = "http://localhost:5001";
pub const REALTIME_URL: &str = "ws://localhost:5001/ws";
pub const CART_SERVICE_URL: &str = "http://localhost:5002";
pub const REVIEW_SERVICE_URL: &str = "http://localhost:5002";
pub const PAYMENT_SERVICE_URL: &str = "http://localhost:5003";
pub const MENU_SERVICE_URL: &str = "http://byteats.local";

pub const IMAGE_HOST: &str = "https://res.cloudinary.com";
pub const HERO_IMAGE_TRANSFORMATIONS: &str = "c_limit,w_1920,f_auto,q_auto";
pub const CARD_IMAGE_TRANSFORMATIONS: &str = "c_limit,w_960,f_auto,q_auto";

pub const DEFAULT_CURRENCY: &str = "usd";

pub const APP_DIR_NAME: &str = "byteats";
pub const SESSION_FILE_NAME: &str = "user-storage.json";

/// Characters of an order id shown to humans ("Order #a1b2c3").
pub const SHORT_ORDER_ID_LEN: usize = 6;

pub const REVIEW_NAME_MAX_LEN: usize = 50;
pub const REVIEW_TEXT_MAX_LEN: usize = 500;

const DELAY_SECONDS: u64 = 1;
pub const BASE_DELAY_MILLIS: u64 = 1000 * DELAY_SECONDS;
pub const MAX_DELAY_MILLIS: u64 = 5 * BASE_DELAY_MILLIS;
