use crate::constants::*;
use crate::logger::Logger;
use std::env;
use std::path::PathBuf;

/// Service endpoints and local paths used by every front-end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub auth_url: String,
    pub order_url: String,
    pub realtime_url: String,
    pub cart_url: String,
    pub review_url: String,
    pub payment_url: String,
    pub menu_url: String,
    pub image_host: String,
    pub cloud_name: String,
    pub session_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            auth_url: AUTH_SERVICE_URL.to_string(),
            order_url: ORDER_SERVICE_URL.to_string(),
            realtime_url: REALTIME_URL.to_string(),
            cart_url: CART_SERVICE_URL.to_string(),
            review_url: REVIEW_SERVICE_URL.to_string(),
            payment_url: PAYMENT_SERVICE_URL.to_string(),
            menu_url: MENU_SERVICE_URL.to_string(),
            image_host: IMAGE_HOST.to_string(),
            cloud_name: String::new(),
            session_dir: default_session_dir(),
        }
    }
}

impl Config {
    pub fn load(logger: &Logger) -> Self {
        let defaults = Self::default();
        Self {
            auth_url: load_url(logger, "BYTEATS_AUTH_URL", defaults.auth_url),
            order_url: load_url(logger, "BYTEATS_ORDER_URL", defaults.order_url),
            realtime_url: load_url(logger, "BYTEATS_REALTIME_URL", defaults.realtime_url),
            cart_url: load_url(logger, "BYTEATS_CART_URL", defaults.cart_url),
            review_url: load_url(logger, "BYTEATS_REVIEW_URL", defaults.review_url),
            payment_url: load_url(logger, "BYTEATS_PAYMENT_URL", defaults.payment_url),
            menu_url: load_url(logger, "BYTEATS_MENU_URL", defaults.menu_url),
            image_host: load_url(logger, "BYTEATS_IMAGE_HOST", defaults.image_host),
            cloud_name: load(logger, "BYTEATS_CLOUD_NAME", defaults.cloud_name),
            session_dir: env::var_os("BYTEATS_SESSION_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.session_dir),
        }
    }

    pub fn session_file(&self) -> PathBuf {
        self.session_dir.join(SESSION_FILE_NAME)
    }

    /// Config whose every HTTP service points at one base URL. Handy for local
    /// gateways and fake servers.
    pub fn single_host(base_url: &str) -> Self {
        let base = trim_url(base_url.to_string());
        Self {
            auth_url: base.clone(),
            order_url: base.clone(),
            cart_url: base.clone(),
            review_url: base.clone(),
            payment_url: base.clone(),
            menu_url: base,
            ..Self::default()
        }
    }
}

fn default_session_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(env::temp_dir)
        .join(APP_DIR_NAME)
}

fn load(logger: &Logger, key: &str, default: String) -> String {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => value.trim().to_string(),
        _ => {
            logger.debug(format!("{key} not set, using default: {default}"));
            default
        }
    }
}

fn load_url(logger: &Logger, key: &str, default: String) -> String {
    trim_url(load(logger, key, default))
}

fn trim_url(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_host_trims_trailing_slash() {
        let config = Config::single_host("http://127.0.0.1:4000/");
        assert_eq!(config.cart_url, "http://127.0.0.1:4000");
        assert_eq!(config.menu_url, "http://127.0.0.1:4000");
        assert_eq!(config.realtime_url, REALTIME_URL);
    }

    #[test]
    fn test_session_file_lives_in_session_dir() {
        let config = Config {
            session_dir: PathBuf::from("/tmp/byteats-test"),
            ..Config::default()
        };
        assert_eq!(
            config.session_file(),
            PathBuf::from("/tmp/byteats-test").join(SESSION_FILE_NAME)
        );
    }
}
