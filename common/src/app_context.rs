use crate::api::HttpApi;
use crate::config::Config;
use crate::logger::Logger;
use crate::network::connections::Backoff;
use crate::session::session_store::SessionStore;
use crate::session::storage::SessionFile;
use actix::prelude::*;
use std::sync::Arc;

/// Application-wide state built once in `main` and handed to the UI actor.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<Config>,
    pub api: HttpApi,
    pub session: Addr<SessionStore>,
    pub logger: Logger,
    pub backoff: Backoff,
}

impl AppContext {
    /// Must be called from inside a running actix system.
    pub fn start(config: Config, logger: Logger) -> Self {
        let config = Arc::new(config);
        let api = HttpApi::new(config.clone(), logger.scoped("http"));
        let session = SessionStore::load(
            SessionFile::new(config.session_file()),
            logger.scoped("session"),
        )
        .start();
        Self {
            config,
            api,
            session,
            logger,
            backoff: Backoff::default(),
        }
    }
}
