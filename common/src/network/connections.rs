use crate::constants::{BASE_DELAY_MILLIS, MAX_DELAY_MILLIS};
use crate::errors::ChannelError;
use futures::stream::{SplitSink, SplitStream};
use rand::Rng;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

pub type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;
pub type WsWriter = SplitSink<WsStream, Message>;
pub type WsReader = SplitStream<WsStream>;

/// Opens a WebSocket to `url`.
pub async fn connect(url: &str) -> Result<WsStream, ChannelError> {
    let (stream, _response) = connect_async(url).await?;
    Ok(stream)
}

/// Capped exponential backoff with random jitter between reconnect attempts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Backoff {
    base: Duration,
    max: Duration,
    attempt: u32,
}

impl Default for Backoff {
    fn default() -> Self {
        Self::new(
            Duration::from_millis(BASE_DELAY_MILLIS),
            Duration::from_millis(MAX_DELAY_MILLIS),
        )
    }
}

impl Backoff {
    pub fn new(base: Duration, max: Duration) -> Self {
        Self {
            base,
            max: max.max(base),
            attempt: 0,
        }
    }

    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    pub fn next_delay(&mut self) -> Duration {
        let factor = 1u32 << self.attempt.min(16);
        let exp = self.base.saturating_mul(factor).min(self.max);
        let jitter_ms = (exp.as_millis() as u64) / 4;
        let jitter = Duration::from_millis(rand::thread_rng().gen_range(0..=jitter_ms));
        self.attempt = self.attempt.saturating_add(1);
        (exp + jitter).min(self.max)
    }

    pub fn reset(&mut self) {
        self.attempt = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_grows_and_caps() {
        let mut backoff = Backoff::new(Duration::from_millis(100), Duration::from_millis(1000));
        let first = backoff.next_delay();
        assert!(first >= Duration::from_millis(100) && first <= Duration::from_millis(125));
        let second = backoff.next_delay();
        assert!(second >= Duration::from_millis(200));
        for _ in 0..20 {
            assert!(backoff.next_delay() <= Duration::from_millis(1000));
        }
        backoff.reset();
        assert_eq!(backoff.attempt(), 0);
        assert!(backoff.next_delay() <= Duration::from_millis(125));
    }

    #[tokio::test]
    async fn test_connect_refused_is_transport_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let result = connect(&format!("ws://{addr}")).await;
        assert!(matches!(result, Err(ChannelError::Transport(_))));
    }
}
