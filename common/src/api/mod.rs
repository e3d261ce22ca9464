//! HTTP clients of the BYTEats services.

pub mod auth;
pub mod cart;
pub mod menu;
pub mod orders;
pub mod restaurants;
pub mod reviews;

use crate::config::Config;
use crate::errors::ApiError;
use crate::logger::Logger;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Shared `reqwest` client plus the service endpoints.
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: Client,
    config: Arc<Config>,
    logger: Logger,
}

impl HttpApi {
    pub fn new(config: Arc<Config>, logger: Logger) -> Self {
        Self {
            client: Client::new(),
            config,
            logger,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Sends the request and decodes a JSON body.
    pub async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let body = self.fetch_text(request).await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Sends the request and returns the raw body of a 2xx response.
    pub async fn fetch_text(&self, request: RequestBuilder) -> Result<String, ApiError> {
        let response = self.execute(request).await?;
        Ok(response.text().await?)
    }

    /// Sends the request, turning non-2xx answers into [`ApiError::Remote`].
    pub async fn execute(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let request = request.build()?;
        self.logger
            .debug(format!("{} {}", request.method(), request.url()));
        let response = self.client.execute(request).await?;
        check_status(response).await.inspect_err(|e| {
            self.logger.warn(e.to_string());
        })
    }
}

pub async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ApiError::Remote {
        status: status.as_u16(),
        message: error_message(status, &body),
    })
}

/// Prefers `{ message }`, then `{ error }`, then the raw body.
pub fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["message", "error"] {
            if let Some(message) = value.get(key).and_then(|v| v.as_str()) {
                return message.to_string();
            }
        }
    }
    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return trimmed.chars().take(200).collect();
    }
    status
        .canonical_reason()
        .unwrap_or("Request failed")
        .to_string()
}

#[cfg(test)]
pub(crate) mod test_server {
    use axum::Router;
    use serde_json::Value;
    use std::sync::{Arc, Mutex};

    /// Requests seen by a fake service: `(method path, json body)`.
    pub type Recorded = Arc<Mutex<Vec<(String, Value)>>>;

    pub async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    pub fn recorded(log: &Recorded) -> Vec<(String, Value)> {
        log.lock().unwrap().clone()
    }
}
