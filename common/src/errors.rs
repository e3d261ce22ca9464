use thiserror::Error;

/// Problems caught before any network call, shown inline next to the form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Quantity must be at least 1, got {0}")]
    InvalidQuantity(u32),
    #[error("Please enter a delivery address")]
    EmptyAddress,
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
    #[error("Rating must be between 1 and 5, got {0}")]
    InvalidRating(u8),
    #[error("{0} must be greater than zero")]
    NotPositive(&'static str),
    #[error("Unknown role: {0}")]
    UnknownRole(String),
    #[error("Order {order_id} cannot go from {from} to {to}")]
    InvalidTransition {
        order_id: String,
        from: String,
        to: String,
    },
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{message} (status {status})")]
    Remote { status: u16, message: String },
    #[error("Error connecting to server: {0}")]
    Network(String),
    #[error("Invalid response from server: {0}")]
    Decode(String),
    #[error("You must be logged in as {0}")]
    NoSession(&'static str),
    #[error("Actor mailbox error: {0}")]
    Mailbox(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            ApiError::Remote {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

impl From<actix::MailboxError> for ApiError {
    fn from(err: actix::MailboxError) -> Self {
        ApiError::Mailbox(err.to_string())
    }
}

impl ApiError {
    pub fn is_validation(&self) -> bool {
        matches!(self, ApiError::Validation(_))
    }
}

/// Real-time channel failures. Logged, never surfaced to the user.
#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("WebSocket error: {0}")]
    Transport(#[from] tokio_tungstenite::tungstenite::Error),
    #[error("Malformed event: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Session storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Session storage is corrupted: {0}")]
    Serde(#[from] serde_json::Error),
}
