use crate::errors::ChannelError;
use crate::types::order_status::OrderStatus;
use actix::prelude::*;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const ORDER_STATUS_UPDATE: &str = "order_status_update";

/// Status change pushed by the order service for a joined order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Message)]
#[serde(rename_all = "camelCase")]
#[rtype(result = "()")]
pub struct OrderStatusUpdate {
    pub order_id: String,
    pub status: OrderStatus,
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize)]
struct Envelope {
    event: String,
    #[serde(default)]
    data: serde_json::Value,
}

/// Events the real-time channel can receive.
#[derive(Debug, Clone, PartialEq, Message)]
#[rtype(result = "()")]
pub enum ServerEvent {
    OrderStatusUpdate(OrderStatusUpdate),
    /// Any event name this client does not handle.
    Other(String),
}

impl ServerEvent {
    /// Parses a `{ "event": ..., "data": ... }` text frame.
    pub fn parse(frame: &str) -> Result<Self, ChannelError> {
        let envelope: Envelope = serde_json::from_str(frame)?;
        match envelope.event.as_str() {
            ORDER_STATUS_UPDATE => Ok(ServerEvent::OrderStatusUpdate(serde_json::from_value(
                envelope.data,
            )?)),
            _ => Ok(ServerEvent::Other(envelope.event)),
        }
    }
}

/// Events the client emits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Message)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
#[rtype(result = "()")]
pub enum ClientEvent {
    /// Subscribe to the room of one order.
    JoinOrder(String),
}

impl ClientEvent {
    pub fn to_frame(&self) -> Result<String, ChannelError> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_order_frame() {
        let frame = ClientEvent::JoinOrder("665f1c".to_string()).to_frame().unwrap();
        let value: serde_json::Value = serde_json::from_str(&frame).unwrap();
        assert_eq!(value, serde_json::json!({"event": "join_order", "data": "665f1c"}));
    }

    #[test]
    fn test_parse_status_update() {
        let frame = r#"{"event":"order_status_update","data":{"orderId":"o1","status":"delivering","updatedAt":"2024-05-01T10:15:00Z"}}"#;
        match ServerEvent::parse(frame).unwrap() {
            ServerEvent::OrderStatusUpdate(update) => {
                assert_eq!(update.order_id, "o1");
                assert_eq!(update.status, OrderStatus::Delivering);
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn test_unknown_event_and_unknown_status_are_not_errors() {
        assert_eq!(
            ServerEvent::parse(r#"{"event":"ping"}"#).unwrap(),
            ServerEvent::Other("ping".to_string())
        );
        let frame = r#"{"event":"order_status_update","data":{"orderId":"o1","status":"lost","updatedAt":"2024-05-01T10:15:00Z"}}"#;
        assert!(matches!(
            ServerEvent::parse(frame).unwrap(),
            ServerEvent::OrderStatusUpdate(OrderStatusUpdate { status: OrderStatus::Unknown(_), .. })
        ));
    }

    #[test]
    fn test_malformed_frames_are_errors() {
        assert!(ServerEvent::parse("not json").is_err());
        assert!(ServerEvent::parse(r#"{"event":"order_status_update","data":{"orderId":"o1"}}"#).is_err());
    }
}
