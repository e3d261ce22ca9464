use crate::constants::SHORT_ORDER_ID_LEN;
use crate::messages::channel_messages::OrderStatusUpdate;
use crate::types::order_status::{OrderStatus, OrderTimeline};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    #[serde(rename = "_id")]
    pub id: String,
    pub item_id: String,
    pub quantity: u32,
    pub name: String,
    /// Unit price in cents.
    pub price: f64,
}

/// Cached copy of an order owned by the order service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: String,
    pub user_id: String,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    /// Total in cents.
    pub total_price: f64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_person_id: Option<String>,
}

impl Order {
    /// Last characters of the id, as shown on order cards.
    pub fn short_id(&self) -> &str {
        let start = self
            .id
            .char_indices()
            .rev()
            .nth(SHORT_ORDER_ID_LEN - 1)
            .map(|(index, _)| index)
            .unwrap_or(0);
        &self.id[start..]
    }

    pub fn timeline(&self) -> OrderTimeline {
        OrderTimeline::from_status(&self.status)
    }

    /// Patches status and update time from a pushed event.
    ///
    /// Returns `false` when the event targets another order, is older than the
    /// cached copy, or changes nothing. Applying the same event twice is a no-op.
    /// A delivered or cancelled order keeps its status.
    pub fn apply_status_update(&mut self, update: &OrderStatusUpdate) -> bool {
        if update.order_id != self.id || update.updated_at < self.updated_at {
            return false;
        }
        if self.status.is_terminal() && update.status != self.status {
            return false;
        }
        if self.status == update.status && self.updated_at == update.updated_at {
            return false;
        }
        self.status = update.status.clone();
        self.updated_at = update.updated_at;
        true
    }

    /// First `limit` items plus how many were left out.
    pub fn items_preview(&self, limit: usize) -> (&[OrderItem], usize) {
        let shown = self.items.len().min(limit);
        (&self.items[..shown], self.items.len() - shown)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use chrono::TimeZone;

    pub fn at(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 4, 20, 12, minute, 0).unwrap()
    }

    pub fn order(id: &str, status: OrderStatus) -> Order {
        Order {
            id: id.to_string(),
            user_id: "user-1".to_string(),
            items: vec![
                OrderItem {
                    id: format!("{id}-line-1"),
                    item_id: "kottu".to_string(),
                    quantity: 2,
                    name: "Chicken Kottu".to_string(),
                    price: 1250.0,
                },
                OrderItem {
                    id: format!("{id}-line-2"),
                    item_id: "faluda".to_string(),
                    quantity: 1,
                    name: "Faluda".to_string(),
                    price: 450.0,
                },
            ],
            total_price: 2950.0,
            status,
            created_at: at(0),
            updated_at: at(0),
            delivery_person_id: None,
        }
    }

    pub fn update(order_id: &str, status: OrderStatus, minute: u32) -> OrderStatusUpdate {
        OrderStatusUpdate {
            order_id: order_id.to_string(),
            status,
            updated_at: at(minute),
        }
    }
}
