use crate::messages::channel_messages::OrderStatusUpdate;
use crate::types::order::Order;
use crate::types::order_status::{OrderStatus, OrderTimeline};
use chrono::Utc;

/// Locally cached order list plus the order open in the detail view.
///
/// Pushed status events patch both in place; there is no re-fetch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderBoard {
    orders: Vec<Order>,
    selected: Option<Order>,
}

impl OrderBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the list with an authoritative fetch. The selection follows the
    /// fresh copy of the same order, or is dropped if it disappeared.
    pub fn replace_all(&mut self, orders: Vec<Order>) {
        self.selected = self
            .selected
            .take()
            .and_then(|selected| orders.iter().find(|o| o.id == selected.id).cloned());
        self.orders = orders;
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn ids(&self) -> Vec<String> {
        self.orders.iter().map(|o| o.id.clone()).collect()
    }

    pub fn get(&self, order_id: &str) -> Option<&Order> {
        self.orders.iter().find(|o| o.id == order_id)
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn select(&mut self, order_id: &str) -> Option<&Order> {
        self.selected = self.get(order_id).cloned();
        self.selected.as_ref()
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&Order> {
        self.selected.as_ref()
    }

    pub fn selected_timeline(&self) -> OrderTimeline {
        self.selected
            .as_ref()
            .map(Order::timeline)
            .unwrap_or_else(OrderTimeline::unselected)
    }

    /// Applies a pushed status event. Returns whether anything changed.
    pub fn apply(&mut self, update: &OrderStatusUpdate) -> bool {
        let mut changed = false;
        if let Some(order) = self.orders.iter_mut().find(|o| o.id == update.order_id) {
            changed |= order.apply_status_update(update);
        }
        if let Some(selected) = self.selected.as_mut() {
            changed |= selected.apply_status_update(update);
        }
        changed
    }

    /// Local patch after a successful remote transition (deliver/cancel).
    /// Stamps the order so events older than the transition are ignored.
    pub fn set_status(&mut self, order_id: &str, status: OrderStatus) -> bool {
        let now = Utc::now();
        let mut changed = false;
        for order in self
            .orders
            .iter_mut()
            .chain(self.selected.iter_mut())
            .filter(|o| o.id == order_id)
        {
            if order.status != status {
                order.status = status.clone();
                order.updated_at = now.max(order.updated_at);
                changed = true;
            }
        }
        changed
    }

    pub fn remove(&mut self, order_id: &str) -> Option<Order> {
        if self.selected.as_ref().is_some_and(|o| o.id == order_id) {
            self.selected = None;
        }
        let index = self.orders.iter().position(|o| o.id == order_id)?;
        Some(self.orders.remove(index))
    }
}
