use crate::utils::format_timestamp;
use chrono::{DateTime, Utc};
use colored::Color;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordinal of the cancelled sentinel. Overrides every milestone.
pub const CANCELLED_ORDINAL: i8 = -1;
/// Ordinal of any status outside the known set.
pub const UNKNOWN_ORDINAL: i8 = 0;

/// Authoritative order status as delivered by the order service.
///
/// Parsing never fails: strings outside the known set are kept verbatim in
/// `Unknown` so the timeline degrades to all-pending instead of erroring.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    Pending,
    Paid,
    Delivering,
    Delivered,
    Cancelled,
    Unknown(String),
}

impl OrderStatus {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "pending" => OrderStatus::Pending,
            "paid" => OrderStatus::Paid,
            "delivering" => OrderStatus::Delivering,
            "delivered" => OrderStatus::Delivered,
            "cancelled" => OrderStatus::Cancelled,
            other => OrderStatus::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Paid => "paid",
            OrderStatus::Delivering => "delivering",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Unknown(raw) => raw,
        }
    }

    /// Position on the tracking timeline. Milestones compare against this.
    pub fn ordinal(&self) -> i8 {
        match self {
            OrderStatus::Paid => 1,
            OrderStatus::Delivering => 3,
            OrderStatus::Delivered => 4,
            OrderStatus::Cancelled => CANCELLED_ORDINAL,
            OrderStatus::Pending | OrderStatus::Unknown(_) => UNKNOWN_ORDINAL,
        }
    }

    fn lifecycle_rank(&self) -> u8 {
        match self {
            OrderStatus::Pending | OrderStatus::Unknown(_) => 0,
            OrderStatus::Paid => 1,
            OrderStatus::Delivering => 2,
            OrderStatus::Delivered | OrderStatus::Cancelled => 3,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// One step forward along the lifecycle; `Cancelled` is reachable from any
    /// non-terminal state.
    pub fn can_transition_to(&self, next: &OrderStatus) -> bool {
        if self.is_terminal() {
            return false;
        }
        match (self, next) {
            (_, OrderStatus::Cancelled) => true,
            (OrderStatus::Unknown(_), _) | (_, OrderStatus::Unknown(_)) => false,
            _ => next.lifecycle_rank() == self.lifecycle_rank() + 1,
        }
    }

    /// Human label: first letter upper-cased.
    pub fn label(&self) -> String {
        let raw = self.as_str();
        let mut chars = raw.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    pub fn badge_color(&self) -> Color {
        match self {
            OrderStatus::Paid => Color::Blue,
            OrderStatus::Delivering => Color::Yellow,
            OrderStatus::Delivered => Color::Green,
            OrderStatus::Cancelled => Color::Red,
            OrderStatus::Pending | OrderStatus::Unknown(_) => Color::BrightBlack,
        }
    }
}

impl From<String> for OrderStatus {
    fn from(raw: String) -> Self {
        OrderStatus::parse(&raw)
    }
}

impl From<&str> for OrderStatus {
    fn from(raw: &str) -> Self {
        OrderStatus::parse(raw)
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The three checkpoints drawn on the tracking timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Milestone {
    Paid,
    Delivering,
    Delivered,
}

impl Milestone {
    pub const ALL: [Milestone; 3] = [Milestone::Paid, Milestone::Delivering, Milestone::Delivered];

    pub fn status(self) -> OrderStatus {
        match self {
            Milestone::Paid => OrderStatus::Paid,
            Milestone::Delivering => OrderStatus::Delivering,
            Milestone::Delivered => OrderStatus::Delivered,
        }
    }

    pub fn ordinal(self) -> i8 {
        self.status().ordinal()
    }

    pub fn title(self) -> &'static str {
        match self {
            Milestone::Paid => "Processing",
            Milestone::Delivering => "Shipped",
            Milestone::Delivered => "Delivered",
        }
    }

    pub fn caption(self, status: &OrderStatus, updated_at: DateTime<Utc>) -> String {
        match self {
            Milestone::Paid => "Your order has been received".to_string(),
            Milestone::Delivering => "Your order is on the way".to_string(),
            Milestone::Delivered if *status == OrderStatus::Delivered => {
                format!("Delivered on {}", format_timestamp(updated_at))
            }
            Milestone::Delivered => "Pending delivery".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepState {
    Completed,
    Current,
    Pending,
    Cancelled,
}

impl StepState {
    pub fn as_str(self) -> &'static str {
        match self {
            StepState::Completed => "completed",
            StepState::Current => "current",
            StepState::Pending => "pending",
            StepState::Cancelled => "cancelled",
        }
    }

    /// Completed and current steps are both drawn highlighted.
    pub fn is_reached(self) -> bool {
        matches!(self, StepState::Completed | StepState::Current)
    }
}

impl fmt::Display for StepState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn step_state(status: &OrderStatus, milestone: Milestone) -> StepState {
    let current = status.ordinal();
    if current == CANCELLED_ORDINAL {
        return StepState::Cancelled;
    }
    let step = milestone.ordinal();
    if step < current {
        StepState::Completed
    } else if step == current {
        StepState::Current
    } else {
        StepState::Pending
    }
}

/// Display state of every milestone for one order status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct OrderTimeline {
    pub paid: StepState,
    pub delivering: StepState,
    pub delivered: StepState,
}

impl OrderTimeline {
    /// Projects a raw status string. Total over every input.
    pub fn project(status: &str) -> Self {
        Self::from_status(&OrderStatus::parse(status))
    }

    pub fn from_status(status: &OrderStatus) -> Self {
        Self {
            paid: step_state(status, Milestone::Paid),
            delivering: step_state(status, Milestone::Delivering),
            delivered: step_state(status, Milestone::Delivered),
        }
    }

    /// Timeline shown while no order is selected.
    pub fn unselected() -> Self {
        Self {
            paid: StepState::Pending,
            delivering: StepState::Pending,
            delivered: StepState::Pending,
        }
    }

    pub fn state(&self, milestone: Milestone) -> StepState {
        match milestone {
            Milestone::Paid => self.paid,
            Milestone::Delivering => self.delivering,
            Milestone::Delivered => self.delivered,
        }
    }

    pub fn steps(&self) -> [(Milestone, StepState); 3] {
        Milestone::ALL.map(|milestone| (milestone, self.state(milestone)))
    }

    pub fn is_cancelled(&self) -> bool {
        self.paid == StepState::Cancelled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_statuses_project_all_pending() {
        for raw in ["", "pending", "PAID", "processing", "refunded", " paid", "🍕"] {
            assert_eq!(
                OrderTimeline::project(raw),
                OrderTimeline::unselected(),
                "status {raw:?}"
            );
        }
    }

    #[test]
    fn test_projection_is_deterministic() {
        for raw in ["paid", "delivering", "delivered", "cancelled", "whatever"] {
            assert_eq!(OrderTimeline::project(raw), OrderTimeline::project(raw));
        }
    }

    #[test]
    fn test_delivering_projection() {
        let timeline = OrderTimeline::project("delivering");
        assert_eq!(timeline.paid, StepState::Completed);
        assert_eq!(timeline.delivering, StepState::Current);
        assert_eq!(timeline.delivered, StepState::Pending);
    }

    #[test]
    fn test_paid_and_delivered_projection() {
        let paid = OrderTimeline::project("paid");
        assert_eq!(paid.paid, StepState::Current);
        assert_eq!(paid.delivering, StepState::Pending);

        let delivered = OrderTimeline::project("delivered");
        assert_eq!(delivered.paid, StepState::Completed);
        assert_eq!(delivered.delivering, StepState::Completed);
        assert_eq!(delivered.delivered, StepState::Current);
    }

    #[test]
    fn test_cancelled_overrides_every_milestone() {
        let timeline = OrderTimeline::project("cancelled");
        assert!(timeline.is_cancelled());
        for (_, state) in timeline.steps() {
            assert_eq!(state, StepState::Cancelled);
        }
    }

    #[test]
    fn test_status_serde_is_total() {
        let status: OrderStatus = serde_json::from_str("\"out_for_lunch\"").unwrap();
        assert_eq!(status, OrderStatus::Unknown("out_for_lunch".to_string()));
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"out_for_lunch\"");

        let status: OrderStatus = serde_json::from_str("\"delivering\"").unwrap();
        assert_eq!(status, OrderStatus::Delivering);
    }

    #[test]
    fn test_status_transitions() {
        assert!(OrderStatus::Paid.can_transition_to(&OrderStatus::Delivering));
        assert!(OrderStatus::Delivering.can_transition_to(&OrderStatus::Delivered));
        assert!(!OrderStatus::Pending.can_transition_to(&OrderStatus::Delivered));
        assert!(!OrderStatus::Paid.can_transition_to(&OrderStatus::Delivered));
        assert!(OrderStatus::Paid.can_transition_to(&OrderStatus::Cancelled));
        assert!(OrderStatus::Delivering.can_transition_to(&OrderStatus::Cancelled));
        assert!(!OrderStatus::Delivering.can_transition_to(&OrderStatus::Paid));
        assert!(!OrderStatus::Delivered.can_transition_to(&OrderStatus::Cancelled));
        assert!(!OrderStatus::Cancelled.can_transition_to(&OrderStatus::Paid));
        assert!(!OrderStatus::Paid.can_transition_to(&OrderStatus::Paid));
    }

    #[test]
    fn test_label_capitalizes_first_letter() {
        assert_eq!(OrderStatus::Delivering.label(), "Delivering");
        assert_eq!(OrderStatus::Unknown(String::new()).label(), "");
    }
}
