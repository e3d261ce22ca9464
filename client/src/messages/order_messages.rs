use actix::prelude::*;
use common::errors::ApiError;
use common::types::order::Order;
use common::types::order_board::OrderBoard;
use common::types::order_status::OrderTimeline;

/// Fetches the user's orders and subscribes to their updates.
/// Returns how many orders were loaded.
#[derive(Message, Debug, Clone)]
#[rtype(result = "Result<usize, ApiError>")]
pub struct LoadOrders;

/// Opens the detail view of one order.
#[derive(Message, Debug, Clone)]
#[rtype(result = "Option<(Order, OrderTimeline)>")]
pub struct SelectOrder(pub String);

/// Leaves the orders view: drops the live subscription.
#[derive(Message, Debug, Clone)]
#[rtype(result = "()")]
pub struct StopTracking;

/// Snapshot of the cached orders and the open detail.
#[derive(Message, Debug, Clone)]
#[rtype(result = "OrderBoard")]
pub struct GetBoard;
