use actix::prelude::*;
use common::errors::ApiError;
use common::types::order::Order;

/// Refreshes the orders waiting for a delivery person. Returns the count.
#[derive(Message, Debug, Clone)]
#[rtype(result = "Result<usize, ApiError>")]
pub struct LoadAvailable;

/// Refreshes the orders assigned to the signed-in delivery person.
#[derive(Message, Debug, Clone)]
#[rtype(result = "Result<usize, ApiError>")]
pub struct LoadMine;

/// Takes an available order and reloads the assigned list.
#[derive(Message, Debug, Clone)]
#[rtype(result = "Result<(), ApiError>")]
pub struct AcceptOrder(pub String);

/// Marks an order on its way as delivered.
#[derive(Message, Debug, Clone)]
#[rtype(result = "Result<(), ApiError>")]
pub struct MarkDelivered(pub String);

/// Cancels an order on its way.
#[derive(Message, Debug, Clone)]
#[rtype(result = "Result<(), ApiError>")]
pub struct CancelOrder(pub String);

/// Drops the live subscription, e.g. on logout.
#[derive(Message, Debug, Clone)]
#[rtype(result = "()")]
pub struct StopTracking;

/// Snapshot of both cached lists.
#[derive(Message, Debug, Clone)]
#[rtype(result = "DeliveryBoards")]
pub struct GetBoards;

#[derive(Debug, Clone, PartialEq, MessageResponse)]
pub struct DeliveryBoards {
    /// Orders waiting for a delivery person.
    pub available: Vec<Order>,
    /// Orders assigned to the signed-in delivery person.
    pub mine: Vec<Order>,
}
