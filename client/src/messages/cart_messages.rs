use actix::prelude::*;
use common::errors::ApiError;
use common::types::cart::{CartItem, CatalogRef};

/// Result of a cart operation that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub enum CartOutcome {
    /// The authoritative cart after the operation.
    Synced(Vec<CartItem>),
    /// No user is signed in; nothing was sent.
    Inactive,
}

pub type CartResult = Result<CartOutcome, ApiError>;

/// Loads the signed-in user's cart from the server.
#[derive(Message, Debug, Clone)]
#[rtype(result = "CartResult")]
pub struct FetchCart;

/// Adds `quantity` units of a menu item to the cart.
#[derive(Message, Debug, Clone)]
#[rtype(result = "CartResult")]
pub struct AddToCart {
    pub item: CatalogRef,
    /// At least 1.
    pub quantity: u32,
}

/// Sets the quantity of a cart line.
#[derive(Message, Debug, Clone)]
#[rtype(result = "CartResult")]
pub struct UpdateCartItem {
    pub item_id: String,
    /// New quantity, at least 1. Use [`RemoveCartItem`] to drop a line.
    pub quantity: u32,
}

/// Drops one line from the cart.
#[derive(Message, Debug, Clone)]
#[rtype(result = "CartResult")]
pub struct RemoveCartItem {
    pub item_id: String,
}

/// Empties the cart.
#[derive(Message, Debug, Clone)]
#[rtype(result = "CartResult")]
pub struct ClearCart;

/// Places an order for the whole cart, then re-syncs it.
#[derive(Message, Debug, Clone)]
#[rtype(result = "CartResult")]
pub struct Checkout {
    /// Delivery address, must not be blank.
    pub address: String,
}

/// Reads the cached cart without a network call.
#[derive(Message, Debug, Clone)]
#[rtype(result = "CartView")]
pub struct GetCart;

/// Cached cart with its derived totals.
#[derive(Debug, Clone, PartialEq, MessageResponse)]
pub struct CartView {
    pub items: Vec<CartItem>,
    /// Sum of price times quantity over all lines.
    pub total: f64,
    /// Units across all lines.
    pub quantity: u32,
}
