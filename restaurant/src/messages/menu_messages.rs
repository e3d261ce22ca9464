use actix::prelude::*;
use common::errors::ApiError;
use common::types::menu::{MenuItem, MenuItemDraft};

/// Menu of the signed-in restaurant after an operation.
pub type MenuResult = Result<Vec<MenuItem>, ApiError>;

#[derive(Message, Debug, Clone)]
#[rtype(result = "MenuResult")]
pub struct LoadMenu;

#[derive(Message, Debug, Clone)]
#[rtype(result = "MenuResult")]
pub struct CreateMenuItem(pub MenuItemDraft);

/// Without a new image the item keeps the one it already has.
#[derive(Message, Debug, Clone)]
#[rtype(result = "MenuResult")]
pub struct UpdateMenuItem {
    pub item_id: String,
    pub draft: MenuItemDraft,
}

#[derive(Message, Debug, Clone)]
#[rtype(result = "MenuResult")]
pub struct DeleteMenuItem {
    pub item_id: String,
}

#[derive(Message, Debug, Clone)]
#[rtype(result = "Vec<MenuItem>")]
pub struct GetMenu;
