use crate::api::HttpApi;
use crate::errors::ApiError;
use crate::types::cart::{CartContents, CartItem, CatalogRef};
use serde::Serialize;
use std::future::Future;

/// Cart service calls, keyed by user id.
pub trait CartBackend: Clone + Unpin + 'static {
    fn fetch_cart(&self, user_id: &str) -> impl Future<Output = Result<Vec<CartItem>, ApiError>>;

    fn add_to_cart(
        &self,
        user_id: &str,
        item: &CatalogRef,
        quantity: u32,
    ) -> impl Future<Output = Result<(), ApiError>>;

    fn update_cart_item(
        &self,
        user_id: &str,
        item_id: &str,
        quantity: u32,
    ) -> impl Future<Output = Result<(), ApiError>>;

    fn remove_cart_item(&self, user_id: &str, item_id: &str) -> impl Future<Output = Result<(), ApiError>>;

    fn clear_cart(&self, user_id: &str) -> impl Future<Output = Result<(), ApiError>>;

    fn checkout(&self, user_id: &str, address: &str) -> impl Future<Output = Result<(), ApiError>>;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AddToCart<'a> {
    user_id: &'a str,
    item_id: &'a str,
    quantity: u32,
    name: &'a str,
    price: f64,
    image_url: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CartLine<'a> {
    user_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    item_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    quantity: Option<u32>,
}

#[derive(Serialize)]
struct CheckoutBody<'a> {
    address: &'a str,
}

impl CartBackend for HttpApi {
    async fn fetch_cart(&self, user_id: &str) -> Result<Vec<CartItem>, ApiError> {
        let url = format!("{}/api/cart/{user_id}", self.config().cart_url);
        let cart: CartContents = self.fetch(self.client().get(url)).await?;
        Ok(cart.items)
    }

    async fn add_to_cart(&self, user_id: &str, item: &CatalogRef, quantity: u32) -> Result<(), ApiError> {
        let url = format!("{}/api/cart/add", self.config().cart_url);
        let body = AddToCart {
            user_id,
            item_id: &item.id,
            quantity,
            name: &item.name,
            price: item.price,
            image_url: item.image_url.as_deref(),
        };
        self.execute(self.client().post(url).json(&body)).await?;
        Ok(())
    }

    async fn update_cart_item(&self, user_id: &str, item_id: &str, quantity: u32) -> Result<(), ApiError> {
        let url = format!("{}/api/cart/update", self.config().cart_url);
        let body = CartLine {
            user_id,
            item_id: Some(item_id),
            quantity: Some(quantity),
        };
        self.execute(self.client().put(url).json(&body)).await?;
        Ok(())
    }

    async fn remove_cart_item(&self, user_id: &str, item_id: &str) -> Result<(), ApiError> {
        let url = format!("{}/api/cart/remove", self.config().cart_url);
        let body = CartLine {
            user_id,
            item_id: Some(item_id),
            quantity: None,
        };
        self.execute(self.client().delete(url).json(&body)).await?;
        Ok(())
    }

    async fn clear_cart(&self, user_id: &str) -> Result<(), ApiError> {
        let url = format!("{}/api/cart/clear", self.config().cart_url);
        let body = CartLine {
            user_id,
            item_id: None,
            quantity: None,
        };
        self.execute(self.client().delete(url).json(&body)).await?;
        Ok(())
    }

    async fn checkout(&self, user_id: &str, address: &str) -> Result<(), ApiError> {
        let url = format!("{}/api/cart/checkout/{user_id}", self.config().cart_url);
        self.execute(self.client().post(url).json(&CheckoutBody { address }))
            .await?;
        Ok(())
    }
}
