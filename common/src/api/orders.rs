use crate::api::HttpApi;
use crate::errors::ApiError;
use crate::types::order::Order;
use serde::Serialize;
use std::future::Future;

/// Order service calls used by the order boards.
pub trait OrderBackend: Clone + Unpin + 'static {
    fn user_orders(&self, user_id: &str) -> impl Future<Output = Result<Vec<Order>, ApiError>>;

    fn delivery_orders(&self, delivery_person_id: &str) -> impl Future<Output = Result<Vec<Order>, ApiError>>;

    fn available_orders(&self) -> impl Future<Output = Result<Vec<Order>, ApiError>>;

    fn accept_order(&self, order_id: &str, delivery_person_id: &str) -> impl Future<Output = Result<(), ApiError>>;

    fn mark_delivered(&self, order_id: &str, delivery_person_id: &str) -> impl Future<Output = Result<(), ApiError>>;

    fn cancel_order(&self, order_id: &str, delivery_person_id: &str) -> impl Future<Output = Result<(), ApiError>>;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DeliveryPersonBody<'a> {
    delivery_person_id: &'a str,
}

impl HttpApi {
    fn order_url(&self, path: &str) -> String {
        format!("{}/api/order{path}", self.config().order_url)
    }
}

impl OrderBackend for HttpApi {
    async fn user_orders(&self, user_id: &str) -> Result<Vec<Order>, ApiError> {
        self.fetch(self.client().get(self.order_url(&format!("/user/{user_id}"))))
            .await
    }

    async fn delivery_orders(&self, delivery_person_id: &str) -> Result<Vec<Order>, ApiError> {
        let url = self.order_url(&format!("/delivery-person/{delivery_person_id}"));
        self.fetch(self.client().get(url)).await
    }

    async fn available_orders(&self) -> Result<Vec<Order>, ApiError> {
        self.fetch(self.client().get(self.order_url("/available"))).await
    }

    async fn accept_order(&self, order_id: &str, delivery_person_id: &str) -> Result<(), ApiError> {
        let url = self.order_url(&format!("/{order_id}/accept"));
        let body = DeliveryPersonBody { delivery_person_id };
        self.execute(self.client().post(url).json(&body)).await?;
        Ok(())
    }

    async fn mark_delivered(&self, order_id: &str, delivery_person_id: &str) -> Result<(), ApiError> {
        let url = self.order_url(&format!("/{order_id}/delivered"));
        let body = DeliveryPersonBody { delivery_person_id };
        self.execute(self.client().put(url).json(&body)).await?;
        Ok(())
    }

    async fn cancel_order(&self, order_id: &str, delivery_person_id: &str) -> Result<(), ApiError> {
        let url = self.order_url(&format!("/{order_id}/cancel"));
        let body = DeliveryPersonBody { delivery_person_id };
        self.execute(self.client().put(url).json(&body)).await?;
        Ok(())
    }
}
