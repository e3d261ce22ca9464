use crate::api::HttpApi;
use crate::errors::ApiError;
use crate::types::review::{Review, ReviewDraft};
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReviewOwner<'a> {
    customer_id: &'a str,
}

impl HttpApi {
    pub async fn reviews_for(&self, restaurant_id: &str) -> Result<Vec<Review>, ApiError> {
        let url = format!("{}/api/reviews", self.config().review_url);
        self.fetch(self.client().get(url).query(&[("restaurantId", restaurant_id)]))
            .await
    }

    pub async fn create_review(&self, draft: &ReviewDraft) -> Result<(), ApiError> {
        draft.validate()?;
        let url = format!("{}/api/reviews", self.config().review_url);
        self.execute(self.client().post(url).json(draft)).await?;
        Ok(())
    }

    pub async fn update_review(&self, review_id: &str, draft: &ReviewDraft) -> Result<Review, ApiError> {
        draft.validate()?;
        let url = format!("{}/api/reviews/{review_id}", self.config().review_url);
        self.fetch(self.client().put(url).json(draft)).await
    }

    pub async fn delete_review(&self, review_id: &str, customer_id: &str) -> Result<(), ApiError> {
        let url = format!("{}/api/reviews/{review_id}", self.config().review_url);
        self.execute(self.client().delete(url).json(&ReviewOwner { customer_id }))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_server::serve;
    use crate::config::Config;
    use crate::logger::Logger;
    use axum::extract::Query;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_reviews_are_filtered_by_restaurant_query() {
        let router = Router::new().route(
            "/api/reviews",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                let restaurant = params.get("restaurantId").cloned().unwrap_or_default();
                Json(json!([{
                    "_id": "rv1", "customerName": "Kasun", "reviewText": "Great",
                    "rating": 4, "restaurantId": restaurant
                }]))
            }),
        );
        let base = serve(router).await;
        let api = HttpApi::new(Arc::new(Config::single_host(&base)), Logger::new("api"));

        let reviews = api.reviews_for("r7").await.unwrap();
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].restaurant_id, "r7");
    }
}
