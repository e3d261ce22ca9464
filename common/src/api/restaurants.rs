use crate::api::HttpApi;
use crate::errors::ApiError;
use crate::types::restaurant_info::Restaurant;

impl HttpApi {
    pub async fn restaurants(&self) -> Result<Vec<Restaurant>, ApiError> {
        let url = format!("{}/api/restaurant/", self.config().auth_url);
        self.fetch(self.client().get(url)).await
    }

    pub async fn restaurant(&self, id: &str) -> Result<Restaurant, ApiError> {
        let url = format!("{}/api/restaurant/{id}", self.config().auth_url);
        self.fetch(self.client().get(url)).await
    }
}
