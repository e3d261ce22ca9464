use crate::api::HttpApi;
use crate::errors::{ApiError, StorageError};
use crate::types::menu::{ImageSource, MenuItem, MenuItemDraft};
use reqwest::multipart::{Form, Part};
use std::future::Future;

/// Menu endpoints as seen by the menu actors.
pub trait MenuBackend: Clone + Unpin + 'static {
    fn menu_for(&self, restaurant_id: &str) -> impl Future<Output = Result<Vec<MenuItem>, ApiError>>;

    fn create_menu_item(
        &self,
        restaurant_id: &str,
        draft: &MenuItemDraft,
    ) -> impl Future<Output = Result<(), ApiError>>;

    fn update_menu_item(
        &self,
        item_id: &str,
        restaurant_id: &str,
        draft: &MenuItemDraft,
    ) -> impl Future<Output = Result<(), ApiError>>;

    fn delete_menu_item(&self, item_id: &str) -> impl Future<Output = Result<(), ApiError>>;
}

async fn menu_form(restaurant_id: &str, draft: &MenuItemDraft) -> Result<Form, ApiError> {
    let form = Form::new()
        .text("name", draft.name.clone())
        .text("description", draft.description.clone())
        .text("price", draft.price.to_string())
        .text("category", draft.category.clone())
        .text("restaurantId", restaurant_id.to_string());
    Ok(match &draft.image {
        Some(ImageSource::File(path)) => {
            let bytes = tokio::fs::read(path).await.map_err(StorageError::from)?;
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "image".to_string());
            form.part("image", Part::bytes(bytes).file_name(file_name))
        }
        Some(ImageSource::Existing(url)) => form.text("image", url.clone()),
        None => form.text("image", String::new()),
    })
}

impl HttpApi {
    pub async fn menu_item(&self, item_id: &str) -> Result<MenuItem, ApiError> {
        let url = format!("{}/api/menu-items/{item_id}", self.config().menu_url);
        self.fetch(self.client().get(url)).await
    }
}

impl MenuBackend for HttpApi {
    async fn menu_for(&self, restaurant_id: &str) -> Result<Vec<MenuItem>, ApiError> {
        let url = format!(
            "{}/api/menu-items/restaurant/{restaurant_id}",
            self.config().menu_url
        );
        self.fetch(self.client().get(url)).await
    }

    async fn create_menu_item(&self, restaurant_id: &str, draft: &MenuItemDraft) -> Result<(), ApiError> {
        draft.validate_for_create()?;
        let form = menu_form(restaurant_id, draft).await?;
        let url = format!("{}/api/menu-items/", self.config().menu_url);
        self.execute(self.client().post(url).multipart(form)).await?;
        Ok(())
    }

    async fn update_menu_item(
        &self,
        item_id: &str,
        restaurant_id: &str,
        draft: &MenuItemDraft,
    ) -> Result<(), ApiError> {
        draft.validate()?;
        let form = menu_form(restaurant_id, draft).await?;
        let url = format!("{}/api/menu-items/{item_id}", self.config().menu_url);
        self.execute(self.client().put(url).multipart(form)).await?;
        Ok(())
    }

    async fn delete_menu_item(&self, item_id: &str) -> Result<(), ApiError> {
        let url = format!("{}/api/menu-items/{item_id}", self.config().menu_url);
        self.execute(self.client().delete(url)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_server::{Recorded, recorded, serve};
    use crate::config::Config;
    use crate::logger::Logger;
    use axum::extract::{Path, State};
    use axum::http::{HeaderMap, StatusCode, header};
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::{Value, json};
    use std::sync::Arc;

    fn draft(image: Option<ImageSource>) -> MenuItemDraft {
        MenuItemDraft {
            name: "Kottu".to_string(),
            description: "Chopped roti".to_string(),
            price: 8.5,
            category: "Mains".to_string(),
            image,
        }
    }

    async fn api() -> (HttpApi, Recorded) {
        let log = Recorded::default();
        let router = Router::new()
            .route(
                "/api/menu-items/",
                post(|State(log): State<Recorded>, headers: HeaderMap| async move {
                    let content_type = headers
                        .get(header::CONTENT_TYPE)
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or_default()
                        .to_string();
                    log.lock().unwrap().push(("create".to_string(), json!(content_type)));
                    StatusCode::CREATED
                }),
            )
            .route(
                "/api/menu-items/restaurant/{id}",
                get(|Path(id): Path<String>| async move {
                    Json(json!([{
                        "restaurantId": id, "_id": "m1", "name": "Kottu", "description": "d",
                        "price": 8.5, "category": "Mains", "imageUrl": "menu/kottu"
                    }]))
                }),
            )
            .with_state(log.clone());
        let base = serve(router).await;
        let api = HttpApi::new(Arc::new(Config::single_host(&base)), Logger::new("api"));
        (api, log)
    }

    #[tokio::test]
    async fn test_create_uploads_multipart_with_image_file() {
        let (api, log) = api().await;
        let dir = tempfile::tempdir().unwrap();
        let image = dir.path().join("kottu.jpg");
        std::fs::write(&image, b"\xff\xd8\xff").unwrap();

        api.create_menu_item("r1", &draft(Some(ImageSource::File(image))))
            .await
            .unwrap();

        let calls = recorded(&log);
        assert_eq!(calls.len(), 1);
        let content_type: Value = calls[0].1.clone();
        assert!(content_type.as_str().unwrap().starts_with("multipart/form-data"));
    }

    #[tokio::test]
    async fn test_create_without_image_is_rejected_locally() {
        let (api, log) = api().await;
        let err = api.create_menu_item("r1", &draft(None)).await.unwrap_err();
        assert!(err.is_validation());
        assert!(recorded(&log).is_empty());
    }

    #[tokio::test]
    async fn test_menu_for_restaurant() {
        let (api, _log) = api().await;
        let menu = api.menu_for("r9").await.unwrap();
        assert_eq!(menu.len(), 1);
        assert_eq!(menu[0].restaurant_id, "r9");
    }
}
