use crate::api::HttpApi;
use crate::errors::ApiError;
use crate::types::dtos::{
    AuthResponse, Credentials, DeliveryPersonRegistration, RestaurantRegistration,
    UserRegistration,
};
use crate::types::identity::{DeliveryPersonProfile, Identity, Role, UserProfile};
use crate::types::restaurant_info::Restaurant;

impl HttpApi {
    /// Signs in with the endpoint of `role` and returns the new identity.
    pub async fn login(&self, role: Role, credentials: &Credentials) -> Result<Identity, ApiError> {
        credentials.validate()?;
        let url = format!("{}{}", self.config().auth_url, role.login_path());
        let request = self.client().post(url).json(credentials);
        Ok(match role {
            Role::User => {
                let res: AuthResponse<UserProfile> = self.fetch(request).await?;
                Identity::User {
                    token: res.token,
                    profile: res.profile,
                }
            }
            Role::Restaurant => {
                let res: AuthResponse<Restaurant> = self.fetch(request).await?;
                Identity::Restaurant {
                    token: res.token,
                    profile: res.profile,
                }
            }
            Role::DeliveryPerson => {
                let res: AuthResponse<DeliveryPersonProfile> = self.fetch(request).await?;
                Identity::DeliveryPerson {
                    token: res.token,
                    profile: res.profile,
                }
            }
        })
    }

    pub async fn register_user(&self, form: &UserRegistration) -> Result<Identity, ApiError> {
        form.validate()?;
        let url = format!("{}/api/auth/register", self.config().auth_url);
        let res: AuthResponse<UserProfile> = self.fetch(self.client().post(url).json(form)).await?;
        Ok(Identity::User {
            token: res.token,
            profile: res.profile,
        })
    }

    pub async fn register_restaurant(
        &self,
        form: &RestaurantRegistration,
    ) -> Result<Identity, ApiError> {
        form.validate()?;
        let url = format!("{}/api/restaurant/register", self.config().auth_url);
        let res: AuthResponse<Restaurant> = self.fetch(self.client().post(url).json(form)).await?;
        Ok(Identity::Restaurant {
            token: res.token,
            profile: res.profile,
        })
    }

    pub async fn register_delivery_person(
        &self,
        form: &DeliveryPersonRegistration,
    ) -> Result<Identity, ApiError> {
        form.validate()?;
        let url = format!("{}/api/deliveryPerson/register", self.config().auth_url);
        let res: AuthResponse<DeliveryPersonProfile> =
            self.fetch(self.client().post(url).json(form)).await?;
        Ok(Identity::DeliveryPerson {
            token: res.token,
            profile: res.profile,
        })
    }

    pub async fn delivery_profile(&self, id: &str) -> Result<DeliveryPersonProfile, ApiError> {
        let url = format!("{}/api/deliveryPerson/{id}", self.config().auth_url);
        self.fetch(self.client().get(url)).await
    }

    pub async fn update_delivery_profile(
        &self,
        profile: &DeliveryPersonProfile,
    ) -> Result<DeliveryPersonProfile, ApiError> {
        let url = format!("{}/api/deliveryPerson/{}", self.config().auth_url, profile.id);
        self.fetch(self.client().put(url).json(profile)).await
    }

    pub async fn delete_delivery_person(&self, id: &str) -> Result<(), ApiError> {
        let url = format!("{}/api/deliveryPerson/{id}", self.config().auth_url);
        self.execute(self.client().delete(url)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_server::{Recorded, recorded, serve};
    use crate::config::Config;
    use crate::errors::ValidationError;
    use crate::logger::Logger;
    use axum::extract::State;
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{Value, json};
    use std::sync::Arc;

    async fn api_with(router: Router) -> HttpApi {
        let base = serve(router).await;
        HttpApi::new(Arc::new(Config::single_host(&base)), Logger::new("api"))
    }

    fn credentials(password: &str) -> Credentials {
        Credentials {
            email: "kasun@example.com".to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_delivery_login_yields_delivery_identity() {
        let log = Recorded::default();
        let router = Router::new()
            .route(
                "/api/deliveryPerson/login",
                post(|State(log): State<Recorded>, Json(body): Json<Value>| async move {
                    log.lock().unwrap().push(("login".to_string(), body));
                    (
                        StatusCode::CREATED,
                        Json(json!({
                            "token": "jwt",
                            "deliveryPerson": {"_id": "d1", "name": "Saman", "email": "s@example.com", "age": 30}
                        })),
                    )
                }),
            )
            .with_state(log.clone());
        let api = api_with(router).await;

        let identity = api.login(Role::DeliveryPerson, &credentials("pw")).await.unwrap();
        assert_eq!(identity.delivery_person_id(), Some("d1"));
        assert_eq!(identity.token(), Some("jwt"));
        assert_eq!(recorded(&log)[0].1["email"], "kasun@example.com");
    }

    #[tokio::test]
    async fn test_rejected_login_surfaces_server_message() {
        let router = Router::new().route(
            "/api/auth/login",
            post(|| async {
                (StatusCode::UNAUTHORIZED, Json(json!({"message": "Invalid credentials"})))
            }),
        );
        let api = api_with(router).await;

        match api.login(Role::User, &credentials("bad")).await {
            Err(ApiError::Remote { status, message }) => {
                assert_eq!(status, 401);
                assert_eq!(message, "Invalid credentials");
            }
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_registration_mismatch_never_reaches_the_server() {
        let log = Recorded::default();
        let router = Router::new()
            .route(
                "/api/auth/register",
                post(|State(log): State<Recorded>, Json(body): Json<Value>| async move {
                    log.lock().unwrap().push(("register".to_string(), body));
                    StatusCode::CREATED
                }),
            )
            .with_state(log.clone());
        let api = api_with(router).await;

        let form = UserRegistration {
            username: "kasun".to_string(),
            email: "kasun@example.com".to_string(),
            password: "one".to_string(),
            confirmed_password: "two".to_string(),
        };
        let err = api.register_user(&form).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(ValidationError::PasswordMismatch)));
        assert!(recorded(&log).is_empty());
    }
}
