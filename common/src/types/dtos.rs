//! Request and response bodies of the auth service.

use crate::errors::ValidationError;
use crate::validation::{passwords_match, require};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("Email", &self.email)?;
        require("Password", &self.password)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserRegistration {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(skip)]
    pub confirmed_password: String,
}

impl UserRegistration {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("Username", &self.username)?;
        require("Email", &self.email)?;
        require("Password", &self.password)?;
        passwords_match(&self.password, &self.confirmed_password)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RestaurantRegistration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub location: String,
    pub owner_name: String,
    pub mobile: String,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
    pub role: &'static str,
}

impl RestaurantRegistration {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("Name", &self.name)?;
        require("Email", &self.email)?;
        require("Password", &self.password)?;
        require("Location", &self.location)?;
        require("Owner name", &self.owner_name)?;
        require("Mobile", &self.mobile)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryPersonRegistration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirmed_password: String,
    pub mobile: String,
    pub age: String,
    #[serde(rename = "NIC")]
    pub nic: String,
    pub vehicle_number: String,
    pub current_location: String,
    pub address: String,
    pub license_number: String,
}

impl DeliveryPersonRegistration {
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [
            ("Name", &self.name),
            ("Email", &self.email),
            ("Password", &self.password),
            ("Mobile", &self.mobile),
            ("NIC", &self.nic),
            ("Vehicle number", &self.vehicle_number),
            ("License number", &self.license_number),
        ] {
            require(field, value)?;
        }
        passwords_match(&self.password, &self.confirmed_password)
    }
}

/// `{ token, user | restaurant | deliveryPerson }`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuthResponse<P> {
    pub token: String,
    #[serde(alias = "user", alias = "restaurant", alias = "deliveryPerson")]
    pub profile: P,
}
