use crate::errors::ValidationError;
use crate::types::restaurant_info::Restaurant;
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, PickFirst, serde_as};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Role {
    User,
    Restaurant,
    DeliveryPerson,
}

impl Role {
    /// Path segment of the role's auth endpoints.
    pub fn login_path(self) -> &'static str {
        match self {
            Role::User => "/api/auth/login",
            Role::Restaurant => "/api/restaurant/login",
            Role::DeliveryPerson => "/api/deliveryPerson/login",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Restaurant => "restaurant",
            Role::DeliveryPerson => "deliveryPerson",
        }
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "user" | "customer" => Ok(Role::User),
            "restaurant" => Ok(Role::Restaurant),
            "deliveryperson" | "delivery-person" | "delivery" => Ok(Role::DeliveryPerson),
            other => Err(ValidationError::UnknownRole(other.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub role: Option<String>,
}

#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryPersonProfile {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub mobile: String,
    #[serde(default)]
    pub role: Option<String>,
    /// Registration forms send the age as text, profiles return a number.
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub age: Option<u32>,
    #[serde(rename = "NIC", default)]
    pub nic: String,
    #[serde(default)]
    pub vehicle_number: String,
    #[serde(default)]
    pub current_location: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub license_number: String,
    #[serde(default)]
    pub is_available: bool,
}

/// Who is using the app right now. Only one role can be signed in at a time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "camelCase")]
pub enum Identity {
    #[default]
    Guest,
    User { token: String, profile: UserProfile },
    Restaurant { token: String, profile: Restaurant },
    DeliveryPerson {
        token: String,
        profile: DeliveryPersonProfile,
    },
}

impl Identity {
    pub fn role(&self) -> Option<Role> {
        match self {
            Identity::Guest => None,
            Identity::User { .. } => Some(Role::User),
            Identity::Restaurant { .. } => Some(Role::Restaurant),
            Identity::DeliveryPerson { .. } => Some(Role::DeliveryPerson),
        }
    }

    pub fn is_guest(&self) -> bool {
        matches!(self, Identity::Guest)
    }

    pub fn token(&self) -> Option<&str> {
        match self {
            Identity::Guest => None,
            Identity::User { token, .. }
            | Identity::Restaurant { token, .. }
            | Identity::DeliveryPerson { token, .. } => Some(token),
        }
    }

    /// Backend id of the signed-in principal, whatever its role.
    pub fn principal_id(&self) -> Option<&str> {
        match self {
            Identity::Guest => None,
            Identity::User { profile, .. } => Some(&profile.id),
            Identity::Restaurant { profile, .. } => Some(&profile.id),
            Identity::DeliveryPerson { profile, .. } => Some(&profile.id),
        }
    }

    pub fn user_id(&self) -> Option<&str> {
        match self {
            Identity::User { profile, .. } => Some(&profile.id),
            _ => None,
        }
    }

    pub fn restaurant_id(&self) -> Option<&str> {
        match self {
            Identity::Restaurant { profile, .. } => Some(&profile.id),
            _ => None,
        }
    }

    pub fn delivery_person_id(&self) -> Option<&str> {
        match self {
            Identity::DeliveryPerson { profile, .. } => Some(&profile.id),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Identity::Guest => "guest",
            Identity::User { profile, .. } => &profile.username,
            Identity::Restaurant { profile, .. } => &profile.name,
            Identity::DeliveryPerson { profile, .. } => &profile.name,
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn user(id: &str) -> Identity {
        Identity::User {
            token: format!("token-{id}"),
            profile: UserProfile {
                id: id.to_string(),
                username: "kasun".to_string(),
                email: "kasun@example.com".to_string(),
                role: Some("user".to_string()),
            },
        }
    }

    pub fn delivery_person(id: &str) -> Identity {
        Identity::DeliveryPerson {
            token: format!("token-{id}"),
            profile: DeliveryPersonProfile {
                id: id.to_string(),
                name: "Saman".to_string(),
                email: "saman@example.com".to_string(),
                mobile: "0711111111".to_string(),
                role: Some("deliveryPerson".to_string()),
                age: Some(29),
                nic: "951234567V".to_string(),
                vehicle_number: "WP-BAA-1234".to_string(),
                current_location: "Colombo 03".to_string(),
                address: "4 Flower Rd".to_string(),
                license_number: "B1234567".to_string(),
                is_available: true,
            },
        }
    }
}
