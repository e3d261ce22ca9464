use serde::{Deserialize, Serialize};

/// Restaurant profile as returned by the auth service. `image_url` holds an
/// image-host public id, not a full URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub owner_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub mobile: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(rename = "imageUrl", default)]
    pub image_url: String,
}
