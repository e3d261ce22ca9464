use crate::errors::ValidationError;
use crate::types::cart::CatalogRef;
use crate::validation::{require, require_positive};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub restaurant_id: String,
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub image_url: String,
}

impl MenuItem {
    pub fn catalog_ref(&self) -> CatalogRef {
        CatalogRef {
            id: self.id.clone(),
            name: self.name.clone(),
            price: self.price,
            image_url: (!self.image_url.is_empty()).then(|| self.image_url.clone()),
        }
    }
}

/// Where the image of a created or updated menu item comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Local file uploaded as the multipart `image` part.
    File(PathBuf),
    /// Already hosted image, sent back as a plain text part.
    Existing(String),
}

/// Fields of the create/update menu item forms.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuItemDraft {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub image: Option<ImageSource>,
}

impl MenuItemDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("Name", &self.name)?;
        require("Description", &self.description)?;
        require("Category", &self.category)?;
        require_positive("Price", self.price)
    }

    pub fn validate_for_create(&self) -> Result<(), ValidationError> {
        self.validate()?;
        if self.image.is_none() {
            return Err(ValidationError::MissingField("Image"));
        }
        Ok(())
    }
}

/// Menu grouped by category, categories in alphabetical order.
pub fn group_by_category(items: &[MenuItem]) -> BTreeMap<&str, Vec<&MenuItem>> {
    let mut groups: BTreeMap<&str, Vec<&MenuItem>> = BTreeMap::new();
    for item in items {
        let category = if item.category.is_empty() {
            "Other"
        } else {
            item.category.as_str()
        };
        groups.entry(category).or_default().push(item);
    }
    groups
}
