use serde::{Deserialize, Serialize};
use serde_with::{NoneAsEmptyString, serde_as};

/// Denormalized catalog entry carried inside a cart line.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogRef {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub price: f64,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(rename = "itemId")]
    pub item: CatalogRef,
    pub quantity: u32,
}

impl CartItem {
    pub fn line_total(&self) -> f64 {
        self.item.price * f64::from(self.quantity)
    }
}

/// Body of `GET /api/cart/{userId}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CartContents {
    #[serde(default)]
    pub items: Vec<CartItem>,
}

pub fn cart_total(items: &[CartItem]) -> f64 {
    items.iter().map(CartItem::line_total).sum()
}

pub fn cart_quantity(items: &[CartItem]) -> u32 {
    items.iter().map(|item| item.quantity).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_body_with_populated_items() {
        let raw = r#"{"items":[
            {"itemId":{"_id":"i1","name":"Lamprais","price":12.5,"imageUrl":""},"quantity":2},
            {"itemId":{"_id":"i2","name":"Wattalapam","price":4.0,"imageUrl":"menu/watta"},"quantity":1}
        ]}"#;
        let cart: CartContents = serde_json::from_str(raw).unwrap();
        assert_eq!(cart.items[0].item.image_url, None);
        assert_eq!(cart.items[1].item.image_url.as_deref(), Some("menu/watta"));
        assert_eq!(cart_total(&cart.items), 29.0);
        assert_eq!(cart_quantity(&cart.items), 3);
    }

    #[test]
    fn test_missing_items_is_empty_cart() {
        let cart: CartContents = serde_json::from_str("{}").unwrap();
        assert!(cart.items.is_empty());
    }
}
