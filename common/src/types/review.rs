use crate::constants::{REVIEW_NAME_MAX_LEN, REVIEW_TEXT_MAX_LEN};
use crate::errors::ValidationError;
use crate::validation::{max_len, require, require_rating};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(rename = "_id")]
    pub id: String,
    pub customer_name: String,
    pub review_text: String,
    pub rating: u8,
    pub restaurant_id: String,
    #[serde(default)]
    pub customer_id: Option<String>,
}

/// Body of create and update requests.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDraft {
    pub customer_name: String,
    pub review_text: String,
    pub rating: u8,
    pub restaurant_id: String,
    pub customer_id: String,
}

impl ReviewDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("Name", &self.customer_name)?;
        max_len("Name", &self.customer_name, REVIEW_NAME_MAX_LEN)?;
        require("Review", &self.review_text)?;
        max_len("Review", &self.review_text, REVIEW_TEXT_MAX_LEN)?;
        require_rating(self.rating)
    }
}

/// Average rating rounded to one decimal, `None` without reviews.
pub fn average_rating(reviews: &[Review]) -> Option<f64> {
    if reviews.is_empty() {
        return None;
    }
    let sum: u32 = reviews.iter().map(|r| u32::from(r.rating)).sum();
    let avg = f64::from(sum) / reviews.len() as f64;
    Some((avg * 10.0).round() / 10.0)
}
