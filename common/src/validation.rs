//! Form checks that run before any network call.

use crate::errors::ValidationError;

pub fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(())
}

pub fn require_quantity(quantity: u32) -> Result<u32, ValidationError> {
    if quantity < 1 {
        return Err(ValidationError::InvalidQuantity(quantity));
    }
    Ok(quantity)
}

/// Returns the trimmed address. Whitespace-only counts as empty.
pub fn require_address(address: &str) -> Result<String, ValidationError> {
    let trimmed = address.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyAddress);
    }
    Ok(trimmed.to_string())
}

pub fn max_len(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(())
}

pub fn require_positive(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !(value > 0.0) {
        return Err(ValidationError::NotPositive(field));
    }
    Ok(())
}

pub fn require_rating(rating: u8) -> Result<(), ValidationError> {
    if !(1..=5).contains(&rating) {
        return Err(ValidationError::InvalidRating(rating));
    }
    Ok(())
}

pub fn passwords_match(password: &str, confirmation: &str) -> Result<(), ValidationError> {
    if password != confirmation {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantity_below_one_is_rejected() {
        assert_eq!(require_quantity(0), Err(ValidationError::InvalidQuantity(0)));
        assert_eq!(require_quantity(1), Ok(1));
    }

    #[test]
    fn test_blank_address_is_rejected() {
        assert_eq!(require_address(""), Err(ValidationError::EmptyAddress));
        assert_eq!(require_address("  \t"), Err(ValidationError::EmptyAddress));
        assert_eq!(require_address(" 12 Galle Rd "), Ok("12 Galle Rd".to_string()));
    }

    #[test]
    fn test_positive_rejects_nan() {
        assert!(require_positive("Price", f64::NAN).is_err());
        assert!(require_positive("Price", 0.0).is_err());
        assert!(require_positive("Price", 0.5).is_ok());
    }

    #[test]
    fn test_max_len_counts_chars() {
        assert!(max_len("Name", "ééé", 3).is_ok());
        assert!(max_len("Name", "éééé", 3).is_err());
    }
}
