//! # Validation Module
//!
//! Input validation utilities for Estoque.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend (React)                                             │
//! │  └── Required fields, numeric inputs                                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: axum extractors (Rust)                                       │
//! │  ├── Type validation (deserialization)                                 │
//! │  └── THIS MODULE: Business rule validation                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Inventory store                                              │
//! │  ├── Category / product existence                                      │
//! │  └── Stock sufficiency                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use estoque_core::validation::{validate_description, validate_sale_quantity};
//!
//! assert!(validate_description("Bebidas").is_ok());
//! assert!(validate_sale_quantity(0).is_err());
//! ```

use rust_decimal::Decimal;

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted category or product description.
pub const MAX_DESCRIPTION_LEN: usize = 200;

/// Username length bounds (the `usuarios.username` column is 50 wide).
pub const MIN_USERNAME_LEN: usize = 3;
pub const MAX_USERNAME_LEN: usize = 50;

/// Shortest accepted password.
pub const MIN_PASSWORD_LEN: usize = 6;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a category or product description.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most 200 characters
pub fn validate_description(description: &str) -> ValidationResult<()> {
    let description = description.trim();

    if description.is_empty() {
        return Err(ValidationError::Required {
            field: "descricao".to_string(),
        });
    }

    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(ValidationError::TooLong {
            field: "descricao".to_string(),
            max: MAX_DESCRIPTION_LEN,
        });
    }

    Ok(())
}

/// Validates a username for registration.
///
/// ## Example
/// ```rust
/// use estoque_core::validation::validate_username;
///
/// assert!(validate_username("maria").is_ok());
/// assert!(validate_username("ab").is_err());
/// ```
pub fn validate_username(username: &str) -> ValidationResult<()> {
    let len = username.trim().chars().count();

    if len == 0 {
        return Err(ValidationError::Required {
            field: "username".to_string(),
        });
    }

    if len < MIN_USERNAME_LEN {
        return Err(ValidationError::TooShort {
            field: "username".to_string(),
            min: MIN_USERNAME_LEN,
        });
    }

    if len > MAX_USERNAME_LEN {
        return Err(ValidationError::TooLong {
            field: "username".to_string(),
            max: MAX_USERNAME_LEN,
        });
    }

    Ok(())
}

/// Validates a password for registration. Whitespace counts.
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::TooShort {
            field: "password".to_string(),
            min: MIN_PASSWORD_LEN,
        });
    }
    Ok(())
}

/// Validates a user's display name.
pub fn validate_full_name(full_name: &str) -> ValidationResult<()> {
    if full_name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "full_name".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Unit values may be zero (giveaways) but never negative.
pub fn validate_unit_value(value: Decimal) -> ValidationResult<()> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ValidationError::MustNotBeNegative {
            field: "valor".to_string(),
        });
    }
    Ok(())
}

/// Validates a stock or suggested quantity.
pub fn validate_non_negative(field: &str, value: i64) -> ValidationResult<()> {
    if value < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates the quantity of a sale.
pub fn validate_sale_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantidade".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_validate_description() {
        assert!(validate_description("Bebidas").is_ok());
        assert!(validate_description("   ").is_err());
        assert!(validate_description(&"x".repeat(200)).is_ok());
        assert!(matches!(
            validate_description(&"x".repeat(201)),
            Err(ValidationError::TooLong { max: 200, .. })
        ));
    }

    #[test]
    fn test_validate_username() {
        assert!(validate_username("ana").is_ok());
        assert!(validate_username("").is_err());
        assert!(validate_username("ab").is_err());
        assert!(validate_username(&"u".repeat(51)).is_err());
    }

    #[test]
    fn test_validate_password_and_name() {
        assert!(validate_password("secret").is_ok());
        assert!(validate_password("12345").is_err());
        assert!(validate_full_name("Ana Souza").is_ok());
        assert!(validate_full_name(" ").is_err());
    }

    #[test]
    fn test_numeric_validators() {
        assert!(validate_unit_value(dec!(0)).is_ok());
        assert!(validate_unit_value(dec!(-0.01)).is_err());
        assert!(validate_non_negative("quantidade_estoque", 0).is_ok());
        assert!(validate_non_negative("quantidade_estoque", -1).is_err());
        assert!(validate_sale_quantity(1).is_ok());
        assert!(validate_sale_quantity(0).is_err());
        assert!(validate_sale_quantity(-2).is_err());
    }
}
