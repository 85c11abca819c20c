//! # Validation Module
//!
//! Input validation run before a payload leaves the client.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Operator input (console / front end)                         │
//! │  └── Immediate feedback                                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Required fields, lengths, email shape                             │
//! │  └── Quantities >= 1, prices >= 0                                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Remote API                                                   │
//! │  └── Authoritative checks (uniqueness, references, pricing)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use vendora_core::validation::{validate_email, validate_quantity};
//!
//! assert!(validate_email("ana@shop.test").is_ok());
//! assert!(validate_quantity(0).is_err());
//! ```

use crate::dto::{CreateClientDto, CreateProductDto, CreateUserDto};
use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Minimum password length for self-registration.
pub const MIN_PASSWORD_LEN: usize = 8;

// =============================================================================
// String Validators
// =============================================================================

/// Checks that a trimmed value is present and within `min..=max` characters.
pub fn validate_length(field: &str, value: &str, min: usize, max: usize) -> ValidationResult<()> {
    let value = value.trim();
    let len = value.chars().count();

    if len == 0 {
        return Err(ValidationError::required(field));
    }

    if len < min {
        return Err(ValidationError::TooShort {
            field: field.to_string(),
            min,
        });
    }

    if len > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

/// Validates a non-empty identifier (product, client, sale IDs).
pub fn validate_id(field: &str, id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::required(field));
    }
    Ok(())
}

/// Validates a product or category name.
///
/// ## Rules
/// - Must not be empty
/// - At most 200 characters
pub fn validate_catalog_name(name: &str) -> ValidationResult<()> {
    validate_length("name", name, 1, 200)
}

/// Validates an email address shape.
///
/// ## Rules
/// - Exactly one `@`
/// - Non-empty local part
/// - Domain with at least one dot, not at either end
/// - No whitespace
///
/// ## Example
/// ```rust
/// use vendora_core::validation::validate_email;
///
/// assert!(validate_email("ana@shop.test").is_ok());
/// assert!(validate_email("ana@shop").is_err());
/// assert!(validate_email("").is_err());
/// ```
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::required("email"));
    }

    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: "email".to_string(),
        reason: reason.to_string(),
    };

    if email.chars().any(char::is_whitespace) {
        return Err(invalid("must not contain spaces"));
    }

    let (local, domain) = email
        .split_once('@')
        .ok_or_else(|| invalid("missing @"))?;

    if local.is_empty() || domain.contains('@') {
        return Err(invalid("must be name@domain"));
    }

    if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return Err(invalid("domain must contain a dot"));
    }

    Ok(())
}

/// Validates a password against a minimum length.
pub fn validate_password(password: &str, min: usize) -> ValidationResult<()> {
    if password.is_empty() {
        return Err(ValidationError::required("password"));
    }

    if password.chars().count() < min {
        return Err(ValidationError::TooShort {
            field: "password".to_string(),
            min,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a line-item quantity.
///
/// ## Rules
/// - Must be at least 1
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Sale composer: Add Item                                                │
/// │                                                                         │
/// │  Operator stages quantity: 0                                           │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_quantity(0) ← THIS FUNCTION                                  │
/// │       │                                                                 │
/// │       ├── qty < 1? → rejected, pending sale unchanged                  │
/// │       │                                                                 │
/// │       └── OK → merge or append the line                                │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty < 1 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }
    Ok(())
}

/// Validates a unit price. Zero is allowed (free items).
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::Negative {
            field: "price".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Payload Validators
// =============================================================================

/// Validates a new product before upload.
pub fn validate_create_product(dto: &CreateProductDto) -> ValidationResult<()> {
    validate_catalog_name(&dto.name)?;
    validate_id("categoryId", &dto.category_id)?;
    validate_price(dto.price)
}

/// Validates a new client.
///
/// ## Rules
/// | Field   | Length  |
/// |---------|---------|
/// | name    | 3..=50  |
/// | phone   | 3..=15  |
/// | address | 3..=200 |
/// | zipCode | 3..=8   |
pub fn validate_create_client(dto: &CreateClientDto) -> ValidationResult<()> {
    validate_length("name", &dto.name, 3, 50)?;
    validate_email(&dto.email)?;
    validate_length("phone", &dto.phone, 3, 15)?;
    validate_length("address", &dto.address, 3, 200)?;
    validate_length("zipCode", &dto.zip_code, 3, 8)
}

/// Validates a registration / new user payload.
pub fn validate_create_user(dto: &CreateUserDto) -> ValidationResult<()> {
    validate_length("name", &dto.name, 3, 50)?;
    validate_email(&dto.email)?;
    validate_password(&dto.password, MIN_PASSWORD_LEN)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> CreateClientDto {
        CreateClientDto {
            name: "Ana Perez".to_string(),
            email: "ana@shop.test".to_string(),
            phone: "555-0100".to_string(),
            address: "Main Street 1".to_string(),
            zip_code: "1000".to_string(),
        }
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(250).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-3).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Money::from_cents(1099)).is_ok());
        assert!(validate_price(Money::zero()).is_ok());
        assert!(matches!(
            validate_price(Money::from_cents(-1)),
            Err(ValidationError::Negative { .. })
        ));
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("ana@shop.test").is_ok());
        assert!(validate_email("  ana@shop.test ").is_ok());
        assert!(validate_email("ana.shop.test").is_err());
        assert!(validate_email("@shop.test").is_err());
        assert!(validate_email("ana@shop.").is_err());
        assert!(validate_email("ana@@shop.test").is_err());
        assert!(validate_email("an a@shop.test").is_err());
    }

    #[test]
    fn test_validate_length_counts_chars() {
        assert!(validate_length("name", "Ñoño", 3, 4).is_ok());
        assert!(matches!(
            validate_length("name", "  ", 1, 10),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            validate_length("zipCode", "123456789", 3, 8),
            Err(ValidationError::TooLong { max: 8, .. })
        ));
    }

    #[test]
    fn test_validate_create_client() {
        assert!(validate_create_client(&client()).is_ok());

        let mut short_zip = client();
        short_zip.zip_code = "12".to_string();
        assert!(validate_create_client(&short_zip).is_err());
    }

    #[test]
    fn test_validate_create_user_requires_long_password() {
        let dto = CreateUserDto {
            name: "Ana".to_string(),
            email: "ana@shop.test".to_string(),
            password: "short".to_string(),
            is_active: None,
        };
        assert!(matches!(
            validate_create_user(&dto),
            Err(ValidationError::TooShort { min: 8, .. })
        ));
    }
}
