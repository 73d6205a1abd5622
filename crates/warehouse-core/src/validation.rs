//! # Validation Module
//!
//! The barcode validator and the field rules applied before any form is
//! submitted.
//!
//! ## Where Validation Runs
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Recognizer candidate ──► is_valid_barcode() ──► invalid: ignored       │
//! │                                                                         │
//! │  Manual entry ──────────► validate_barcode() ──► invalid: message       │
//! │                                                                         │
//! │  Form submit ───────────► validate_product_name / validate_quantity     │
//! │                           validate_entity_name                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Inventory API (server-side NOT NULL / foreign key constraints)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use warehouse_core::validation::{validate_barcode, validate_quantity};
//!
//! assert_eq!(validate_barcode("  4006381333931 ").unwrap(), "4006381333931");
//! assert!(validate_quantity(0).is_err());
//! ```

use crate::error::ValidationError;
use crate::{
    MAX_BARCODE_LEN, MAX_ENTITY_NAME_LEN, MAX_ITEM_QUANTITY, MAX_PRODUCT_NAME_LEN,
    MIN_BARCODE_LEN,
};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Barcode Validator
// =============================================================================

/// Characters allowed in a barcode besides ASCII alphanumerics and whitespace.
const BARCODE_PUNCTUATION: [char; 6] = ['-', '.', '$', '+', '%', '/'];

/// Whitespace as browsers define it for `\s` and `trim()`.
///
/// Differs from [`char::is_whitespace`]: U+FEFF counts, U+0085 does not.
fn is_barcode_space(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n'
            | '\u{000B}'
            | '\u{000C}'
            | '\r'
            | ' '
            | '\u{00A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

fn is_barcode_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || is_barcode_space(c) || BARCODE_PUNCTUATION.contains(&c)
}

/// Validates a barcode and returns the trimmed code.
///
/// ## Rules
/// - Length between 3 and 50 characters after trimming whitespace
/// - Only digits, ASCII letters, `-`, `.`, `$`, `+`, `%`, `/` and whitespace
///
/// ## Example
/// ```rust
/// use warehouse_core::validation::validate_barcode;
///
/// assert!(validate_barcode("CODE-39 $1").is_ok());
/// assert!(validate_barcode("ab").is_err());
/// assert!(validate_barcode("12345_678").is_err());
/// ```
pub fn validate_barcode(code: &str) -> ValidationResult<String> {
    let code = code.trim_matches(is_barcode_space);

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "barcode".to_string(),
        });
    }

    let len = code.chars().count();
    if len < MIN_BARCODE_LEN {
        return Err(ValidationError::TooShort {
            field: "barcode".to_string(),
            min: MIN_BARCODE_LEN,
        });
    }

    if len > MAX_BARCODE_LEN {
        return Err(ValidationError::TooLong {
            field: "barcode".to_string(),
            max: MAX_BARCODE_LEN,
        });
    }

    if !code.chars().all(is_barcode_char) {
        return Err(ValidationError::InvalidFormat {
            field: "barcode".to_string(),
            reason: "must contain only letters, digits, spaces and - . $ + % /".to_string(),
        });
    }

    Ok(code.to_string())
}

/// Predicate form of [`validate_barcode`].
///
/// Total and deterministic; never panics.
#[inline]
pub fn is_valid_barcode(code: &str) -> bool {
    validate_barcode(code).is_ok()
}

/// Validates a code that may be absent.
///
/// Recognizers can report a frame result without any decoded text; an
/// absent code is never valid.
pub fn is_valid_candidate(code: Option<&str>) -> bool {
    code.is_some_and(is_valid_barcode)
}

// =============================================================================
// Form Field Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty
/// - At most 200 characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    validate_required_text("product_name", name, MAX_PRODUCT_NAME_LEN)
}

/// Validates a zone or box name.
///
/// ## Rules
/// - Must not be empty
/// - At most 100 characters
pub fn validate_entity_name(field: &str, name: &str) -> ValidationResult<()> {
    validate_required_text(field, name, MAX_ENTITY_NAME_LEN)
}

fn validate_required_text(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

/// Validates an item quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
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

    #[test]
    fn test_length_bounds() {
        assert!(!is_valid_barcode(""));
        assert!(!is_valid_barcode("ab"));
        assert!(is_valid_barcode("abc"));
        assert!(is_valid_barcode(&"7".repeat(50)));
        assert!(!is_valid_barcode(&"7".repeat(51)));
    }

    #[test]
    fn test_length_is_measured_after_trim() {
        assert!(!is_valid_barcode("  ab  "));
        assert!(is_valid_barcode(&format!("  {}  ", "1".repeat(50))));
        assert_eq!(validate_barcode("\t123\n").unwrap(), "123");
    }

    #[test]
    fn test_whitespace_follows_browser_set() {
        assert!(is_valid_barcode("123\u{FEFF}456"));
        assert!(is_valid_barcode("123\u{00A0}456"));
        assert!(is_valid_barcode("123\u{3000}456"));
        assert!(!is_valid_barcode("123\u{0085}456"));
        assert!(!is_valid_barcode("123\u{180E}456"));

        assert_eq!(validate_barcode("\u{FEFF}4006381333931\u{FEFF}").unwrap(), "4006381333931");
        assert!(!is_valid_barcode("\u{0085}ab\u{0085}"));
    }

    #[test]
    fn test_accepts_whole_alphabet() {
        assert!(is_valid_barcode("4006381333931"));
        assert!(is_valid_barcode("ABC-abc.$+%/ 09"));
        assert!(is_valid_barcode("CODE 39"));
    }

    #[test]
    fn test_rejects_any_foreign_character() {
        for bad in ['_', '#', '*', '@', 'é', 'Ж', '"', '\'', ';', '(', '€'] {
            let code = format!("123{}456", bad);
            assert!(!is_valid_barcode(&code), "accepted {:?}", code);
        }
    }

    #[test]
    fn test_every_allowed_char_in_every_position() {
        let allowed = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz-.$+%/";
        for c in allowed.chars() {
            assert!(is_valid_barcode(&format!("{c}00")));
            assert!(is_valid_barcode(&format!("0{c}0")));
            assert!(is_valid_barcode(&format!("00{c}")));
        }
    }

    #[test]
    fn test_candidate_absent_is_invalid() {
        assert!(!is_valid_candidate(None));
        assert!(is_valid_candidate(Some("4006381333931")));
    }

    #[test]
    fn test_validate_barcode_reasons() {
        assert!(matches!(
            validate_barcode("   "),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            validate_barcode("ab"),
            Err(ValidationError::TooShort { min: 3, .. })
        ));
        assert!(matches!(
            validate_barcode(&"x".repeat(60)),
            Err(ValidationError::TooLong { max: 50, .. })
        ));
        assert!(matches!(
            validate_barcode("12_34"),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Bolts M8").is_ok());
        assert!(validate_product_name("   ").is_err());
        assert!(validate_product_name(&"A".repeat(201)).is_err());
    }

    #[test]
    fn test_validate_entity_name() {
        assert!(validate_entity_name("zone name", "Cold storage").is_ok());
        let err = validate_entity_name("box name", "").unwrap_err();
        assert_eq!(err.field(), "box name");
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(MAX_ITEM_QUANTITY).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-3).is_err());
        assert!(validate_quantity(MAX_ITEM_QUANTITY + 1).is_err());
    }
}
