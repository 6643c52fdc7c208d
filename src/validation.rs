// Validation utilities module
// Custom validation functions for request DTOs

use validator::ValidationError;

/// Rejects empty or whitespace-only required fields
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new("required"))
    } else {
        Ok(())
    }
}
