use crate::utils::error::{Result, UfcError};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(UfcError::InvalidValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(UfcError::InvalidValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// A plate reading: finite and non-negative.
pub fn validate_count(field_name: &str, value: f64) -> Result<()> {
    let reason = if !value.is_finite() {
        "Count must be a finite number"
    } else if value < 0.0 {
        "Count cannot be negative"
    } else {
        return Ok(());
    };

    Err(UfcError::InvalidValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(UfcError::InvalidValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}
