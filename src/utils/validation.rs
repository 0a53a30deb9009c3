use crate::utils::error::{Result, RibbitError};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn invalid_value(field: &str, value: impl ToString, reason: impl Into<String>) -> RibbitError {
    RibbitError::InvalidConfigValueError {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(invalid_value(
            field_name,
            value,
            format!("Value must be between {} and {}", min, max),
        ));
    }
    Ok(())
}
