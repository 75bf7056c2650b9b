//! Validation error types

use std::fmt;

use serde::Serialize;

/// A single field that failed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required field absent from the request
    Missing { field: &'static str },

    /// Field present but blank after trimming
    Empty { field: &'static str },

    /// Field exceeds maximum length
    TooLong { field: &'static str, max: usize },

    /// Value doesn't match the expected format (e.g., integer, ObjectId)
    InvalidFormat { field: &'static str, reason: &'static str },

    /// Numeric value outside the accepted range
    OutOfRange { field: &'static str, min: i64, max: i64 },
}

impl ValidationError {
    /// Name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Missing { field }
            | Self::Empty { field }
            | Self::TooLong { field, .. }
            | Self::InvalidFormat { field, .. }
            | Self::OutOfRange { field, .. } => field,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { field } => write!(f, "{} is required", field),
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::TooLong { field, max } => {
                write!(f, "{} exceeds maximum length of {} characters", field, max)
            }
            Self::InvalidFormat { field, reason } => write!(f, "{}: {}", field, reason),
            Self::OutOfRange { field, min, max } => {
                write!(f, "{} must be between {} and {}", field, min, max)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Field error as reported to API clients
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldError {
    pub campo: &'static str,
    pub mensaje: String,
}

impl From<&ValidationError> for FieldError {
    fn from(e: &ValidationError) -> Self {
        Self {
            campo: e.field(),
            mensaje: e.to_string(),
        }
    }
}

/// Every problem found while validating one request
///
/// Never empty: validators return `Ok` when nothing was collected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, err: ValidationError) {
        self.0.push(err);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    /// True if any error concerns `field`.
    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field() == field)
    }

    pub fn field_errors(&self) -> Vec<FieldError> {
        self.0.iter().map(FieldError::from).collect()
    }

    /// Collapse into `Ok(value)` when nothing was recorded.
    pub fn finish<T>(self, value: impl FnOnce() -> T) -> Result<T, Self> {
        if self.0.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(e: ValidationError) -> Self {
        Self(vec![e])
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        f.write_str(&messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::TooLong {
            field: "nombreReal",
            max: 60,
        };
        assert_eq!(
            err.to_string(),
            "nombreReal exceeds maximum length of 60 characters"
        );
    }

    #[test]
    fn joined_display_and_field_errors() {
        let mut errors = ValidationErrors::new();
        errors.push(ValidationError::Missing { field: "edad" });
        errors.push(ValidationError::Empty { field: "nombreReal" });

        assert_eq!(errors.to_string(), "edad is required; nombreReal cannot be empty");
        assert!(errors.has_field("edad"));
        assert!(!errors.has_field("poderes"));

        let fields = errors.field_errors();
        assert_eq!(fields[1].campo, "nombreReal");
    }

    #[test]
    fn finish_without_errors_is_ok() {
        let errors = ValidationErrors::new();
        assert_eq!(errors.finish(|| 7), Ok(7));
    }
}
