//! Factory error contract.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub type FactoryResult<T> = Result<T, FactoryError>;

/// Validation and lookup failures raised by `ModelFactory`.
///
/// Messages are stable and may be matched by callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactoryError {
    /// Type argument absent or not in the type registry.
    TypeNotRecognized,
    /// Object handed to `add_object` is not an admissible entity.
    InvalidArgument,
    /// Valid type, but nothing stored under the requested id.
    NotFound,
    /// Malformed `update_object` input.
    IllegalUpdateArgument,
}

impl FactoryError {
    pub fn message(self) -> &'static str {
        match self {
            Self::TypeNotRecognized => "Type not recognized",
            Self::InvalidArgument => "Invalid argument",
            Self::NotFound => "Not found",
            Self::IllegalUpdateArgument => "Illegal argument for ModelFactory::update_object",
        }
    }

    /// Stable snake_case code used in log events.
    pub fn code(self) -> &'static str {
        match self {
            Self::TypeNotRecognized => "type_not_recognized",
            Self::InvalidArgument => "invalid_argument",
            Self::NotFound => "not_found",
            Self::IllegalUpdateArgument => "illegal_update_argument",
        }
    }
}

impl Display for FactoryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl Error for FactoryError {}

#[cfg(test)]
mod tests {
    use super::FactoryError;

    #[test]
    fn display_uses_stable_messages() {
        assert_eq!(
            FactoryError::TypeNotRecognized.to_string(),
            "Type not recognized"
        );
        assert_eq!(FactoryError::InvalidArgument.to_string(), "Invalid argument");
        assert_eq!(FactoryError::NotFound.to_string(), "Not found");
        assert_eq!(
            FactoryError::IllegalUpdateArgument.to_string(),
            "Illegal argument for ModelFactory::update_object"
        );
    }
}
