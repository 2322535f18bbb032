//! Naming rules shared by agent and tool identifiers.

use thiserror::Error;

/// Longest accepted identifier, in bytes.
pub const MAX_ID_LENGTH: usize = 128;

/// Why a name was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdValidationError {
    #[error("Identifier cannot be empty")]
    Empty,

    #[error("Identifier cannot be whitespace-only")]
    WhitespaceOnly,

    #[error("Identifier cannot start or end with whitespace")]
    SurroundingWhitespace,

    #[error("Identifier is {length} bytes long, limit is {MAX_ID_LENGTH}")]
    TooLong { length: usize },

    #[error("Identifier cannot contain relative path segments")]
    PathTraversal,

    #[error("Identifier contains '{0}'; only alphanumerics, '-', '_' and '.' are allowed")]
    InvalidCharacter(char),
}

/// Check a candidate name.
///
/// Accepted names are non-empty, at most [`MAX_ID_LENGTH`] bytes, carry no
/// surrounding whitespace, contain neither `../` nor `./`, and use only
/// alphanumerics, `-`, `_` and `.`.
///
/// ```rust
/// use agora_core::identifiers::validate_id;
///
/// assert!(validate_id("agent-1").is_ok());
/// assert!(validate_id("").is_err());
/// assert!(validate_id("../etc").is_err());
/// assert!(validate_id("agent/path").is_err());
/// ```
pub fn validate_id(name: &str) -> Result<(), IdValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(if name.is_empty() {
            IdValidationError::Empty
        } else {
            IdValidationError::WhitespaceOnly
        });
    }
    if trimmed.len() != name.len() {
        return Err(IdValidationError::SurroundingWhitespace);
    }
    if name.len() > MAX_ID_LENGTH {
        return Err(IdValidationError::TooLong { length: name.len() });
    }
    // covers "../" as well
    if name.contains("./") {
        return Err(IdValidationError::PathTraversal);
    }
    match name.chars().find(|c| !allowed(*c)) {
        Some(bad) => Err(IdValidationError::InvalidCharacter(bad)),
        None => Ok(()),
    }
}

fn allowed(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '-' | '_' | '.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_names() {
        for name in ["agent-1", "my_agent", "agent.123", "a", "Ünïcode"] {
            assert_eq!(validate_id(name), Ok(()), "{name}");
        }
        assert!(validate_id(&"a".repeat(MAX_ID_LENGTH)).is_ok());
    }

    #[test]
    fn rejects_with_specific_reason() {
        let cases = [
            ("", IdValidationError::Empty),
            ("  \t", IdValidationError::WhitespaceOnly),
            (" agent", IdValidationError::SurroundingWhitespace),
            ("agents/../root", IdValidationError::PathTraversal),
            ("./agent", IdValidationError::PathTraversal),
            ("agent/path", IdValidationError::InvalidCharacter('/')),
            ("tool name", IdValidationError::InvalidCharacter(' ')),
        ];
        for (name, expected) in cases {
            assert_eq!(validate_id(name), Err(expected), "{name:?}");
        }

        let long = "a".repeat(MAX_ID_LENGTH + 1);
        assert_eq!(
            validate_id(&long),
            Err(IdValidationError::TooLong {
                length: MAX_ID_LENGTH + 1
            })
        );
    }
}
