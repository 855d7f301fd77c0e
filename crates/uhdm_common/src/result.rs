//! Internal error type shared by the frontend crates.

/// Result type for operations that can only fail because of a frontend bug
/// or a caller contract violation.
///
/// Problems in the translated design are never reported through this type.
/// They go to the diagnostic sink and the operation still returns `Ok`.
pub type UhdmResult<T> = Result<T, InternalError>;

/// An internal error: a broken invariant, not a user input problem.
#[derive(Debug, thiserror::Error)]
#[error("internal translator error: {message}")]
pub struct InternalError {
    /// Description of the broken invariant.
    pub message: String,
}

impl InternalError {
    /// Creates a new internal error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<String> for InternalError {
    fn from(message: String) -> Self {
        Self { message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_format() {
        let err = InternalError::new("handle is not a design");
        assert_eq!(
            format!("{err}"),
            "internal translator error: handle is not a design"
        );
    }

    #[test]
    fn from_string() {
        let err: InternalError = "dangling node".to_string().into();
        assert_eq!(err.message, "dangling node");
    }

    #[test]
    fn question_mark_propagates() {
        fn inner() -> UhdmResult<u32> {
            Err(InternalError::new("boom"))
        }
        fn outer() -> UhdmResult<u32> {
            let v = inner()?;
            Ok(v + 1)
        }
        assert_eq!(outer().unwrap_err().message, "boom");
    }
}
