//! Flat `{code, message}` errors shared by every rate operation.
//!
//! Expected failures (bad input, feed outages, missing rates) travel as
//! [`Result<T>`] values. Outer layers wrap an inner error by keeping their own
//! stable `code` and appending the inner message as free text, so callers get
//! a single flat message rather than a chain of causes.

use serde::Serialize;
use std::borrow::Cow;
use std::fmt::Display;

/// Outcome of every fallible operation in the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, thiserror::Error)]
#[error("{code}: {message}")]
pub struct Error {
    code: Cow<'static, str>,
    message: Cow<'static, str>,
}

impl Error {
    /// Sentinel for "no error". Never a valid failure.
    pub const NONE: Error = Error::from_static("", "");

    pub const NULL_VALUE: Error = Error::from_static("Error.NullValue", "Null value was provided.");

    pub const fn from_static(code: &'static str, message: &'static str) -> Self {
        Self {
            code: Cow::Borrowed(code),
            message: Cow::Borrowed(message),
        }
    }

    pub fn new(code: impl Into<Cow<'static, str>>, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_none(&self) -> bool {
        self.code.is_empty()
    }

    /// Same code, with `detail` appended to the message.
    pub fn with_detail(&self, detail: impl Display) -> Error {
        Error::new(self.code.clone(), format!("{} {}", self.message, detail))
    }

    /// Wraps `inner` under this error's code, keeping the inner text.
    pub fn wrap(&self, inner: &Error) -> Error {
        self.with_detail(format_args!("Details: {}", inner.message))
    }
}

/// Builds a failed [`Result`].
///
/// # Panics
///
/// Panics when handed [`Error::NONE`]; a failure must always carry a real error.
pub fn failure<T>(error: Error) -> Result<T> {
    assert!(
        !error.is_none(),
        "cannot create a failure result from Error::NONE"
    );
    Err(error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_carries_code_and_message() {
        let error = Error::new("E123", "Invalid input");
        assert_eq!(error.code(), "E123");
        assert_eq!(error.message(), "Invalid input");
        assert!(error.to_string().contains("E123"));
        assert!(error.to_string().contains("Invalid input"));
    }

    #[test]
    fn test_error_equality_is_structural() {
        let a = Error::new("E1", "one");
        let b = Error::new(String::from("E1"), String::from("one"));
        let c = Error::new("E2", "one");
        assert_eq!(a, b);
        assert_ne!(a, c);

        let mut set = std::collections::HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
    }

    #[test]
    fn test_none_and_null_value() {
        assert!(Error::NONE.is_none());
        assert!(Error::NONE.code().is_empty());
        assert!(Error::NONE.message().is_empty());
        assert_eq!(Error::NULL_VALUE.code(), "Error.NullValue");
        assert_eq!(Error::NULL_VALUE.message(), "Null value was provided.");
        assert!(!Error::NULL_VALUE.is_none());
    }

    #[test]
    fn test_wrap_keeps_outer_code_and_inner_text() {
        let outer = Error::from_static("Outer.Code", "Outer failed.");
        let inner = Error::new("Inner.Code", "socket closed");
        let wrapped = outer.wrap(&inner);
        assert_eq!(wrapped.code(), "Outer.Code");
        assert_eq!(wrapped.message(), "Outer failed. Details: socket closed");
    }

    #[test]
    fn test_failure_and_result_combinators() {
        let err = Error::new("E", "boom");
        let failed: Result<i32> = failure(err.clone());
        assert_eq!(failed.clone().map(|v| v * 2), Err(err.clone()));
        assert_eq!(failed.clone().and_then(|v| Ok::<_, Error>(v + 1)), Err(err.clone()));
        assert_eq!(failed.clone().unwrap_or(7), 7);
        assert_eq!(failed.unwrap_or_else(|e| e.code().len() as i32), 1);

        let ok: Result<i32> = Ok(2);
        assert_eq!(ok.clone().map(|v| v * 2), Ok(4));
        let described = match ok {
            Ok(v) => format!("value {v}"),
            Err(e) => format!("error {e}"),
        };
        assert_eq!(described, "value 2");
    }

    #[test]
    #[should_panic(expected = "Error::NONE")]
    fn test_failure_rejects_none() {
        let _ = failure::<()>(Error::NONE);
    }

    #[test]
    #[should_panic]
    fn test_value_of_failure_is_a_contract_violation() {
        let failed: Result<i32> = failure(Error::NULL_VALUE);
        failed.unwrap();
    }
}
