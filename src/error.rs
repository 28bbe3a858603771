//! Error taxonomy for pagination.
//!
//! Argument problems ([`Error::InvalidArgument`], [`Error::OutOfRange`]) are reported before any
//! mutation and leave the paginator usable. Failures while partitioning or sorting fault the
//! paginator for good and surface as [`Error::InvalidOperation`] wrapping the cause.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("invalid argument {name}: {message}")]
    InvalidArgument { name: &'static str, message: String },

    #[error("argument {name} out of range: {message}")]
    OutOfRange { name: &'static str, message: String },

    /// The comparer does not define a strict weak ordering.
    #[error("comparer '{comparer}' is inconsistent: it does not define a strict weak ordering")]
    InconsistentComparer { comparer: String },

    #[error("comparer panicked: {message}")]
    ComparerPanicked { message: String },

    /// The paginator is faulted. Returned by the failing call and every call after it.
    #[error("paginator is faulted: {source}")]
    InvalidOperation { source: Box<Error> },
}

impl Error {
    pub fn invalid_arg(name: &'static str, message: impl Into<String>) -> Error {
        Error::InvalidArgument {
            name,
            message: message.into(),
        }
    }

    pub fn out_of_range(name: &'static str, message: impl Into<String>) -> Error {
        Error::OutOfRange {
            name,
            message: message.into(),
        }
    }

    pub fn inconsistent_comparer(comparer: impl Into<String>) -> Error {
        Error::InconsistentComparer {
            comparer: comparer.into(),
        }
    }

    pub(crate) fn faulted(cause: Error) -> Error {
        Error::InvalidOperation {
            source: Box::new(cause),
        }
    }

    /// Innermost error, looking through [`Error::InvalidOperation`] wrappers.
    pub fn root_cause(&self) -> &Error {
        match self {
            Error::InvalidOperation { source } => source.root_cause(),
            other => other,
        }
    }

    pub fn is_inconsistent_comparer(&self) -> bool {
        matches!(self.root_cause(), Error::InconsistentComparer { .. })
    }

    pub fn is_faulted(&self) -> bool {
        matches!(self, Error::InvalidOperation { .. })
    }
}

#[inline]
pub(crate) fn verify_arg(predicate: bool, name: &'static str, condition: &str) -> Result<()> {
    if predicate { Ok(()) } else { invalid_arg(name, condition) }
}

#[cold]
fn invalid_arg(name: &'static str, condition: &str) -> Result<()> {
    Err(Error::invalid_arg(name, condition))
}
