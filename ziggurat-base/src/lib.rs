//! Error and result types shared across the Ziggurat container encoder.
//!
//! Mirrors the error-centralization pattern used throughout this workspace:
//! one [`Error`] type, one [`Result`] alias, and every construction site
//! logs through `tracing` so a failure is visible even if the caller
//! swallows the `Result`.

use std::path::PathBuf;

use thiserror::Error;
use tracing::error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("component name '{0}' exceeds 12 ASCII bytes")]
    NameTooLong(String),

    #[error("comment exceeds 72 bytes once encoded")]
    CommentTooLong,

    #[error("iterator yielded {got} items, container declared n={want}")]
    SizeMismatch { want: i64, got: i64 },

    #[error("pointer head {head} out of range for n={n} (must be -1 or in [0, {n})")]
    PointerOutOfRange { head: i64, n: i64 },

    #[error("component count {0} exceeds 255")]
    TooManyComponents(usize),

    #[error("container type '{0}' must be exactly 3 ASCII characters")]
    BadContainerType(String),

    #[error("segmentation range [{start}, {end}) is malformed (n={n})")]
    BadRange { start: i64, end: i64, n: i64 },

    #[error("i/o error writing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Other(String),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let err = Error::Io {
            path: path.into(),
            source,
        };
        error!(target: "ziggurat", "{err}");
        err
    }
}

/// Build an [`Error::Other`], logging it the same way every other variant is
/// logged at construction time. Used for ad hoc precondition failures that
/// don't warrant their own variant.
pub fn err(msg: impl Into<String>) -> Error {
    let e = Error::Other(msg.into());
    error!(target: "ziggurat", "{e}");
    e
}

/// `From<io::Error>` can't carry a path, so most call sites should prefer
/// [`Error::io`]; this impl exists for `?` on bare I/O calls where the path
/// is already obvious from context (e.g. writes into an in-memory buffer).
impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        let err = Error::Io {
            path: PathBuf::new(),
            source,
        };
        error!(target: "ziggurat", "{err}");
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn error_messages_are_readable() {
        let e = err("test error");
        assert_eq!(e.to_string(), "test error");
    }

    #[test]
    fn pointer_out_of_range_formats() {
        let e = Error::PointerOutOfRange { head: 3, n: 3 };
        assert!(e.to_string().contains("out of range"));
    }
}
