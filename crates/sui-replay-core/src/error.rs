//! Replay interpretation errors.
//!
//! Every structural problem aborts the single decode/build/summarize call it
//! occurs in and reaches the caller as a [`ReplayError`]; nothing is coerced
//! to a default value. Unrecognized V2 object changes are not errors, they are
//! returned as data by the effects decoder.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReplayError {
    /// Effects match neither (or both) of the V1 and V2 field layouts.
    #[error("unsupported effects schema: {reason}")]
    UnsupportedSchema { reason: String },

    /// An amount is not a non-negative integer literal.
    #[error("malformed amount '{amount}': expected a non-negative integer literal")]
    MalformedAmount { amount: String },

    /// A version, counter or index is not an unsigned integer.
    #[error("malformed {field} '{value}': expected an unsigned integer")]
    MalformedInteger { field: &'static str, value: String },

    /// A one-of union has zero or several alternatives populated.
    #[error("ambiguous {what} at position {index}: expected exactly one variant, found {found}")]
    AmbiguousInput {
        what: &'static str,
        index: usize,
        found: usize,
    },

    /// An argument points past the inputs or results available to it.
    #[error("{what} index {index} out of range ({len} available)")]
    IndexOutOfRange {
        what: &'static str,
        index: usize,
        len: usize,
    },

    /// `Result(i)` used on a command that did not return exactly one value.
    #[error("command {command} returned {count} values; Result({command}) needs exactly one")]
    InvalidResultArity { command: usize, count: usize },

    /// `gasStatus` carries no `V2` payload.
    #[error("gas status has no V2 payload")]
    UnsupportedGasStatus,

    /// Neither a success nor a failure marker in the execution status.
    #[error("unrecognized execution status: {detail}")]
    UnknownExecutionStatus { detail: String },

    /// The replay document is not valid JSON of the expected shape.
    #[error("invalid replay JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl ReplayError {
    pub(crate) fn unsupported_schema(reason: impl Into<String>) -> Self {
        ReplayError::UnsupportedSchema {
            reason: reason.into(),
        }
    }

    pub(crate) fn index_out_of_range(what: &'static str, index: usize, len: usize) -> Self {
        ReplayError::IndexOutOfRange { what, index, len }
    }
}

pub type Result<T, E = ReplayError> = std::result::Result<T, E>;

/// Checks that exactly one alternative of a one-of union is populated.
pub(crate) fn ensure_single(what: &'static str, index: usize, present: &[bool]) -> Result<()> {
    let found = present.iter().filter(|p| **p).count();
    if found == 1 {
        Ok(())
    } else {
        Err(ReplayError::AmbiguousInput { what, index, found })
    }
}

/// Returns the only populated alternative of a one-of union.
pub(crate) fn single<T>(
    what: &'static str,
    index: usize,
    alternatives: impl IntoIterator<Item = Option<T>>,
) -> Result<T> {
    let mut found: Vec<T> = alternatives.into_iter().flatten().collect();
    match found.len() {
        1 => Ok(found.remove(0)),
        n => Err(ReplayError::AmbiguousInput {
            what,
            index,
            found: n,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_single() {
        assert!(ensure_single("input", 0, &[true, false]).is_ok());
        assert!(matches!(
            ensure_single("input", 2, &[true, true]),
            Err(ReplayError::AmbiguousInput {
                what: "input",
                index: 2,
                found: 2
            })
        ));
        assert!(matches!(
            ensure_single("owner", 0, &[false, false, false]),
            Err(ReplayError::AmbiguousInput { found: 0, .. })
        ));
    }

    #[test]
    fn test_single() {
        assert_eq!(single("argument", 0, [None, Some(7), None]).unwrap(), 7);
        assert!(matches!(
            single("argument", 1, [Some(1), Some(2)]),
            Err(ReplayError::AmbiguousInput { found: 2, .. })
        ));
        assert!(matches!(
            single::<u8>("argument", 1, [None, None]),
            Err(ReplayError::AmbiguousInput { found: 0, .. })
        ));
    }

    #[test]
    fn test_error_messages() {
        let err = ReplayError::index_out_of_range("input", 5, 3);
        assert_eq!(err.to_string(), "input index 5 out of range (3 available)");

        let err = ReplayError::MalformedAmount {
            amount: "-1".into(),
        };
        assert!(err.to_string().contains("'-1'"));

        let err = ReplayError::MalformedInteger {
            field: "version",
            value: "abc".into(),
        };
        assert_eq!(
            err.to_string(),
            "malformed version 'abc': expected an unsigned integer"
        );
    }
}
