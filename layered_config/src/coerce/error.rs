//! Errors raised while converting raw strings into field values.

use std::num::{ParseFloatError, ParseIntError};

use thiserror::Error;

use super::{DurationError, FieldKind};

/// Failure to convert a source string into a field's kind.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum CoercionError {
    /// The value is not one of the accepted boolean tokens.
    #[error("invalid boolean {value:?}; expected one of 1, t, T, TRUE, true, True, 0, f, F, FALSE, false, False")]
    InvalidBool {
        /// Rejected input.
        value: String,
    },

    /// The value is not a base-10 integer.
    #[error("invalid integer {value:?}: {source}")]
    InvalidInteger {
        /// Rejected input.
        value: String,
        /// Parser diagnostic.
        #[source]
        source: ParseIntError,
    },

    /// The value parsed but does not fit the declared width.
    #[error("{value} is out of range for {kind}")]
    OutOfRange {
        /// Rejected input.
        value: String,
        /// Declared kind of the target field.
        kind: FieldKind,
    },

    /// An unsigned field received a signed literal.
    #[error("{value:?} carries a sign, which {kind} does not accept")]
    UnexpectedSign {
        /// Rejected input.
        value: String,
        /// Declared kind of the target field.
        kind: FieldKind,
    },

    /// The value is not a floating point literal.
    #[error("invalid float {value:?}: {source}")]
    InvalidFloat {
        /// Rejected input.
        value: String,
        /// Parser diagnostic.
        #[source]
        source: ParseFloatError,
    },

    /// The value is not a duration literal.
    #[error("invalid duration {value:?}: {source}")]
    InvalidDuration {
        /// Rejected input.
        value: String,
        /// Parser diagnostic.
        #[source]
        source: DurationError,
    },

    /// The field's kind has no string conversion.
    #[error("no string conversion is registered for this field kind")]
    UnsupportedKind,
}
