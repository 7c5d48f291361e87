//! Error types produced by the configuration loader.

mod conversions;

use std::path::PathBuf;

use thiserror::Error;

use crate::coerce::CoercionError;
use crate::loader::Stage;

/// Result alias used throughout the crate.
pub type LoadResult<T> = Result<T, LoadError>;

/// Errors that can occur while loading configuration.
///
/// A failed [`Loader::load`](crate::Loader::load) leaves the record holding
/// whatever the stages before the failure had already written.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoadError {
    /// The destination is a leaf type rather than a record.
    #[error("`{type_name}` is not a configuration record; derive `Configurable` on a struct with named fields")]
    InvalidTarget {
        /// Name of the rejected destination type.
        type_name: &'static str,
    },

    /// The configuration file extension has no decoder.
    #[error("configuration file format {extension:?} isn't supported: '{path}'")]
    UnsupportedFileFormat {
        /// File that was selected for decoding.
        path: PathBuf,
        /// Lower-cased extension, empty when the path has none.
        extension: String,
    },

    /// Error originating from a configuration file.
    #[error("configuration file error in '{path}': {source}")]
    File {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying open, read or decode error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A source value could not be converted to the field's kind.
    #[error("invalid {stage} value {value:?} for '{field}': {source}")]
    Coercion {
        /// Stage that supplied the value.
        stage: Stage,
        /// Dotted name of the field.
        field: String,
        /// Raw value as received from the source.
        value: String,
        /// Conversion failure.
        #[source]
        source: CoercionError,
    },

    /// A source targeted a field whose type cannot be set from a string.
    #[error("field '{field}' of type `{type_name}` cannot be set by the {stage} stage")]
    UnsupportedKind {
        /// Stage that targeted the field.
        stage: Stage,
        /// Dotted name of the field.
        field: String,
        /// Rust type of the field.
        type_name: &'static str,
    },

    /// The flag source failed to parse the command line.
    #[error("failed to parse command-line flags: {0}")]
    FlagParsing(#[from] Box<clap::Error>),
}

impl LoadError {
    /// Construct a [`LoadError::File`] for `path`.
    pub(crate) fn file(
        path: impl Into<PathBuf>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::File {
            path: path.into(),
            source: source.into(),
        }
    }

    /// Stage that produced a field-level error, if any.
    #[must_use]
    pub const fn stage(&self) -> Option<Stage> {
        match self {
            Self::Coercion { stage, .. } | Self::UnsupportedKind { stage, .. } => Some(*stage),
            Self::File { .. } | Self::UnsupportedFileFormat { .. } => Some(Stage::File),
            Self::FlagParsing(_) => Some(Stage::Flags),
            Self::InvalidTarget { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests;
