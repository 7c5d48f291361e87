//! Trait-based conversions between external error types and `LoadError`.

use super::LoadError;

impl From<clap::Error> for LoadError {
    fn from(e: clap::Error) -> Self {
        Self::FlagParsing(Box::new(e))
    }
}
