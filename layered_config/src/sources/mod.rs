//! Environment and command-line collaborators.
//!
//! The loader only ever performs exact-key lookups against these sources.
//! Neither trait scans, registers or enumerates anything: environment storage
//! and flag definitions belong to the application.

mod env;
mod flags;

pub use env::{EnvSource, ProcessEnv};
pub use flags::{FlagSource, LazyFlags, NoFlags};
