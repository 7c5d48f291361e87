//! Helpers for decoding configuration files into a record.

mod format;
mod loader;
#[cfg(feature = "yaml")]
mod yaml;

pub use format::FileFormat;
pub use loader::{decode_into, load_first_existing};
