//! Layered configuration loading for typed records.
//!
//! Derive [`Configurable`] on a struct and hand it to a [`Loader`]. The loader
//! walks the struct's fields once per load and fills them from up to four
//! sources, each overriding the one before it:
//!
//! 1. `#[config(default = "...")]` annotations,
//! 2. the first existing file among [`LoaderConfig::files`],
//! 3. environment variables named `PREFIX_GROUP_FIELD`,
//! 4. command-line flags named `prefix.group.field`.
//!
//! Nested structs namespace their fields under the field name, while
//! `#[config(flatten)]` fields merge their children into the parent scope.
//!
//! ```
//! use std::collections::HashMap;
//! use std::time::Duration;
//! use layered_config::{Configurable, Loader, LoaderConfig};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Configurable, Serialize, Deserialize, Default)]
//! struct Auth {
//!     user: String,
//! }
//!
//! #[derive(Configurable, Serialize, Deserialize, Default)]
//! struct App {
//!     #[config(default = "30s")]
//!     timeout: Duration,
//!     auth: Auth,
//! }
//!
//! let env = HashMap::from([("APP_AUTH_USER".to_owned(), "admin".to_owned())]);
//! let loader = Loader::new(LoaderConfig::default().with_env_prefix("APP")).with_env(env);
//!
//! let mut app = App::default();
//! loader.load(&mut app)?;
//! assert_eq!(app.timeout, Duration::from_secs(30));
//! assert_eq!(app.auth.user, "admin");
//! # Ok::<(), layered_config::LoadError>(())
//! ```

extern crate self as layered_config;

pub use layered_config_macros::Configurable;

mod catalog;
pub mod coerce;
mod error;
pub mod file;
mod loader;
mod schema;
pub mod sources;
#[cfg(test)]
mod test_support;

pub use catalog::{
    Catalog, CatalogBuilder, FieldDescriptor, GroupDescriptor, Location, Projection, location,
    projection,
};
pub use coerce::{FieldKind, FieldSlot};
pub use error::{LoadError, LoadResult};
pub use loader::{Loader, LoaderConfig, Stage};
pub use schema::{Configurable, FieldDecl, Shape};
