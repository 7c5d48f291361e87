//! The precedence resolver.
//!
//! [`Loader::load`] runs the enabled stages in a fixed order: defaults, file,
//! environment, flags. Each later stage overrides the fields it supplies and
//! leaves the rest alone. The first error aborts the load; fields written by
//! earlier stages are not rolled back.

mod config;

pub use config::LoaderConfig;

use std::fmt;

use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, trace};

use crate::catalog::{Catalog, FieldDescriptor};
use crate::coerce::{self, CoercionError};
use crate::error::{LoadError, LoadResult};
use crate::file;
use crate::schema::Configurable;
use crate::sources::{EnvSource, FlagSource, NoFlags, ProcessEnv};

/// One source in the precedence chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// `#[config(default = "...")]` annotations.
    Defaults,
    /// The first existing configuration file.
    File,
    /// Environment variables.
    Environment,
    /// Command-line flags.
    Flags,
}

impl Stage {
    /// Lower-case stage name used in messages and log events.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Defaults => "defaults",
            Self::File => "file",
            Self::Environment => "environment",
            Self::Flags => "flags",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Populates configuration records from layered sources.
///
/// A loader owns its [`LoaderConfig`] and the environment and flag sources it
/// reads. It holds no per-load state, so one loader can serve any number of
/// records, including records of different types.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use layered_config::{Configurable, Loader, LoaderConfig};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Configurable, Serialize, Deserialize, Default)]
/// struct App {
///     #[config(default = "8080")]
///     port: u16,
/// }
///
/// let env = HashMap::from([("APP_PORT".to_owned(), "9090".to_owned())]);
/// let loader = Loader::new(LoaderConfig::default().with_env_prefix("APP")).with_env(env);
///
/// let mut app = App::default();
/// loader.load(&mut app)?;
/// assert_eq!(app.port, 9090);
/// # Ok::<(), layered_config::LoadError>(())
/// ```
pub struct Loader {
    config: LoaderConfig,
    env: Box<dyn EnvSource + Send + Sync>,
    flags: Box<dyn FlagSource + Send + Sync>,
}

impl Loader {
    /// Build a loader reading the process environment and no flags.
    ///
    /// A non-empty prefix always gains its separator here, so pass `APP`
    /// rather than `APP_`.
    #[must_use]
    pub fn new(config: LoaderConfig) -> Self {
        Self {
            config: config.normalized(),
            env: Box::new(ProcessEnv),
            flags: Box::new(NoFlags),
        }
    }

    /// Replace the environment source.
    #[must_use]
    pub fn with_env(mut self, env: impl EnvSource + Send + Sync + 'static) -> Self {
        self.env = Box::new(env);
        self
    }

    /// Replace the flag source.
    ///
    /// Pass a [`LazyFlags`](crate::sources::LazyFlags) held in a `static` to
    /// share one parse of the command line across the process.
    #[must_use]
    pub fn with_flags(mut self, flags: impl FlagSource + Send + Sync + 'static) -> Self {
        self.flags = Box::new(flags);
        self
    }

    /// Normalised configuration in effect.
    #[must_use]
    pub const fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Environment key for a dotted field name.
    ///
    /// ```
    /// use layered_config::{Loader, LoaderConfig};
    ///
    /// let loader = Loader::new(LoaderConfig::default().with_env_prefix("APP"));
    /// assert_eq!(loader.env_name("auth.user"), "APP_AUTH_USER");
    /// ```
    #[must_use]
    pub fn env_name(&self, dotted_name: &str) -> String {
        let mut key = self.config.env_prefix.clone();
        key.push_str(&dotted_name.replace('.', "_"));
        key.to_uppercase()
    }

    /// Flag name for a dotted field name.
    ///
    /// ```
    /// use layered_config::{Loader, LoaderConfig};
    ///
    /// let loader = Loader::new(LoaderConfig::default().with_flag_prefix("app"));
    /// assert_eq!(loader.flag_name("port"), "app.port");
    /// ```
    #[must_use]
    pub fn flag_name(&self, dotted_name: &str) -> String {
        let mut name = self.config.flag_prefix.clone();
        name.push_str(dotted_name);
        name.to_lowercase()
    }

    /// Build the catalog `load` would use for `R`.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::InvalidTarget`] when `R` is not a record.
    pub fn catalog<R: Configurable>() -> LoadResult<Catalog<R>> {
        Catalog::build()
    }

    /// Populate `record` from every enabled stage.
    ///
    /// File values are decoded over the record as it stands after the
    /// defaults stage, so fields the file omits keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by any stage. The record then holds
    /// whatever the preceding stages wrote.
    pub fn load<R>(&self, record: &mut R) -> LoadResult<()>
    where
        R: Configurable + Serialize + DeserializeOwned,
    {
        let catalog = Catalog::<R>::build()?;
        debug!(fields = catalog.len(), "built field catalog");

        if self.enabled(Stage::Defaults) {
            apply_defaults(&catalog, record)?;
        }
        if self.enabled(Stage::File) {
            match file::load_first_existing(&self.config.files, record)? {
                Some(path) => debug!(path = %path.display(), "applied configuration file"),
                None => debug!("no configuration files listed"),
            }
        }
        if self.enabled(Stage::Environment) {
            self.apply_env(&catalog, record)?;
        }
        if self.enabled(Stage::Flags) {
            self.apply_flags(&catalog, record)?;
        }
        Ok(())
    }

    fn enabled(&self, stage: Stage) -> bool {
        let enabled = match stage {
            Stage::Defaults => self.config.use_defaults,
            Stage::File => self.config.use_file,
            Stage::Environment => self.config.use_env,
            Stage::Flags => self.config.use_flag,
        };
        if enabled {
            debug!(%stage, "applying stage");
        } else {
            debug!(%stage, "stage disabled");
        }
        enabled
    }

    fn apply_env<R>(&self, catalog: &Catalog<R>, record: &mut R) -> LoadResult<()> {
        for field in catalog {
            let key = self.env_name(&field.full_name());
            if let Some(raw) = self.env.lookup(&key) {
                apply_value(Stage::Environment, field, record, &raw, &key)?;
            }
        }
        Ok(())
    }

    fn apply_flags<R>(&self, catalog: &Catalog<R>, record: &mut R) -> LoadResult<()> {
        self.flags.prepare()?;
        for field in catalog {
            let name = self.flag_name(&field.full_name());
            if let Some(raw) = self.flags.lookup(&name) {
                apply_value(Stage::Flags, field, record, &raw, &name)?;
            }
        }
        Ok(())
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new(LoaderConfig::default())
    }
}

impl fmt::Debug for Loader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Loader")
            .field("config", &self.config)
            .field("env", &"<source>")
            .field("flags", &"<source>")
            .finish()
    }
}

fn apply_defaults<R>(catalog: &Catalog<R>, record: &mut R) -> LoadResult<()> {
    for field in catalog {
        let raw = field.default_value();
        if !raw.is_empty() {
            apply_value(Stage::Defaults, field, record, raw, "default")?;
        }
    }
    Ok(())
}

fn apply_value<R>(
    stage: Stage,
    field: &FieldDescriptor<R>,
    record: &mut R,
    raw: &str,
    key: &str,
) -> LoadResult<()> {
    match coerce::apply(field.slot(record), raw) {
        Ok(()) => {
            trace!(field = %field.full_name(), key, %stage, "applied value");
            Ok(())
        }
        Err(CoercionError::UnsupportedKind) => Err(LoadError::UnsupportedKind {
            stage,
            field: field.full_name(),
            type_name: field.type_name(),
        }),
        Err(source) => Err(LoadError::Coercion {
            stage,
            field: field.full_name(),
            value: raw.to_owned(),
            source,
        }),
    }
}
