//! Options recognised by a [`Loader`](crate::Loader).

use std::path::PathBuf;

use serde::Deserialize;

/// Which stages run, which names they use and which files they probe.
///
/// All four stages are enabled by default. The value is read-only once a
/// [`Loader`](crate::Loader) has been built from it and may be reused across
/// loads.
///
/// # Examples
///
/// ```
/// use layered_config::LoaderConfig;
///
/// let config = LoaderConfig::default()
///     .with_env_prefix("APP")
///     .with_file("app.toml");
/// assert!(config.use_env);
/// assert_eq!(config.env_prefix, "APP");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
#[expect(
    clippy::struct_excessive_bools,
    reason = "each stage is switched independently"
)]
pub struct LoaderConfig {
    /// Apply `#[config(default = "...")]` annotations.
    pub use_defaults: bool,
    /// Decode the first existing file from [`files`](Self::files).
    pub use_file: bool,
    /// Look up each field in the environment.
    pub use_env: bool,
    /// Look up each field in the parsed command-line flags.
    pub use_flag: bool,
    /// Prefix for environment keys; `_` is appended when missing.
    pub env_prefix: String,
    /// Prefix for flag names; `.` is appended when missing.
    pub flag_prefix: String,
    /// Candidate configuration files, probed in order.
    pub files: Vec<PathBuf>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            use_defaults: true,
            use_file: true,
            use_env: true,
            use_flag: true,
            env_prefix: String::new(),
            flag_prefix: String::new(),
            files: Vec::new(),
        }
    }
}

impl LoaderConfig {
    /// Sets the environment key prefix.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Sets the flag name prefix.
    #[must_use]
    pub fn with_flag_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.flag_prefix = prefix.into();
        self
    }

    /// Appends a candidate configuration file.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.files.push(path.into());
        self
    }

    /// Replaces the candidate configuration files.
    #[must_use]
    pub fn with_files<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.files = paths.into_iter().map(Into::into).collect();
        self
    }

    /// Enables or disables the defaults stage.
    #[must_use]
    pub const fn use_defaults(mut self, enabled: bool) -> Self {
        self.use_defaults = enabled;
        self
    }

    /// Enables or disables the file stage.
    #[must_use]
    pub const fn use_file(mut self, enabled: bool) -> Self {
        self.use_file = enabled;
        self
    }

    /// Enables or disables the environment stage.
    #[must_use]
    pub const fn use_env(mut self, enabled: bool) -> Self {
        self.use_env = enabled;
        self
    }

    /// Enables or disables the flags stage.
    #[must_use]
    pub const fn use_flag(mut self, enabled: bool) -> Self {
        self.use_flag = enabled;
        self
    }

    pub(super) fn normalized(mut self) -> Self {
        append_separator(&mut self.env_prefix, '_');
        append_separator(&mut self.flag_prefix, '.');
        self
    }
}

/// Append `separator` to a non-empty prefix, even one that already ends in it.
fn append_separator(prefix: &mut String, separator: char) {
    if !prefix.is_empty() {
        prefix.push(separator);
    }
}
