//! Command-line flag lookup backed by `clap`.

use std::ffi::OsString;
use std::sync::OnceLock;

use clap::parser::ValueSource;
use clap::{ArgMatches, Command};

/// Exact-name lookup against a parsed flag set.
pub trait FlagSource {
    /// Make sure the flags have been parsed.
    ///
    /// Sources that are already parsed keep the default no-op.
    ///
    /// # Errors
    ///
    /// Returns the parser's [`clap::Error`] when the command line is invalid.
    fn prepare(&self) -> Result<(), clap::Error> {
        Ok(())
    }

    /// Return the value of the flag registered as `name`.
    ///
    /// Returns `None` when no such flag is registered or when it has no
    /// defined value.
    fn lookup(&self, name: &str) -> Option<String>;
}

/// A flag set with no registered flags.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFlags;

impl FlagSource for NoFlags {
    fn lookup(&self, _name: &str) -> Option<String> {
        None
    }
}

/// Flags already parsed by `clap`, keyed by argument id.
///
/// Only values supplied on the command line count as defined. Values filled
/// in from `default_value` are treated as absent so that they never override
/// the file and environment stages.
impl FlagSource for ArgMatches {
    fn lookup(&self, name: &str) -> Option<String> {
        supplied_value(self, name)
    }
}

impl<T: FlagSource + ?Sized> FlagSource for &T {
    fn prepare(&self) -> Result<(), clap::Error> {
        (**self).prepare()
    }

    fn lookup(&self, name: &str) -> Option<String> {
        (**self).lookup(name)
    }
}

fn supplied_value(matches: &ArgMatches, name: &str) -> Option<String> {
    // Unknown ids are an error in debug builds and `None` in release builds.
    let mut values = matches.try_get_raw(name).ok().flatten()?;
    if matches.value_source(name) != Some(ValueSource::CommandLine) {
        return None;
    }
    values
        .next()
        .map(|value| value.to_string_lossy().into_owned())
}

/// A `clap` command parsed exactly once, on first use.
///
/// Place it in a `static` to share one parse across every loader in the
/// process.
///
/// # Examples
///
/// ```
/// use clap::{Arg, Command};
/// use layered_config::sources::{FlagSource, LazyFlags};
///
/// let flags = LazyFlags::new(Command::new("app").arg(Arg::new("app.port").long("app.port")))
///     .with_args(["app", "--app.port", "9000"]);
/// assert!(!flags.is_parsed());
/// flags.prepare()?;
/// assert_eq!(flags.lookup("app.port").as_deref(), Some("9000"));
/// # Ok::<(), clap::Error>(())
/// ```
#[derive(Debug)]
pub struct LazyFlags {
    command: Command,
    args: Option<Vec<OsString>>,
    matches: OnceLock<ArgMatches>,
}

impl LazyFlags {
    /// Wrap `command`; the process arguments are parsed on first use.
    #[must_use]
    pub fn new(command: Command) -> Self {
        Self {
            command,
            args: None,
            matches: OnceLock::new(),
        }
    }

    /// Parse `args` instead of the process arguments.
    ///
    /// The first item is the binary name, as with [`Command::get_matches_from`].
    #[must_use]
    pub fn with_args<I, T>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        self.args = Some(args.into_iter().map(Into::into).collect());
        self
    }

    /// Whether the command line has been parsed yet.
    #[must_use]
    pub fn is_parsed(&self) -> bool {
        self.matches.get().is_some()
    }

    fn parse(&self) -> Result<ArgMatches, clap::Error> {
        let args = self
            .args
            .clone()
            .unwrap_or_else(|| std::env::args_os().collect());
        self.command.clone().try_get_matches_from(args)
    }
}

impl FlagSource for LazyFlags {
    fn prepare(&self) -> Result<(), clap::Error> {
        if self.is_parsed() {
            return Ok(());
        }
        let matches = self.parse()?;
        if self.matches.set(matches).is_err() {
            tracing::trace!("flags were parsed concurrently; keeping the first result");
        }
        Ok(())
    }

    fn lookup(&self, name: &str) -> Option<String> {
        self.matches
            .get()
            .and_then(|matches| supplied_value(matches, name))
    }
}
