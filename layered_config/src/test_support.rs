//! Helpers shared by the unit tests.

use anyhow::{Result, anyhow};

/// Run `f` inside a [`figment::Jail`], translating errors in both directions.
pub(crate) fn with_jail<F>(f: F) -> Result<()>
where
    F: FnOnce(&mut figment::Jail) -> Result<()>,
{
    figment::Jail::try_with(|jail| f(jail).map_err(|err| figment::Error::from(err.to_string())))
        .map_err(|err| anyhow!(err.to_string()))
}
