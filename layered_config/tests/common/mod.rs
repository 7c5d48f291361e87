//! Shared helpers for integration tests.

use anyhow::{Result, anyhow};

/// Run `f` inside a [`figment::Jail`], translating errors in both directions.
pub fn with_jail<F>(f: F) -> Result<()>
where
    F: FnOnce(&mut figment::Jail) -> Result<()>,
{
    figment::Jail::try_with(|j| f(j).map_err(|err| figment::Error::from(err.to_string())))
        .map_err(|err| anyhow!(err))
}
