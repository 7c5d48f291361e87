//! YAML decoding backed by `serde-saphyr`.

use std::path::Path;

use figment::{
    Figment,
    providers::Serialized,
    value::{Dict, Value},
};
use serde_saphyr::Options;

use crate::error::{LoadError, LoadResult};

/// Parse YAML text into a Figment overlay.
///
/// Booleans follow YAML 1.2, so `yes` and `on` stay strings. An empty
/// document contributes no values.
pub(super) fn parse(path: &Path, data: &str) -> LoadResult<Figment> {
    let value: Value = serde_saphyr::from_str_with_options(
        data,
        Options {
            strict_booleans: true,
            ..Options::default()
        },
    )
    .map_err(|e| LoadError::file(path, e.to_string()))?;
    let dict = match value {
        Value::Empty(..) => Dict::new(),
        other => {
            let actual = other.to_actual();
            other.into_dict().ok_or_else(|| {
                LoadError::file(
                    path,
                    figment::Error::from(figment::error::Kind::InvalidType(actual, "map".into())),
                )
            })?
        }
    };
    Ok(Figment::from(Serialized::defaults(dict)))
}
