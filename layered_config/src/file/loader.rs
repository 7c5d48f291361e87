//! Probing the configured file list and overlaying the chosen file.

use std::io;
use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::Serialized,
    value::{Dict, Value},
};
use serde::{Serialize, de::DeserializeOwned};
use tracing::debug;

use crate::coerce::{DurationError, parse_duration};
use crate::error::{LoadError, LoadResult};
use crate::schema::Configurable;

use super::format::{FileFormat, extension};

/// Load the first readable file in `files` into `target`.
///
/// Files are probed in order. A file that does not exist is skipped; any
/// other read failure aborts. Only the first file that could be read is
/// decoded, and a decode failure is returned without consulting later
/// entries. An empty list leaves `target` untouched and returns `Ok(None)`.
///
/// Returns the path that was loaded.
///
/// # Errors
///
/// Returns [`LoadError::File`] when no listed file exists (carrying the last
/// `NotFound` error), when a file cannot be read, or when its contents fail
/// to decode. Returns [`LoadError::UnsupportedFileFormat`] when the chosen
/// file has an unrecognised extension.
pub fn load_first_existing<R>(files: &[PathBuf], target: &mut R) -> LoadResult<Option<PathBuf>>
where
    R: Configurable + Serialize + DeserializeOwned,
{
    let mut missing: Option<(&Path, io::Error)> = None;
    for path in files {
        match std::fs::read_to_string(path) {
            Ok(data) => {
                debug!(path = %path.display(), "reading configuration file");
                decode_into(path, &data, target)?;
                return Ok(Some(path.clone()));
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "configuration file not found");
                missing = Some((path.as_path(), err));
            }
            Err(err) => return Err(LoadError::file(path, err)),
        }
    }
    match missing {
        Some((path, err)) => Err(LoadError::file(path, err)),
        None => Ok(None),
    }
}

/// Decode `data`, read from `path`, over the current contents of `target`.
///
/// Fields absent from the file keep the values they already hold, and fields
/// left out of the catalog are never touched. A string where the record holds
/// a [`Duration`](std::time::Duration) is read as a duration literal such as
/// `10s` or `1h30m`.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use std::time::Duration;
/// use layered_config::Configurable;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Configurable, Serialize, Deserialize)]
/// struct Settings {
///     host: String,
///     port: u16,
///     timeout: Duration,
/// }
///
/// let mut settings = Settings {
///     host: "localhost".into(),
///     port: 80,
///     timeout: Duration::from_secs(5),
/// };
/// let text = "port = 8080\ntimeout = \"1m\"";
/// layered_config::file::decode_into(Path::new("app.toml"), text, &mut settings)?;
/// assert_eq!(settings.host, "localhost");
/// assert_eq!(settings.port, 8080);
/// assert_eq!(settings.timeout, Duration::from_secs(60));
/// # Ok::<(), layered_config::LoadError>(())
/// ```
///
/// # Errors
///
/// Returns [`LoadError::UnsupportedFileFormat`] for an unknown extension and
/// [`LoadError::File`] when the contents cannot be decoded into `R`.
pub fn decode_into<R>(path: &Path, data: &str, target: &mut R) -> LoadResult<()>
where
    R: Configurable + Serialize + DeserializeOwned,
{
    let format = FileFormat::from_path(path).ok_or_else(|| LoadError::UnsupportedFileFormat {
        path: path.to_path_buf(),
        extension: extension(path),
    })?;
    let base = Figment::from(Serialized::defaults(&*target));
    let current: Dict = base.extract().map_err(|e| LoadError::file(path, e))?;
    let mut values: Dict = format
        .parse(path, data)?
        .extract()
        .map_err(|e| LoadError::file(path, e))?;
    expand_durations(&current, &mut values).map_err(|e| LoadError::file(path, e))?;
    let mut decoded: R = base
        .merge(Serialized::defaults(values))
        .extract()
        .map_err(|e| LoadError::file(path, e))?;
    decoded.restore_skipped(target);
    *target = decoded;
    Ok(())
}

/// Replace string values in `values` that sit where `current` holds a
/// serialized `Duration` with the parsed duration.
fn expand_durations(current: &Dict, values: &mut Dict) -> Result<(), DurationError> {
    for (key, value) in values {
        let Some(Value::Dict(_, existing)) = current.get(key) else {
            continue;
        };
        let replacement = match value {
            Value::Dict(_, nested) => {
                expand_durations(existing, nested)?;
                None
            }
            Value::String(_, literal) if is_duration(existing) => {
                Some(duration_value(parse_duration(literal)?))
            }
            _ => None,
        };
        if let Some(replacement) = replacement {
            *value = replacement;
        }
    }
    Ok(())
}

/// `Duration` serializes as a map of exactly `secs` and `nanos`.
fn is_duration(dict: &Dict) -> bool {
    dict.len() == 2
        && matches!(dict.get("secs"), Some(Value::Num(..)))
        && matches!(dict.get("nanos"), Some(Value::Num(..)))
}

fn duration_value(duration: std::time::Duration) -> Value {
    Value::from(Dict::from([
        (String::from("secs"), Value::from(duration.as_secs())),
        (String::from("nanos"), Value::from(duration.subsec_nanos())),
    ]))
}
