//! File formats recognised by extension.

use std::path::Path;

use figment::Figment;
#[cfg(any(feature = "json", feature = "toml"))]
use figment::providers::Format;
#[cfg(feature = "json")]
use figment::providers::Json;
#[cfg(feature = "toml")]
use figment::providers::Toml;

use crate::error::{LoadError, LoadResult};

#[cfg(feature = "yaml")]
use super::yaml;

/// Supported configuration file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// `.yaml` or `.yml`.
    Yaml,
    /// `.json`.
    Json,
    /// `.toml`.
    Toml,
}

impl FileFormat {
    /// Select a format from the case-insensitive extension of `path`.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::Path;
    /// use layered_config::file::FileFormat;
    ///
    /// assert_eq!(FileFormat::from_path(Path::new("app.YML")), Some(FileFormat::Yaml));
    /// assert_eq!(FileFormat::from_path(Path::new("app.ini")), None);
    /// ```
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        match extension(path).as_str() {
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }

    /// Parse `data` into a Figment holding the file's values.
    ///
    /// The text is validated with the format's own parser first so syntax
    /// errors carry that parser's diagnostics and the file path.
    pub(crate) fn parse(self, path: &Path, data: &str) -> LoadResult<Figment> {
        match self {
            Self::Json => {
                #[cfg(feature = "json")]
                {
                    serde_json::from_str::<serde_json::Value>(data)
                        .map_err(|e| LoadError::file(path, e))?;
                    Ok(Figment::from(Json::string(data)))
                }
                #[cfg(not(feature = "json"))]
                {
                    Err(disabled(path, "json"))
                }
            }
            Self::Yaml => {
                #[cfg(feature = "yaml")]
                {
                    yaml::parse(path, data)
                }
                #[cfg(not(feature = "yaml"))]
                {
                    Err(disabled(path, "yaml"))
                }
            }
            Self::Toml => {
                #[cfg(feature = "toml")]
                {
                    toml::from_str::<toml::Value>(data).map_err(|e| LoadError::file(path, e))?;
                    Ok(Figment::from(Toml::string(data)))
                }
                #[cfg(not(feature = "toml"))]
                {
                    Err(disabled(path, "toml"))
                }
            }
        }
    }
}

/// Lower-cased extension of `path`, empty when it has none.
pub(super) fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default()
}

#[cfg(not(all(feature = "json", feature = "toml", feature = "yaml")))]
fn disabled(path: &Path, feature: &str) -> LoadError {
    LoadError::file(
        path,
        std::io::Error::other(format!(
            "{feature} feature disabled: enable the '{feature}' feature to support this file format"
        )),
    )
}
