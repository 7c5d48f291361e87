//! Rendering and classification of loader errors.

use super::*;
use crate::coerce::FieldKind;
use anyhow::{Result, ensure};
use rstest::rstest;

#[test]
fn coercion_errors_name_the_field_and_stage() -> Result<()> {
    let err = LoadError::Coercion {
        stage: Stage::Environment,
        field: String::from("server.port"),
        value: String::from("99999"),
        source: CoercionError::OutOfRange {
            value: String::from("99999"),
            kind: FieldKind::U16,
        },
    };
    let rendered = err.to_string();
    ensure!(
        rendered == "invalid environment value \"99999\" for 'server.port': 99999 is out of range for u16",
        "unexpected message: {rendered}"
    );
    ensure!(err.stage() == Some(Stage::Environment), "expected env stage");
    Ok(())
}

#[test]
fn clap_errors_convert_into_flag_parsing() {
    let clap_err = clap::Error::raw(clap::error::ErrorKind::UnknownArgument, "nope");
    let err = LoadError::from(clap_err);
    assert!(matches!(err, LoadError::FlagParsing(_)));
    assert_eq!(err.stage(), Some(Stage::Flags));
}

#[rstest]
#[case(LoadError::InvalidTarget { type_name: "u32" }, None)]
#[case(
    LoadError::UnsupportedFileFormat {
        path: PathBuf::from("app.ini"),
        extension: String::from("ini"),
    },
    Some(Stage::File)
)]
#[case(
    LoadError::UnsupportedKind {
        stage: Stage::Defaults,
        field: String::from("tags"),
        type_name: "alloc::vec::Vec<alloc::string::String>",
    },
    Some(Stage::Defaults)
)]
fn stage_classification(#[case] err: LoadError, #[case] expected: Option<Stage>) {
    assert_eq!(err.stage(), expected);
}

#[test]
fn file_errors_keep_their_source() {
    let err = LoadError::file(
        "missing.toml",
        std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
    );
    let source = std::error::Error::source(&err).map(ToString::to_string);
    assert_eq!(source.as_deref(), Some("gone"));
}
