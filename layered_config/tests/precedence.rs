//! End-to-end precedence across defaults, files, the process environment and
//! flags.

mod common;

use std::time::Duration;

use anyhow::{Result, anyhow, ensure};
use clap::{Arg, Command};
use common::with_jail;
use layered_config::{Configurable, LoadError, Loader, LoaderConfig, Stage};
use rstest::rstest;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Clone, Configurable, Serialize, Deserialize)]
struct Identity {
    #[config(default = "svc")]
    name: String,
}

#[derive(Debug, Default, Clone, Configurable, Serialize, Deserialize)]
struct Auth {
    user: String,
    #[config(default = "3")]
    retries: u8,
}

#[derive(Debug, Default, Clone, Configurable, Serialize, Deserialize)]
struct Service {
    #[config(flatten)]
    #[serde(flatten)]
    identity: Identity,
    #[config(default = "1111")]
    port: u32,
    auth: Auth,
    #[config(default = "250ms")]
    timeout: Duration,
    #[config(default = "false")]
    verbose: bool,
}

fn loader(config: LoaderConfig) -> Loader {
    Loader::new(config.with_env_prefix("APP").with_flag_prefix("app"))
}

#[rstest]
#[case::yaml("svc.yaml", "port: 2222\nauth:\n  user: file\n")]
#[case::json("svc.json", r#"{"port": 2222, "auth": {"user": "file"}}"#)]
#[case::toml("svc.toml", "port = 2222\n[auth]\nuser = \"file\"\n")]
fn environment_beats_file_beats_defaults(#[case] name: &str, #[case] contents: &str) -> Result<()> {
    with_jail(|jail| {
        jail.create_file(name, contents)?;
        jail.set_env("APP_PORT", "3333");
        let mut service = Service::default();
        loader(LoaderConfig::default().with_file(name)).load(&mut service)?;
        ensure!(service.port == 3333, "port was {}", service.port);
        ensure!(service.auth.user == "file", "user was {}", service.auth.user);
        ensure!(service.auth.retries == 3, "retries was {}", service.auth.retries);
        ensure!(service.identity.name == "svc", "name was {}", service.identity.name);
        ensure!(service.timeout == Duration::from_millis(250), "timeout was {:?}", service.timeout);
        Ok(())
    })
}

#[test]
fn disabling_the_environment_exposes_the_file_value() -> Result<()> {
    with_jail(|jail| {
        jail.create_file("svc.toml", "port = 2222")?;
        jail.set_env("APP_PORT", "3333");
        let mut service = Service::default();
        loader(LoaderConfig::default().with_file("svc.toml").use_env(false))
            .load(&mut service)?;
        ensure!(service.port == 2222, "port was {}", service.port);
        Ok(())
    })
}

#[test]
fn embedded_fields_use_the_enclosing_scope() -> Result<()> {
    with_jail(|jail| {
        jail.set_env("APP_NAME", "billing");
        jail.set_env("APP_IDENTITY_NAME", "ignored");
        jail.set_env("APP_AUTH_USER", "admin");
        let mut service = Service::default();
        loader(LoaderConfig::default()).load(&mut service)?;
        ensure!(service.identity.name == "billing", "name was {}", service.identity.name);
        ensure!(service.auth.user == "admin", "user was {}", service.auth.user);
        Ok(())
    })
}

#[test]
fn durations_are_parsed_with_units() -> Result<()> {
    with_jail(|jail| {
        jail.set_env("APP_TIMEOUT", "1m30s");
        let mut service = Service::default();
        loader(LoaderConfig::default()).load(&mut service)?;
        ensure!(service.timeout == Duration::from_secs(90), "timeout was {:?}", service.timeout);
        Ok(())
    })
}

#[test]
fn flags_have_the_last_word() -> Result<()> {
    with_jail(|jail| {
        jail.create_file("svc.yaml", "verbose: false\nport: 2222\n")?;
        jail.set_env("APP_PORT", "3333");
        jail.set_env("APP_VERBOSE", "0");
        let matches = Command::new("svc")
            .arg(Arg::new("app.port").long("app.port"))
            .arg(Arg::new("app.verbose").long("app.verbose"))
            .try_get_matches_from(["svc", "--app.port", "4444", "--app.verbose", "T"])?;
        let mut service = Service::default();
        loader(LoaderConfig::default().with_file("svc.yaml"))
            .with_flags(matches)
            .load(&mut service)?;
        ensure!(service.port == 4444, "port was {}", service.port);
        ensure!(service.verbose, "verbose flag should win");
        Ok(())
    })
}

#[test]
fn out_of_range_values_are_rejected() -> Result<()> {
    with_jail(|jail| {
        jail.set_env("APP_AUTH_RETRIES", "99999999999");
        let mut service = Service::default();
        let err = loader(LoaderConfig::default())
            .load(&mut service)
            .err()
            .ok_or_else(|| anyhow!("an 11-digit u8 should fail"))?;
        ensure!(err.stage() == Some(Stage::Environment), "stage was {:?}", err.stage());
        ensure!(
            matches!(&err, LoadError::Coercion { field, .. } if field == "auth.retries"),
            "unexpected error: {err}"
        );
        ensure!(service.auth.retries == 3, "value must not wrap");
        Ok(())
    })
}

#[test]
fn missing_files_fail_the_file_stage() -> Result<()> {
    with_jail(|_| {
        let mut service = Service::default();
        let err = loader(LoaderConfig::default().with_files(["a.toml", "b.yaml"]))
            .load(&mut service)
            .err()
            .ok_or_else(|| anyhow!("missing files should fail"))?;
        ensure!(
            matches!(&err, LoadError::File { path, .. } if path.ends_with("b.yaml")),
            "unexpected error: {err}"
        );
        ensure!(service.port == 1111, "defaults stay applied");
        Ok(())
    })
}

#[test]
fn malformed_defaults_surface_as_coercion_errors() {
    #[derive(Debug, Default, Configurable, Serialize, Deserialize)]
    struct Broken {
        #[config(default = "ten")]
        count: u16,
    }

    let result = Loader::default().load(&mut Broken::default());
    assert!(matches!(
        result,
        Err(LoadError::Coercion {
            stage: Stage::Defaults,
            ..
        })
    ));
}
