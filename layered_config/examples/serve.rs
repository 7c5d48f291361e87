//! Example server configuration resolved from defaults, an optional file,
//! `SERVE_*` environment variables and `--serve.*` flags.
//!
//! ```text
//! SERVE_TLS_ENABLED=true cargo run --example serve -- --config serve.toml --serve.port 9000
//! ```

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use clap::{Arg, ArgMatches, CommandFactory, FromArgMatches, Parser};
use layered_config::{Configurable, Loader, LoaderConfig};
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

/// TLS settings, namespaced under `tls`.
#[derive(Debug, Default, Clone, PartialEq, Configurable, Serialize, Deserialize)]
struct Tls {
    #[config(default = "false")]
    enabled: bool,
    cert: String,
}

/// Connection limits, flattened into the top level.
#[derive(Debug, Default, Clone, PartialEq, Configurable, Serialize, Deserialize)]
struct Limits {
    #[config(default = "30s")]
    idle_timeout: Duration,
    #[config(default = "64")]
    max_connections: u32,
}

#[derive(Debug, Default, Clone, PartialEq, Configurable, Serialize, Deserialize)]
struct ServeConfig {
    #[config(default = "127.0.0.1")]
    host: String,
    #[config(default = "8080")]
    port: u16,
    tls: Tls,
    #[config(flatten)]
    #[serde(flatten)]
    limits: Limits,
}

#[derive(Debug, Parser)]
#[command(name = "serve", about = "Serves requests using layered configuration")]
struct Cli {
    /// Configuration file to read before the environment.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Flag names mirror the catalog's dotted names under the `serve` prefix.
const FLAGS: [&str; 6] = [
    "serve.host",
    "serve.port",
    "serve.tls.enabled",
    "serve.tls.cert",
    "serve.idle_timeout",
    "serve.max_connections",
];

fn command() -> clap::Command {
    FLAGS.iter().fold(Cli::command(), |command, name| {
        command.arg(Arg::new(*name).long(*name).value_name("VALUE"))
    })
}

fn loader(cli: &Cli, matches: ArgMatches) -> Loader {
    let config = LoaderConfig::default()
        .with_env_prefix("SERVE")
        .with_flag_prefix("serve")
        .with_files(cli.config.clone())
        .use_file(cli.config.is_some());
    Loader::new(config).with_flags(matches)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let matches = command().try_get_matches()?;
    let cli = Cli::from_arg_matches(&matches)?;
    let mut config = ServeConfig::default();
    loader(&cli, matches).load(&mut config)?;
    tracing::info!(host = %config.host, port = config.port, "configuration resolved");

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{config:#?}")?;
    Ok(())
}
