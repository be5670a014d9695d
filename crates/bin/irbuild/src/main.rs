//! # irbuild — IR climate build tool
//!
//! Composition root that wires the build pass together and runs it once.
//!
//! ## Responsibilities
//! - Parse the command line (`clap`), env vars and the build file
//! - Initialize logging on stderr
//! - Construct the device registry and the climate_ir registrar
//! - Run the build service over the declarations of the build file
//! - Print the build summary as JSON on stdout
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use irbuild_app::ports::DeviceRegistry;
use irbuild_app::registry::InMemoryDeviceRegistry;
use irbuild_app::services::build_service::BuildService;
use irbuild_app::services::climate_ir::{self, StandardClimateIr};
use irbuild_domain::time;

use crate::config::Config;

#[derive(Parser)]
#[command(name = "irbuild")]
#[command(about = "Validate an IR climate build file and print the registered devices as JSON")]
#[command(version)]
struct Cli {
    /// Build file; `irbuild.toml` is used, if present, when omitted
    #[arg(env = "IRBUILD_CONFIG")]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref()).context("loading build file")?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .with_writer(std::io::stderr)
        .init();

    let path = cli
        .config
        .unwrap_or_else(|| PathBuf::from(config::DEFAULT_PATH));
    tracing::info!(path = %path.display(), platform = %config.build.platform, "starting build");

    let declarations = config.declarations();
    let mut service = BuildService::new(
        InMemoryDeviceRegistry::default(),
        StandardClimateIr,
        config.build.platform,
    );
    let summary = match service.run(&declarations) {
        Ok(summary) => summary,
        Err(err) => {
            let errors = err.into_errors();
            for error in &errors {
                tracing::error!("{error}");
            }
            anyhow::bail!("build failed with {} error(s)", errors.len());
        }
    };

    for device in service.registry().devices() {
        climate_ir::dump_config(device);
    }
    tracing::info!(compiled_at = %time::banner(summary.compiled_at), "summary ready");

    let output = serde_json::to_string_pretty(&summary).context("serializing build summary")?;
    println!("{output}");
    Ok(())
}
