//! Backend entry-point: loads settings, wires the hosted store adapters, and
//! serves the REST API.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

mod server;

use std::ffi::OsString;

use actix_web::web;
use color_eyre::eyre::{Context, Result, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use bikecare::inbound::http::health::HealthState;
use bikecare::settings::{AppSettings, LogFormat};

use server::{ServerConfig, create_server};

fn init_tracing(format: LogFormat) {
    let builder = fmt().with_env_filter(EnvFilter::from_default_env());
    let result = match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
    };
    if let Err(e) = result {
        warn!(error = %e, "tracing init failed");
    }
}

/// Parse settings from `args` plus the `BIKECARE_*` environment.
fn load_settings(args: impl IntoIterator<Item = OsString>) -> Result<AppSettings> {
    AppSettings::load_from_iter(args).map_err(|e| eyre!("load settings: {e}"))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let settings = load_settings(std::env::args_os())?;
    init_tracing(settings.log_format()?);

    let config = ServerConfig::from_settings(&settings)?;
    if config.diagnostics_enabled() {
        warn!("diagnostic routes are mounted under /api/debug");
    }
    info!(bind_addr = %config.bind_addr(), "starting server");

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    let outcome = server.await;
    health_state.mark_draining();
    outcome.wrap_err("server terminated")
}
