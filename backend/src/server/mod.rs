//! Server construction and adapter wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::dev::Server;
use actix_web::{HttpServer, web};
use color_eyre::eyre::{Context, Result};

use bikecare::app::{AppDependencies, build_app};
use bikecare::inbound::http::health::HealthState;
use bikecare::inbound::http::state::HttpState;
use bikecare::outbound::postgrest::{PostgrestClient, PostgrestStore, SupabaseIdentityProvider};

/// Construct an Actix HTTP server backed by the hosted store.
///
/// The store client and identity provider are built once and shared by every
/// worker. Readiness flips once the listener is bound.
///
/// # Errors
/// Fails when the store client cannot be built or the socket cannot be bound.
pub fn create_server(health_state: web::Data<HealthState>, config: ServerConfig) -> Result<Server> {
    let client = PostgrestClient::new(&config.store).wrap_err("build store client")?;
    let identity =
        SupabaseIdentityProvider::new(&config.store).wrap_err("build identity provider")?;
    let deps = AppDependencies {
        health_state: health_state.clone(),
        http_state: web::Data::new(HttpState::from_store(Arc::new(PostgrestStore::new(client)))),
        identity: Arc::new(identity),
        diagnostics_enabled: config.diagnostics_enabled,
    };

    let server = HttpServer::new(move || build_app(deps.clone()))
        .bind(config.bind_addr)
        .wrap_err_with(|| format!("bind {}", config.bind_addr))?
        .run();

    health_state.mark_ready();
    Ok(server)
}
