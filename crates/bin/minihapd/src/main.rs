//! # minihapd — minihap daemon
//!
//! Composition root that wires all adapters together and publishes the
//! simulated outlet.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Initialise logging (stderr, so stdout stays a JSON status stream)
//! - Construct the simulated outlet and the accessory adapter around it
//! - Publish the accessory over the configured advertiser
//! - Log diagnostic input from stdin
//! - Handle graceful shutdown (SIGTERM/SIGINT) and exit with `128 + signal`
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;
mod signals;

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use minihap_adapter_mdns::MdnsTransport;
use minihap_adapter_stdio::{JsonLineStatusSink, read_stdin_diagnostics};
use minihap_adapter_virtual::SimulatedOutlet;
use minihap_app::ports::{AccessoryTransport, SharedHandler};
use minihap_app::services::outlet_accessory::OutletAccessory;
use minihap_app::services::publisher::AccessoryPublisher;
use minihap_app::shutdown::ShutdownCoordinator;
use minihap_app::transport::InProcessTransport;
use minihap_domain::accessory::Registration;

use config::{AdvertiserKind, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .with_writer(std::io::stderr)
        .init();

    let registration = config.registration()?;
    tracing::info!(
        accessory = %registration.id,
        name = %registration.display_name,
        category = ?registration.category,
        "starting minihapd"
    );

    // Device
    let status = JsonLineStatusSink::stdout();
    let outlet = SimulatedOutlet::new(0, status);
    let handler: SharedHandler = Arc::new(OutletAccessory::new(outlet));

    // Shutdown
    let coordinator = Arc::new(ShutdownCoordinator::new());
    signals::listen(Arc::clone(&coordinator))?;

    // Diagnostics
    tokio::spawn(async {
        if let Err(err) = read_stdin_diagnostics().await {
            tracing::warn!(error = %err, "diagnostic channel closed");
        }
    });

    let exit_code = match config.advertiser.kind {
        AdvertiserKind::Mdns => {
            let transport = MdnsTransport::new(config.advertiser.mdns.clone())?;
            serve(transport, &registration, handler, &coordinator, config.grace()).await?
        }
        AdvertiserKind::None => {
            tracing::warn!("advertiser disabled, accessory is only reachable in-process");
            let transport = InProcessTransport::new();
            serve(transport, &registration, handler, &coordinator, config.grace()).await?
        }
    };

    std::process::exit(exit_code);
}

/// Publish, wait for a termination signal, unpublish, and return the exit code.
async fn serve<T: AccessoryTransport>(
    transport: T,
    registration: &Registration,
    handler: SharedHandler,
    coordinator: &ShutdownCoordinator,
    grace: Duration,
) -> anyhow::Result<i32> {
    let mut publisher = AccessoryPublisher::new(transport);
    publisher.publish(registration, handler).await?;
    let outcome = coordinator.drive(&mut publisher, grace).await;
    Ok(outcome.exit_code())
}
