//! # minihap-adapter-mdns
//!
//! Advertises a published accessory on the local network.
//!
//! The accessory is announced as a `_hap._tcp` DNS-SD service through the
//! `mdns-sd` daemon. Requests are dispatched through an in-process
//! transport; this crate does not speak the accessory session protocol.
//!
//! ## Dependency rule
//!
//! Same as other adapters: depends on `minihap-app` and `minihap-domain`.

mod config;
mod error;
pub mod records;

pub use config::MdnsConfig;
pub use error::MdnsError;

use mdns_sd::{ServiceDaemon, ServiceInfo, UnregisterStatus};

use minihap_app::ports::{AccessoryTransport, SharedHandler};
use minihap_app::transport::{Controller, InProcessTransport};
use minihap_domain::accessory::Registration;
use minihap_domain::credentials::Credentials;
use minihap_domain::error::TransportError;

/// Transport announcing the accessory over mDNS.
pub struct MdnsTransport {
    config: MdnsConfig,
    daemon: ServiceDaemon,
    dispatch: InProcessTransport,
    fullname: Option<String>,
}

impl MdnsTransport {
    /// Start the mDNS daemon.
    ///
    /// # Errors
    ///
    /// Returns [`MdnsError::Daemon`] if the daemon cannot bind its sockets.
    pub fn new(config: MdnsConfig) -> Result<Self, MdnsError> {
        let daemon = ServiceDaemon::new().map_err(MdnsError::Daemon)?;
        Ok(Self {
            config,
            daemon,
            dispatch: InProcessTransport::new(),
            fullname: None,
        })
    }

    /// Handle for issuing requests against the published handler.
    #[must_use]
    pub fn controller(&self) -> Controller {
        self.dispatch.controller()
    }

    fn service_info(&self, registration: &Registration) -> Result<ServiceInfo, MdnsError> {
        let txt = records::txt_records(registration)?;
        let username = registration
            .credentials
            .as_ref()
            .map(Credentials::username)
            .ok_or(MdnsError::IncompleteRegistration("credentials"))?;

        let info = ServiceInfo::new(
            records::SERVICE_TYPE,
            &records::instance_name(&registration.display_name),
            &records::host_name(username),
            (),
            self.config.port,
            txt,
        )
        .map_err(MdnsError::ServiceInfo)?
        .enable_addr_auto();
        Ok(info)
    }
}

impl AccessoryTransport for MdnsTransport {
    async fn publish(
        &mut self,
        registration: &Registration,
        handler: SharedHandler,
    ) -> Result<(), TransportError> {
        let info = self.service_info(registration)?;
        let fullname = info.get_fullname().to_string();

        self.dispatch.publish(registration, handler).await?;
        if let Err(err) = self.daemon.register(info) {
            if let Err(rollback) = self.dispatch.unpublish().await {
                tracing::debug!(error = %rollback, "dispatch rollback failed");
            }
            return Err(MdnsError::Register(err).into());
        }

        tracing::info!(
            service = %fullname,
            port = self.config.port,
            "advertising accessory"
        );
        self.fullname = Some(fullname);
        Ok(())
    }

    async fn unpublish(&mut self) -> Result<(), TransportError> {
        let dispatch = self.dispatch.unpublish().await;

        if let Some(fullname) = self.fullname.take() {
            let receiver = self
                .daemon
                .unregister(&fullname)
                .map_err(MdnsError::Unregister)?;
            match receiver.recv_async().await {
                Ok(UnregisterStatus::OK) => {
                    tracing::info!(service = %fullname, "stopped advertising accessory");
                }
                Ok(UnregisterStatus::NotFound) => {
                    tracing::warn!(service = %fullname, "service was not registered");
                }
                Err(_) => return Err(MdnsError::DaemonGone.into()),
            }
        }

        dispatch
    }
}

impl Drop for MdnsTransport {
    fn drop(&mut self) {
        if let Err(err) = self.daemon.shutdown() {
            tracing::debug!(error = %err, "mDNS daemon already stopped");
        }
    }
}
