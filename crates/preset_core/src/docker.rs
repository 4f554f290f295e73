//! Run a [`Preset`] on Docker through testcontainers.
//!
//! Requires the `docker` feature to be enabled.

use crate::container::Container;
use crate::error::LifecycleError;
use crate::lifecycle;
use crate::ports::{NamedPorts, Port, Protocol};
use crate::preset::{split_image_reference, Preset};
use testcontainers::core::{ContainerPort, WaitFor};
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, Image, TestcontainersError};
use thiserror::Error;
use tracing::info;

/// Errors from starting a preset on Docker.
#[derive(Error, Debug)]
pub enum DockerError<E: std::error::Error + 'static> {
    #[error("Container runtime error: {0}")]
    Runtime(#[from] TestcontainersError),

    #[error(transparent)]
    Lifecycle(LifecycleError<E>),
}

/// A testcontainers image built from a preset's declarations.
///
/// Readiness is left to the preset's own healthcheck, so no wait
/// conditions are registered with testcontainers.
#[derive(Debug, Clone)]
pub struct PresetImage {
    name: String,
    tag: String,
    env: Vec<(String, String)>,
    ports: Vec<ContainerPort>,
}

impl PresetImage {
    pub fn new<P: Preset + ?Sized>(preset: &P) -> Self {
        let image = preset.image();
        let (name, tag) = split_image_reference(&image);
        let ports = preset
            .ports()
            .iter()
            .map(|(_, port)| container_port(port))
            .collect();

        Self {
            name: name.to_string(),
            tag: tag.to_string(),
            env: preset.env(),
            ports,
        }
    }
}

fn container_port(port: Port) -> ContainerPort {
    match port.protocol {
        Protocol::Tcp => ContainerPort::Tcp(port.port),
        Protocol::Udp => ContainerPort::Udp(port.port),
    }
}

impl Image for PresetImage {
    fn name(&self) -> &str {
        &self.name
    }

    fn tag(&self) -> &str {
        &self.tag
    }

    fn ready_conditions(&self) -> Vec<WaitFor> {
        Vec::new()
    }

    fn env_vars(
        &self,
    ) -> impl IntoIterator<Item = (impl Into<std::borrow::Cow<'_, str>>, impl Into<std::borrow::Cow<'_, str>>)>
    {
        self.env.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn expose_ports(&self) -> &[ContainerPort] {
        &self.ports
    }
}

/// A preset container that passed its healthcheck and init routine.
///
/// Dropping this removes the container.
pub struct RunningPreset {
    #[allow(dead_code)] // Kept to maintain container lifetime
    container: ContainerAsync<PresetImage>,
    handle: Container,
}

impl RunningPreset {
    /// The handle presets and tests use to reach the container.
    pub fn container(&self) -> &Container {
        &self.handle
    }

    /// `host:port` for a named port.
    pub fn address(&self, name: &str) -> Option<String> {
        self.handle.address(name)
    }
}

/// Start the preset's image, then wait for it to become healthy and init it.
pub async fn start<P: Preset + ?Sized>(preset: &P) -> Result<RunningPreset, DockerError<P::Error>> {
    let image = PresetImage::new(preset);
    info!("Starting container {}:{}", image.name, image.tag);

    let container = image.start().await?;
    let host = container.get_host().await?.to_string();

    let mut ports = NamedPorts::new();
    for (name, port) in preset.ports().iter() {
        let mapped = container.get_host_port_ipv4(container_port(port)).await?;
        ports.insert(
            name,
            Port {
                protocol: port.protocol,
                port: mapped,
            },
        );
    }

    let handle = Container::new(container.id(), host, ports);
    lifecycle::ready(preset, &handle)
        .await
        .map_err(DockerError::Lifecycle)?;

    Ok(RunningPreset { container, handle })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::convert::Infallible;

    struct Fixed;

    #[async_trait]
    impl Preset for Fixed {
        type Error = Infallible;

        fn image(&self) -> String {
            "localhost:5000/db/server:2022".to_string()
        }

        fn ports(&self) -> NamedPorts {
            let mut ports = NamedPorts::default_tcp(1433);
            ports.insert("metrics", Port { protocol: Protocol::Udp, port: 8125 });
            ports
        }

        fn env(&self) -> Vec<(String, String)> {
            vec![("KEY".to_string(), "value".to_string())]
        }

        async fn healthcheck(&self, _container: &Container) -> Result<(), Infallible> {
            Ok(())
        }
    }

    #[test]
    fn test_image_from_preset() {
        let image = PresetImage::new(&Fixed);
        assert_eq!(image.name(), "localhost:5000/db/server");
        assert_eq!(image.tag(), "2022");
        assert_eq!(
            image.expose_ports(),
            &[ContainerPort::Tcp(1433), ContainerPort::Udp(8125)]
        );
        assert_eq!(image.env, vec![("KEY".to_string(), "value".to_string())]);
        assert!(image.ready_conditions().is_empty());
    }
}
