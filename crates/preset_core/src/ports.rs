//! Named network ports declared by a preset.

use std::collections::BTreeMap;
use std::fmt;

/// Name of the port used when a preset exposes a single port.
pub const DEFAULT_PORT: &str = "default";

/// Transport protocol of an exposed port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Protocol {
    Tcp,
    Udp,
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Protocol::Tcp => write!(f, "tcp"),
            Protocol::Udp => write!(f, "udp"),
        }
    }
}

/// A port inside the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Port {
    pub protocol: Protocol,
    pub port: u16,
}

impl Port {
    /// A TCP port.
    pub fn tcp(port: u16) -> Self {
        Self {
            protocol: Protocol::Tcp,
            port,
        }
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.port, self.protocol)
    }
}

/// Ports keyed by name. Iteration order is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamedPorts(BTreeMap<String, Port>);

impl NamedPorts {
    pub fn new() -> Self {
        Self::default()
    }

    /// A single TCP port registered under [`DEFAULT_PORT`].
    pub fn default_tcp(port: u16) -> Self {
        let mut ports = Self::new();
        ports.insert(DEFAULT_PORT, Port::tcp(port));
        ports
    }

    pub fn insert(&mut self, name: impl Into<String>, port: Port) -> Option<Port> {
        self.0.insert(name.into(), port)
    }

    pub fn get(&self, name: &str) -> Option<Port> {
        self.0.get(name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Port)> {
        self.0.iter().map(|(name, port)| (name.as_str(), *port))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
