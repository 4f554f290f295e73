//! Handle to a running container, as seen by a preset.

use crate::ports::{NamedPorts, DEFAULT_PORT};

/// A started container.
///
/// `ports` holds the host-side ports the orchestrator mapped for each named
/// container port. Presets only read addresses from this handle; the
/// container's lifetime belongs to whoever created it.
#[derive(Debug, Clone)]
pub struct Container {
    /// Container identifier assigned by the runtime
    pub id: String,
    /// Host the mapped ports are reachable on
    pub host: String,
    /// Host-side ports, keyed by the names the preset declared
    pub ports: NamedPorts,
}

impl Container {
    pub fn new(id: impl Into<String>, host: impl Into<String>, ports: NamedPorts) -> Self {
        Self {
            id: id.into(),
            host: host.into(),
            ports,
        }
    }

    /// `host:port` for the named port, if it was mapped.
    pub fn address(&self, name: &str) -> Option<String> {
        self.ports
            .get(name)
            .map(|port| format!("{}:{}", self.host, port.port))
    }

    /// Address of [`DEFAULT_PORT`].
    pub fn default_address(&self) -> Option<String> {
        self.address(DEFAULT_PORT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::Port;

    #[test]
    fn test_address() {
        let mut ports = NamedPorts::default_tcp(49153);
        ports.insert("web", Port::tcp(8080));
        let container = Container::new("abc123", "127.0.0.1", ports);

        assert_eq!(container.default_address().as_deref(), Some("127.0.0.1:49153"));
        assert_eq!(container.address("web").as_deref(), Some("127.0.0.1:8080"));
        assert_eq!(container.address("missing"), None);
    }
}
