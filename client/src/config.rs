//
// Copyright 2017-2026 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

//! Client configuration

use std::time::Duration;
use tl1kit_codec::NetworkPort;

/// TL1 session configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Network element hostname or IP address
    pub host: Option<String>,

    /// Network element TL1 port
    pub port: Option<NetworkPort>,

    /// Connection timeout
    pub connect_timeout: Duration,

    /// How long to wait for each output message
    pub response_timeout: Duration,

    /// Disable Nagle's algorithm on the socket
    pub nodelay: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: None,
            port: None,
            connect_timeout: Duration::from_secs(5),
            response_timeout: Duration::from_secs(5),
            nodelay: true,
        }
    }
}

impl ClientConfig {
    /// Create a new client configuration with the given host and port
    pub fn new(host: impl Into<String>, port: impl Into<NetworkPort>) -> Self {
        Self {
            host: Some(host.into()),
            port: Some(port.into()),
            ..Default::default()
        }
    }

    /// Set the host
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Set the port
    pub fn with_port(mut self, port: impl Into<NetworkPort>) -> Self {
        self.port = Some(port.into());
        self
    }

    /// Set the connection timeout
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the response timeout
    pub fn with_response_timeout(mut self, timeout: Duration) -> Self {
        self.response_timeout = timeout;
        self
    }

    /// Enable or disable `TCP_NODELAY`
    pub fn with_nodelay(mut self, nodelay: bool) -> Self {
        self.nodelay = nodelay;
        self
    }

    /// Get the network element address as a string, if host and port are both set
    pub fn address(&self) -> Option<String> {
        match (&self.host, self.port) {
            (Some(host), Some(port)) => Some(format!("{host}:{port}")),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.address(), None);
        assert_eq!(config.response_timeout, Duration::from_secs(5));
        assert!(config.nodelay);
    }

    #[test]
    fn address_needs_host_and_port() {
        assert_eq!(
            ClientConfig::new("10.0.0.1", 3337u16).address().as_deref(),
            Some("10.0.0.1:3337")
        );
        assert_eq!(ClientConfig::default().with_host("olt").address(), None);
        assert_eq!(ClientConfig::default().with_port(3337u16).address(), None);
    }
}
