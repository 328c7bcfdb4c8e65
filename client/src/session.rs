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

//! Session transport

use crate::{ClientConfig, ClientError, Result};
use futures::{SinkExt, StreamExt};
use metrics::counter;
use std::time::Duration;
use tl1kit_codec::{Command, Tl1Codec};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tokio_util::codec::Framed;
use tracing::{debug, info, instrument, trace, warn};

/// One TL1 connection to a network element.
///
/// Writes are rendered and IAC-escaped by [`Tl1Codec`]; reads yield one
/// complete output message at a time. The session owns its stream
/// exclusively and closes it when dropped.
#[derive(Debug)]
pub struct Session<S = TcpStream> {
    framed: Option<Framed<S, Tl1Codec>>,
    config: ClientConfig,
}

impl Session<TcpStream> {
    /// Create an unconnected session.
    pub fn new(config: ClientConfig) -> Self {
        Self {
            framed: None,
            config,
        }
    }

    /// Create a session and connect it.
    pub async fn open(config: ClientConfig) -> Result<Self> {
        let mut session = Self::new(config);
        session.connect().await?;
        Ok(session)
    }

    /// Connect to the configured host and port.
    ///
    /// # Errors
    /// - [`ClientError::AlreadyConnected`] if the session has a connection
    /// - [`ClientError::MissingAddress`] if host or port is unset
    /// - [`ClientError::ConnectTimeout`] if the attempt exceeds the connect timeout
    /// - [`ClientError::Io`] if the attempt fails
    #[instrument(skip(self), fields(host = ?self.config.host, port = ?self.config.port))]
    pub async fn connect(&mut self) -> Result<()> {
        if self.framed.is_some() {
            return Err(ClientError::AlreadyConnected);
        }
        let address = self.config.address().ok_or(ClientError::MissingAddress)?;

        let limit = self.config.connect_timeout;
        let stream = match tokio::time::timeout(limit, TcpStream::connect(&address)).await {
            Ok(result) => result?,
            Err(_) => {
                warn!("Connection to {} timed out after {:?}", address, limit);
                return Err(ClientError::ConnectTimeout(limit));
            }
        };
        stream.set_nodelay(self.config.nodelay)?;

        info!("Connected to {}", address);
        self.framed = Some(Framed::new(stream, Tl1Codec::new()));
        Ok(())
    }
}

impl<S> Session<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Wrap an already established stream.
    pub fn from_stream(stream: S, config: ClientConfig) -> Self {
        Self {
            framed: Some(Framed::new(stream, Tl1Codec::new())),
            config,
        }
    }

    /// `true` while the session holds a connection.
    pub fn is_connected(&self) -> bool {
        self.framed.is_some()
    }

    /// Session configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn framed(&mut self) -> Result<&mut Framed<S, Tl1Codec>> {
        self.framed.as_mut().ok_or(ClientError::NotConnected)
    }

    /// Send a command.
    pub async fn write(&mut self, command: &Command) -> Result<()> {
        let framed = self.framed()?;
        SinkExt::<&Command>::send(framed, command).await?;
        counter!("tl1kit.commands.sent").increment(1);
        trace!("Sent {}", command);
        Ok(())
    }

    /// Send raw bytes. `0xFF` is doubled on the wire.
    pub async fn write_raw(&mut self, bytes: &[u8]) -> Result<()> {
        let framed = self.framed()?;
        SinkExt::<&[u8]>::send(framed, bytes).await?;
        Ok(())
    }

    /// Wait up to `wait` for the next complete output message.
    ///
    /// Messages already buffered are returned first, in arrival order.
    ///
    /// # Errors
    /// - [`ClientError::Timeout`] when nothing complete arrives in time
    /// - [`ClientError::ConnectionClosed`] when the peer closes the stream;
    ///   the session is then disconnected
    /// - [`ClientError::Codec`] wrapping an I/O error when the read fails;
    ///   the session is then disconnected
    pub async fn get_response(&mut self, wait: Duration) -> Result<String> {
        let framed = self.framed()?;
        match tokio::time::timeout(wait, framed.next()).await {
            Err(_) => {
                counter!("tl1kit.responses.timeouts").increment(1);
                warn!("No response within {:?}", wait);
                Err(ClientError::Timeout(wait))
            }
            Ok(None) => {
                debug!("Connection stream ended");
                self.framed = None;
                Err(ClientError::ConnectionClosed)
            }
            Ok(Some(Err(err))) => {
                warn!("Read failed, closing session: {}", err);
                self.framed = None;
                Err(err.into())
            }
            Ok(Some(Ok(message))) => {
                counter!("tl1kit.responses.received").increment(1);
                trace!("Received {:?}", message);
                Ok(message)
            }
        }
    }

    /// [`Session::get_response`] with the configured response timeout.
    pub async fn read_response(&mut self) -> Result<String> {
        self.get_response(self.config.response_timeout).await
    }

    /// Close the connection. Returns `false` if there was none.
    pub fn close(&mut self) -> bool {
        match self.framed.take() {
            Some(_) => {
                debug!("Session closed");
                true
            }
            None => false,
        }
    }
}

impl<S> Drop for Session<S> {
    fn drop(&mut self) {
        if self.framed.take().is_some() {
            debug!("Session dropped while connected, closing");
        }
    }
}
