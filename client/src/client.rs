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

//! Client orchestrator

use crate::{ClientConfig, ClientError, Result, Session};
use metrics::counter;
use std::sync::Arc;
use tl1kit_codec::{
    AcknowledgmentMessage, AutonomousMessage, Command, Response, Tl1Message, VendorProfile,
    classify,
};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tracing::{debug, instrument, warn};

/// Everything read while waiting for the final block of a reply.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Exchange {
    /// Acknowledgments carrying the command's ctag
    pub acknowledgments: Vec<AcknowledgmentMessage>,
    /// Response blocks carrying the command's ctag, the last one final
    pub responses: Vec<Response>,
    /// Autonomous messages that arrived meanwhile
    pub autonomous: Vec<AutonomousMessage>,
    /// Acknowledgments and responses for other ctags
    pub uncorrelated: Vec<Tl1Message>,
}

impl Exchange {
    /// The final response block.
    pub fn response(&self) -> Option<&Response> {
        self.responses.last()
    }
}

/// Pairs each command with its decoded reply over one [`Session`].
///
/// Commands are strictly one at a time: each call writes, then waits for the
/// reply before returning. Message construction goes through the vendor
/// profile given at construction.
#[derive(Debug)]
pub struct Tl1Client<S = TcpStream> {
    session: Option<Session<S>>,
    vendor: Arc<dyn VendorProfile>,
}

impl Tl1Client<TcpStream> {
    /// A client without a session.
    pub fn new(vendor: Arc<dyn VendorProfile>) -> Self {
        Self {
            session: None,
            vendor,
        }
    }

    /// Connect a new session and wrap it.
    pub async fn connect(config: ClientConfig, vendor: Arc<dyn VendorProfile>) -> Result<Self> {
        let session = Session::open(config).await?;
        Ok(Self::with_session(session, vendor))
    }

    /// Connect the client to the network element in `config`.
    ///
    /// # Errors
    /// [`ClientError::AlreadyConnected`] if the client holds a live session,
    /// otherwise whatever [`Session::connect`] returns.
    pub async fn open(&mut self, config: ClientConfig) -> Result<()> {
        if self.is_connected() {
            return Err(ClientError::AlreadyConnected);
        }
        self.session = Some(Session::open(config).await?);
        Ok(())
    }
}

impl<S> Tl1Client<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Wrap an existing session.
    pub fn with_session(session: Session<S>, vendor: Arc<dyn VendorProfile>) -> Self {
        Self {
            session: Some(session),
            vendor,
        }
    }

    /// `true` while the client holds a live session.
    pub fn is_connected(&self) -> bool {
        self.session.as_ref().is_some_and(Session::is_connected)
    }

    /// The vendor profile used to build messages.
    pub fn vendor(&self) -> &dyn VendorProfile {
        self.vendor.as_ref()
    }

    /// The live session, if any.
    pub fn session_mut(&mut self) -> Option<&mut Session<S>> {
        self.session.as_mut().filter(|session| session.is_connected())
    }

    /// Send `command` and decode the first output message that comes back.
    ///
    /// Returns `Ok(None)` without touching the wire when the command is not
    /// well formed.
    ///
    /// # Errors
    /// [`ClientError::NotConnected`] without a live session, otherwise any
    /// transport or classification error.
    #[instrument(skip(self, command), fields(ctag = %command.ctag()))]
    pub async fn execute(&mut self, command: &Command) -> Result<Option<Tl1Message>> {
        let session = live(&mut self.session)?;
        if !command.is_well_formed() {
            warn!("Refusing ill-formed command {:?}", command.code());
            return Ok(None);
        }
        session.write(command).await?;
        let text = session.read_response().await?;

        let message = classify(&text, command.modifiers(), self.vendor.as_ref())?;
        if let Some(Tl1Message::Autonomous(alarm)) = &message {
            counter!("tl1kit.autonomous.received").increment(1);
            debug!("Autonomous message {} arrived in place of a reply", alarm.identifier.atag);
        }
        Ok(message)
    }

    /// Send `command` and read until its final response block.
    ///
    /// Acknowledgments and response blocks are matched on the command's ctag;
    /// autonomous messages and replies for other ctags are collected on the
    /// side. Each read waits at most the configured response timeout.
    ///
    /// Returns `Ok(None)` without touching the wire when the command is not
    /// well formed.
    #[instrument(skip(self, command), fields(ctag = %command.ctag()))]
    pub async fn execute_complete(&mut self, command: &Command) -> Result<Option<Exchange>> {
        let session = live(&mut self.session)?;
        if !command.is_well_formed() {
            warn!("Refusing ill-formed command {:?}", command.code());
            return Ok(None);
        }
        session.write(command).await?;

        let mut exchange = Exchange::default();
        loop {
            let text = session.read_response().await?;
            let Some(message) = classify(&text, command.modifiers(), self.vendor.as_ref())? else {
                continue;
            };
            match message {
                Tl1Message::Acknowledgment(ack) if ack.ctag == command.ctag() => {
                    debug!("Acknowledged with {}", ack.code);
                    exchange.acknowledgments.push(ack);
                }
                Tl1Message::Response(response) if response.ctag() == command.ctag() => {
                    let last = response.is_final();
                    exchange.responses.push(response);
                    if last {
                        return Ok(Some(exchange));
                    }
                }
                Tl1Message::Autonomous(alarm) => {
                    counter!("tl1kit.autonomous.received").increment(1);
                    exchange.autonomous.push(alarm);
                }
                other => {
                    warn!("Message for ctag {:?} while waiting on {}", other.ctag(), command.ctag());
                    exchange.uncorrelated.push(other);
                }
            }
        }
    }

    /// Close the session. Returns whether a live session was torn down.
    pub fn close(&mut self) -> bool {
        self.session.take().is_some_and(|mut session| session.close())
    }
}

fn live<S>(session: &mut Option<Session<S>>) -> Result<&mut Session<S>>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    session
        .as_mut()
        .filter(|session| session.is_connected())
        .ok_or(ClientError::NotConnected)
}
