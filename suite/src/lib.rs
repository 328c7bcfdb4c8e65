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


//! # TL1Kit Suite
//!
//! In-process mock network element used by the end-to-end tests, the
//! benchmarks and the demos.
//!
//! The element accepts any number of TCP connections, splits what it receives
//! on `;`, parses each command and writes whatever the responder returns for
//! it. Every parsed command is recorded.

#![warn(missing_docs, future_incompatible, rust_2018_idioms)]

use std::net::SocketAddr;
use std::sync::Arc;
use tl1kit_client::ClientConfig;
use tl1kit_codec::{AlarmCode, Command, StatusCode, Terminator};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, trace, warn};

/// Source identifier in every generated header.
pub const SOURCE_ID: &str = "MOCK-NE";

/// Timestamp in every generated header.
pub const TIMESTAMP: &str = "2024-06-01 08:30:00";

type Responder = Arc<dyn Fn(&Command) -> Vec<String> + Send + Sync>;

/// A network element listening on a loopback port.
pub struct MockElement {
    address: SocketAddr,
    received: Arc<Mutex<Vec<Command>>>,
    task: JoinHandle<()>,
}

impl MockElement {
    /// Bind an ephemeral loopback port and start serving.
    ///
    /// `responder` maps each received command to the output messages written
    /// back, in order.
    pub async fn start<F>(responder: F) -> std::io::Result<Self>
    where
        F: Fn(&Command) -> Vec<String> + Send + Sync + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let address = listener.local_addr()?;
        let received = Arc::new(Mutex::new(Vec::new()));
        let responder: Responder = Arc::new(responder);

        let log = Arc::clone(&received);
        let task = tokio::spawn(async move {
            loop {
                match listener.accept().await {
                    Ok((socket, peer)) => {
                        debug!("Mock element accepted {}", peer);
                        tokio::spawn(serve(socket, Arc::clone(&responder), Arc::clone(&log)));
                    }
                    Err(err) => {
                        warn!("Mock element stopped accepting: {}", err);
                        break;
                    }
                }
            }
        });

        Ok(Self {
            address,
            received,
            task,
        })
    }

    /// Listening address.
    pub fn address(&self) -> SocketAddr {
        self.address
    }

    /// Client configuration pointing at this element.
    pub fn config(&self) -> ClientConfig {
        ClientConfig::new(self.address.ip().to_string(), self.address.port())
    }

    /// Commands parsed so far, in arrival order.
    pub async fn received(&self) -> Vec<Command> {
        self.received.lock().await.clone()
    }
}

impl Drop for MockElement {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn serve(mut socket: TcpStream, responder: Responder, received: Arc<Mutex<Vec<Command>>>) {
    let mut pending = Vec::new();
    let mut buf = [0u8; 1024];
    loop {
        let n = match socket.read(&mut buf).await {
            Ok(0) => {
                debug!("Mock element peer disconnected");
                return;
            }
            Ok(n) => n,
            Err(err) => {
                warn!("Mock element read failed: {}", err);
                return;
            }
        };
        pending.extend_from_slice(&buf[..n]);

        while let Some(end) = pending.iter().position(|&b| b == b';') {
            let raw: Vec<u8> = pending.drain(..=end).collect();
            let text = String::from_utf8_lossy(&raw);
            let command = match text.trim().parse::<Command>() {
                Ok(command) => command,
                Err(err) => {
                    warn!("Mock element ignoring {:?}: {}", text, err);
                    continue;
                }
            };
            trace!("Mock element received {}", command);
            let replies = responder(&command);
            received.lock().await.push(command);
            for reply in replies {
                if let Err(err) = socket.write_all(reply.as_bytes()).await {
                    warn!("Mock element write failed: {}", err);
                    return;
                }
            }
        }
    }
}

// ============================================================================
// Output Message Builders
// ============================================================================

fn header() -> String {
    format!("\r\n\n   {SOURCE_ID} {TIMESTAMP}\r\n")
}

/// `CODE CTAG<`
pub fn acknowledgment(code: &str, ctag: &str) -> String {
    format!("\r\n\n   {code} {ctag}<")
}

/// A response block. `body` lines should end in `\r\n`.
pub fn response(ctag: &str, status: StatusCode, body: &str, terminator: Terminator) -> String {
    format!(
        "{}M  {ctag} {}\r\n{body}{}",
        header(),
        status.as_str(),
        terminator.as_char()
    )
}

/// An autonomous report with `clause` such as `REPT ALM ONU`.
pub fn autonomous(code: AlarmCode, atag: &str, clause: &str, body: &str) -> String {
    format!("{}{} {atag} {clause}\r\n{body};", header(), code.as_str())
}

/// A single-block list body in the Fiberhome layout.
pub fn table_body(title: &str, columns: &[&str], rows: &[Vec<String>]) -> String {
    let rule = "-".repeat(40);
    let mut body = format!(
        "   total_blocks=1\r\n   block_number=1\r\n   block_records={}\r\n{rule}\r\n{title}\r\n{}\r\n{rule}\r\n",
        rows.len(),
        columns.join("\t")
    );
    for row in rows {
        body.push_str(&row.join("\t"));
        body.push_str("\r\n");
    }
    body
}
