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


//! # Fiberhome ONU Provisioning Demo
//!
//! Logs in to a Fiberhome network manager, lists the trunks of an OLT,
//! authorizes an ONU and logs out.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --example fiberhome_onus -- <host> <port> <user> <password> <olt-ip>
//! ```
//!
//! Without arguments the demo starts an in-process mock element and talks to
//! that instead.

use std::sync::Arc;
use tl1kit_client::{ClientConfig, Tl1Client};
use tl1kit_codec::{Command, ResponseData, StatusCode, Terminator, Tl1Message};
use tl1kit_fiberhome::{AddOnu, AuthType, Fiberhome, ListTrunkInfo, error_code, login, logout};
use tl1kit_suite::{MockElement, acknowledgment, response, table_body};
use tracing::{info, warn};

fn mock_reply(command: &Command) -> Vec<String> {
    let ctag = command.ctag();
    if command.code().to_string() == "LST-TRUNKINFO" {
        let rows = vec![vec!["1".to_string(), "NA-NA-19-1".to_string(), "NA-NA-19-2".to_string()]];
        vec![
            acknowledgment("IP", ctag),
            response(
                ctag,
                StatusCode::Completed,
                &table_body("List of Trunk", &["TRUNKNO", "MASTERPORT", "MEMBERPORT"], &rows),
                Terminator::Stop,
            ),
        ]
    } else {
        vec![response(
            ctag,
            StatusCode::Completed,
            "   EN=0   ENDESC=No error\r\n",
            Terminator::Stop,
        )]
    }
}

fn report(label: &str, message: Option<Tl1Message>) {
    match message.and_then(Tl1Message::into_response) {
        Some(reply) if reply.status().is_success() => info!("{}: {}", label, reply.status().as_str()),
        Some(reply) => match error_code(&reply) {
            Some(code) => warn!("{}: {}", label, code),
            None => warn!("{}: {}", label, reply.status().as_str()),
        },
        None => warn!("{}: no response", label),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Parse arguments
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (config, user, password, olt, _mock) = if let [host, port, user, password, olt] = args.as_slice() {
        let port: u16 = port.parse()?;
        (
            ClientConfig::new(host.as_str(), port),
            user.clone(),
            password.clone(),
            olt.clone(),
            None,
        )
    } else {
        let mock = MockElement::start(mock_reply).await?;
        info!("No target given, using mock element at {}", mock.address());
        let config = mock.config();
        (config, "admin".into(), "admin".into(), "10.0.0.1".into(), Some(mock))
    };
    let olt = olt.parse()?;

    let mut client = Tl1Client::connect(config, Arc::new(Fiberhome)).await?;
    report("login", client.execute(&login(&user, &password)).await?);

    if let Some(exchange) = client
        .execute_complete(&ListTrunkInfo::Olt(olt).build().with_ctag("10"))
        .await?
    {
        if let Some(ResponseData::Table(table)) = exchange.response().and_then(|r| r.result.as_ref()) {
            info!("{} ({} rows)", table.title, table.rows.len());
            for row in &table.rows {
                let cells: Vec<String> = row.iter().map(|(k, v)| format!("{k}={v}")).collect();
                info!("  {}", cells.join(" "));
            }
        }
    }

    let add = AddOnu::new(olt, "NA-NA-3-1", "FHTT00010001", "AN5506-01-A1")
        .with_auth_type(AuthType::Mac)
        .with_name("demo-onu")
        .build()
        .with_ctag("11");
    report("add onu", client.execute(&add).await?);

    report("logout", client.execute(&logout()).await?);
    client.close();
    Ok(())
}
