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

//! # TL1Kit Client
//!
//! Async TL1 session transport and request/response client.
//!
//! ## Features
//!
//! - **Session** - Owns one TCP connection, IAC-escapes writes, frames reads with a timeout
//! - **Client** - Pairs each command with its decoded reply, one at a time
//! - **Vendor Profiles** - Response construction is delegated to a [`VendorProfile`]
//! - **Async-First** - Built on Tokio and `tokio-util` codecs
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use tl1kit_client::{ClientConfig, Tl1Client};
//! use tl1kit_codec::{Command, ParameterBlock, StandardVendor, Tl1Message};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::new("10.0.0.1", 3337u16);
//!     let mut client = Tl1Client::connect(config, Arc::new(StandardVendor)).await?;
//!
//!     let login = Command::new("LOGIN").with_payload(
//!         ParameterBlock::new()
//!             .with_field("username", "UN", "admin")
//!             .with_field("password", "PWD", "secret"),
//!     );
//!     if let Some(Tl1Message::Acknowledgment(ack)) = client.execute(&login).await? {
//!         println!("Logged in: {}", ack.code);
//!     }
//!
//!     client.close();
//!     Ok(())
//! }
//! ```

#![warn(
    clippy::cargo,
    missing_docs,
    clippy::pedantic,
    future_incompatible,
    rust_2018_idioms
)]
#![allow(
    clippy::option_if_let_else,
    clippy::module_name_repetitions,
    clippy::missing_errors_doc
)]

mod client;
mod config;
mod error;
mod session;

pub use client::{Exchange, Tl1Client};
pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use session::Session;

pub use tl1kit_codec::VendorProfile;
