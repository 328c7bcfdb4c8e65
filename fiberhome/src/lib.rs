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


//! # TL1Kit Fiberhome
//!
//! Vendor profile and command builders for Fiberhome network managers.
//!
//! ## Features
//!
//! - **Response Parsing** - List replies become a [`Table`](tl1kit_codec::Table), other bodies a flat [`Record`](tl1kit_codec::Record)
//! - **Error Codes** - The `EN` catalogue with descriptions and categories
//! - **Command Builders** - Session, ONU provisioning and board commands
//!
//! ## Example
//!
//! ```
//! use tl1kit_codec::{Modifiers, ResponseData, Tl1Message, classify};
//! use tl1kit_fiberhome::{ErrorCode, Fiberhome, error_code};
//!
//! let text = "\r\n\n   OLT-7 2024-06-01 08:30:00\r\nM  3 DENY\r\n   EN=IRNE   ENDESC=Resource does not exist\r\n;";
//! let message = classify(text, &Modifiers::new(), &Fiberhome).unwrap().unwrap();
//! let response = message.into_response().unwrap();
//! assert_eq!(error_code(&response), Some(ErrorCode::ResourceNotFound));
//! assert!(matches!(response.result, Some(ResponseData::Record(_))));
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

mod commands;
mod error;
mod table;
mod types;
mod vendor;

pub use self::commands::{
    ActivateOnu, AddOnu, ConfigLanPortMacLimit, ConfigOnu, ConfigOnuBandwidth, DeactivateOnu,
    DeleteOnu, ListTrunkInfo, OnuLocator, ResetBoard, SetOnuSwitch, handshake, login, logout,
};
pub use self::error::{ERROR_FIELD, ErrorCategory, ErrorCode, UnknownErrorCode, error_code};
pub use self::table::{TABLE_MARKER, is_table, parse_record, parse_table};
pub use self::types::{AuthType, BandType, OnuIdType};
pub use self::vendor::Fiberhome;
