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

//! # TL1Kit Protocol Codec
//!
//! This crate implements the wire side of TL1 (Transaction Language 1), the text protocol used
//! to manage telecom network elements such as OLTs and ONUs over a Telnet-style TCP stream.
//!
//! ## Overview
//!
//! - **Wire primitives**: [`Number`], [`Text`], [`Ipv4Address`] and [`NetworkPort`], validated at
//!   construction and rendered to the exact token TL1 expects.
//! - **Command grammar**: [`CommandCode`], [`StagingBlock`] and [`ParameterBlock`], assembled into a
//!   [`Command`] rendering as `VERB-MOD1-MOD2:TID:AID:CTAG:GBLOCK:PARAMS;`.
//! - **Framing**: [`Tl1Codec`] implements `tokio_util::codec` [`Encoder`] and [`Decoder`], escaping
//!   IAC on the way out and cutting whole output messages on the way in.
//! - **Classification**: [`classify`] turns one output message into a [`Tl1Message`]: a
//!   [`Response`], an [`AcknowledgmentMessage`] or an [`AutonomousMessage`]. Message construction
//!   goes through a [`VendorProfile`] so vendors can parse response bodies into [`ResponseData`].
//!
//! ## Usage Example
//!
//! ```rust
//! use tl1kit_codec::{
//!     Command, Modifiers, ParameterBlock, StandardVendor, Tl1Codec, Tl1Message, classify,
//! };
//! use tokio_util::codec::{Decoder, Encoder};
//! use bytes::BytesMut;
//!
//! # fn example() -> Result<(), tl1kit_codec::CodecError> {
//! let login = Command::new("LOGIN").with_payload(
//!     ParameterBlock::new()
//!         .with_field("username", "UN", "admin")
//!         .with_field("password", "PWD", "secret"),
//! );
//!
//! let mut codec = Tl1Codec::new();
//! let mut out = BytesMut::new();
//! codec.encode(&login, &mut out)?;
//! assert_eq!(&out[..], b"LOGIN:::CTAG::UN=admin,PWD=secret;");
//!
//! let mut input = BytesMut::from(&b"\r\n\n      OK CTAG<"[..]);
//! let text = codec.decode(&mut input)?.expect("complete message");
//! let message = classify(&text, login.modifiers(), &StandardVendor)?;
//! assert!(matches!(message, Some(Tl1Message::Acknowledgment(_))));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Output Message Shapes
//!
//! ```text
//! \r\n\n   <SID> <YYYY-MM-DD HH:MM:SS>\r\n     response and autonomous header
//! M  <CTAG> <STATUS>\r\n                       response identifier
//! <ALARM> <ATAG> <CLAUSE...>\r\n               autonomous identifier
//! <BODY><TERMINATOR>                           ';' stop, '>' continue
//!
//! \r\n\n      <CODE> <CTAG><                   acknowledgment
//! ```
//!
//! ## Thread Safety
//!
//! `Tl1Codec` is not meant to be shared; each connection owns its own instance. Commands and
//! messages are plain values.
//!
//! [`Encoder`]: tokio_util::codec::Encoder
//! [`Decoder`]: tokio_util::codec::Decoder

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

mod classify;
mod codec;
mod command;
pub mod consts;
mod message;
mod record;
mod result;
mod types;
mod vendor;

pub use self::classify::classify;
pub use self::codec::Tl1Codec;
pub use self::command::{
    Command, CommandCode, Modifiers, Parameter, ParameterBlock, ResponseKind, StagingBlock,
    parse_parameters,
};
pub use self::message::{
    AcknowledgmentMessage, AlarmCode, AutonomousIdentifier, AutonomousMessage, Response,
    ResponseHeader, ResponseId, StatusCode, Terminator, Tl1Message,
};
pub use self::record::{Record, ResponseData, Table};
pub use self::result::{CodecError, CodecResult};
pub use self::types::{Ipv4Address, NetworkPort, Number, Text, Value};
pub use self::vendor::{StandardVendor, VendorProfile};

#[cfg(test)]
mod tests {
    use super::{Command, Modifiers, StandardVendor, Tl1Codec, Tl1Message, classify};
    use bytes::BytesMut;
    use tokio_util::codec::{Decoder, Encoder};

    #[test]
    fn encode_decode_classify() {
        let mut codec = Tl1Codec::new();
        let mut out = BytesMut::new();
        codec
            .encode(&Command::new("SHAKEHAND").with_ctag("9"), &mut out)
            .unwrap();
        assert_eq!(&out[..], b"SHAKEHAND:::9::;");

        let mut input = BytesMut::from(
            &b"\xFF\xFB\x01\r\n\n   OLT 2024-01-01 00:00:00\r\nM  9 COMPLD\r\n;\r\n"[..],
        );
        let text = codec.decode(&mut input).unwrap().unwrap();
        let message = classify(&text, &Modifiers::default(), &StandardVendor)
            .unwrap()
            .unwrap();
        assert!(matches!(&message, Tl1Message::Response(r) if r.ctag() == "9" && r.text.is_empty()));
    }
}
