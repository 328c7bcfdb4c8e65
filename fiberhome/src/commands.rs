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


//! Command builders.
//!
//! Each builder renders to a plain [`Command`]; tid and ctag stay at their
//! defaults and can be changed on the result.

use crate::types::{AuthType, BandType, OnuIdType};
use tl1kit_codec::{Command, CommandCode, Ipv4Address, ParameterBlock, ResponseKind};

/// Log in to the network manager.
pub fn login(username: &str, password: &str) -> Command {
    Command::new("LOGIN").with_payload(
        ParameterBlock::new()
            .with_field("username", "UN", username)
            .with_field("password", "PWD", password),
    )
}

/// End the session.
pub fn logout() -> Command {
    Command::new("LOGOUT")
}

/// Keep-alive. Idle connections are dropped by the manager after ten minutes.
pub fn handshake() -> Command {
    Command::new("SHAKEHAND")
}

/// Fields of an ONU description that address its PON port.
const PON_ADDRESS: &[&str] = &["olt_id", "pon_id"];

fn code(verb: &str, mod1: &str) -> CommandCode {
    CommandCode::new(verb).with_mod1(mod1)
}

/// Addresses one ONU.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OnuLocator {
    /// A manageable ONU reachable by its own address
    ByIp(Ipv4Address),
    /// An ONU found through its OLT and PON port
    ByPosition {
        /// OLT management address
        olt_id: Ipv4Address,
        /// `rack-shelf-slot-port`, `NA` for unknown parts
        pon_id: String,
        /// How `onu_id` is to be read
        onu_id_type: OnuIdType,
        /// ONU identifier
        onu_id: String,
    },
}

impl OnuLocator {
    /// Locate an ONU by OLT, PON port and identifier.
    pub fn by_position(
        olt_id: Ipv4Address,
        pon_id: impl Into<String>,
        onu_id_type: OnuIdType,
        onu_id: impl Into<String>,
    ) -> Self {
        OnuLocator::ByPosition {
            olt_id,
            pon_id: pon_id.into(),
            onu_id_type,
            onu_id: onu_id.into(),
        }
    }

    /// The access identifier block.
    pub fn to_block(&self) -> ParameterBlock {
        match self {
            OnuLocator::ByIp(ip) => ParameterBlock::new().with_field("onu_ip", "ONUIP", *ip),
            OnuLocator::ByPosition {
                olt_id,
                pon_id,
                onu_id_type,
                onu_id,
            } => ParameterBlock::new()
                .with_field("olt_id", "OLTID", *olt_id)
                .with_field("pon_id", "PONID", pon_id.as_str())
                .with_field("onu_id_type", "ONUIDTYPE", *onu_id_type)
                .with_field("onu_id", "ONUID", onu_id.as_str()),
        }
    }
}

/// Authorize a new ONU on a PON port (`ADD-ONU`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddOnu {
    fields: ParameterBlock,
}

impl AddOnu {
    /// `onu_id` is usually the ONU serial, `model` its type such as `AN5506-01-A1`.
    pub fn new(
        olt_id: Ipv4Address,
        pon_id: impl Into<String>,
        onu_id: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            fields: ParameterBlock::new()
                .with_field("olt_id", "OLTID", olt_id)
                .with_field("pon_id", "PONID", pon_id.into())
                .with_field("onu_id", "ONUID", onu_id.into())
                .with_field("model", "ONUTYPE", model.into()),
        }
    }

    /// Authentication mode.
    pub fn with_auth_type(mut self, auth_type: AuthType) -> Self {
        self.fields = self.fields.with_field("auth_type", "AUTHTYPE", auth_type);
        self
    }

    /// Authentication password.
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.fields = self.fields.with_field("password", "PWD", password.into());
        self
    }

    /// Index on the PON port.
    pub fn with_onu_number(mut self, number: u32) -> Self {
        self.fields = self.fields.with_field("onu_number", "ONUNO", number);
        self
    }

    /// Display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.fields = self.fields.with_field("name", "NAME", name.into());
        self
    }

    /// Free-form description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.fields = self
            .fields
            .with_field("description", "DESC", description.into());
        self
    }

    /// Line rate.
    pub fn with_band_type(mut self, band_type: BandType) -> Self {
        self.fields = self.fields.with_field("band_type", "BANDTYPE", band_type);
        self
    }

    /// Render the command. The PON port goes to the aid, the rest to the payload.
    pub fn build(self) -> Command {
        let onu: Vec<&str> = self
            .fields
            .iter()
            .map(|(name, _)| name)
            .filter(|name| !PON_ADDRESS.contains(name))
            .collect();
        Command::from_code(code("ADD", "ONU"))
            .with_aid(self.fields.select(PON_ADDRESS))
            .with_payload(self.fields.select(&onu))
    }
}

/// Change how an ONU authenticates, typically when it is replaced (`CFG-ONU`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigOnu {
    olt_id: Ipv4Address,
    pon_id: String,
    onu_id_type: OnuIdType,
    onu_id: String,
    auth_type: AuthType,
    auth_info: Option<String>,
}

impl ConfigOnu {
    /// Authentication defaults to [`AuthType::Loid`].
    pub fn new(
        olt_id: Ipv4Address,
        pon_id: impl Into<String>,
        onu_id_type: OnuIdType,
        onu_id: impl Into<String>,
    ) -> Self {
        Self {
            olt_id,
            pon_id: pon_id.into(),
            onu_id_type,
            onu_id: onu_id.into(),
            auth_type: AuthType::Loid,
            auth_info: None,
        }
    }

    /// Authentication mode.
    pub fn with_auth_type(mut self, auth_type: AuthType) -> Self {
        self.auth_type = auth_type;
        self
    }

    /// New LOID or MAC address.
    pub fn with_auth_info(mut self, auth_info: impl Into<String>) -> Self {
        self.auth_info = Some(auth_info.into());
        self
    }

    /// Render the command.
    pub fn build(self) -> Command {
        let locator =
            OnuLocator::by_position(self.olt_id, self.pon_id, self.onu_id_type, self.onu_id);
        let mut payload = ParameterBlock::new().with_field("auth_type", "AUTHTYPE", self.auth_type);
        if let Some(info) = self.auth_info {
            payload = payload.with_field("auth_info", "AUTHINFO", info);
        }
        Command::from_code(code("CFG", "ONU"))
            .with_aid(locator.to_block())
            .with_payload(payload)
    }
}

/// Apply uplink and downlink bandwidth templates to an ONU (`CFG-ONUBW`).
///
/// Templates must already exist in the network manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigOnuBandwidth {
    locator: OnuLocator,
    up: String,
    down: Option<String>,
}

impl ConfigOnuBandwidth {
    /// Set the uplink template.
    pub fn new(locator: OnuLocator, up: impl Into<String>) -> Self {
        Self {
            locator,
            up: up.into(),
            down: None,
        }
    }

    /// Also set the downlink template.
    pub fn with_down(mut self, down: impl Into<String>) -> Self {
        self.down = Some(down.into());
        self
    }

    /// Render the command.
    pub fn build(self) -> Command {
        let mut payload = ParameterBlock::new().with_field("up_bandwidth", "UPBW", self.up);
        if let Some(down) = self.down {
            payload = payload.with_field("down_bandwidth", "DOWNBW", down);
        }
        Command::from_code(code("CFG", "ONUBW"))
            .with_aid(self.locator.to_block())
            .with_payload(payload)
    }
}

/// Remove an authorized ONU together with its services (`DEL-ONU`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteOnu {
    olt_id: Ipv4Address,
    pon_id: String,
    onu_id_type: OnuIdType,
    onu_id: String,
}

impl DeleteOnu {
    /// Identify the ONU to remove.
    pub fn new(
        olt_id: Ipv4Address,
        pon_id: impl Into<String>,
        onu_id_type: OnuIdType,
        onu_id: impl Into<String>,
    ) -> Self {
        Self {
            olt_id,
            pon_id: pon_id.into(),
            onu_id_type,
            onu_id: onu_id.into(),
        }
    }

    /// Render the command.
    pub fn build(self) -> Command {
        let fields =
            OnuLocator::by_position(self.olt_id, self.pon_id, self.onu_id_type, self.onu_id)
                .to_block();
        Command::from_code(code("DEL", "ONU"))
            .with_aid(fields.select(PON_ADDRESS))
            .with_payload(fields.select(&["onu_id_type", "onu_id"]))
    }
}

/// Limit learned MAC addresses on an ONU LAN port (`CFG-LANPORTMACLIMIT`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigLanPortMacLimit {
    locator: OnuLocator,
    port: u32,
    count: u32,
}

impl ConfigLanPortMacLimit {
    /// Allow at most `count` addresses on LAN `port`.
    pub fn new(locator: OnuLocator, port: u32, count: u32) -> Self {
        Self {
            locator,
            port,
            count,
        }
    }

    /// Render the command.
    pub fn build(self) -> Command {
        let aid = self.locator.to_block().with_field(
            "onu_port",
            "ONUPORT",
            format!("NA-NA-NA-{}", self.port),
        );
        Command::from_code(code("CFG", "LANPORTMACLIMIT"))
            .with_aid(aid)
            .with_payload(ParameterBlock::new().with_field("count", "COUNT", self.count))
    }
}

/// List uplink trunk groups (`LST-TRUNKINFO`). The reply is a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListTrunkInfo {
    /// Trunks of one ONU
    Onu(Ipv4Address),
    /// Trunks of one OLT
    Olt(Ipv4Address),
}

impl ListTrunkInfo {
    /// Render the command.
    pub fn build(self) -> Command {
        let aid = match self {
            ListTrunkInfo::Onu(ip) => ParameterBlock::new().with_field("onu_ip", "ONUIP", ip),
            ListTrunkInfo::Olt(ip) => ParameterBlock::new().with_field("olt_id", "OLTID", ip),
        };
        Command::from_code(code("LST", "TRUNKINFO"))
            .with_aid(aid)
            .with_response_kind(ResponseKind::List)
    }
}

/// Bring an ONU into service (`ACT-ONU`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivateOnu(pub OnuLocator);

impl ActivateOnu {
    /// Render the command.
    pub fn build(self) -> Command {
        Command::from_code(code("ACT", "ONU")).with_aid(self.0.to_block())
    }
}

/// Take an ONU out of service (`DEACT-ONU`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeactivateOnu(pub OnuLocator);

impl DeactivateOnu {
    /// Render the command.
    pub fn build(self) -> Command {
        Command::from_code(code("DEACT", "ONU")).with_aid(self.0.to_block())
    }
}

/// Turn an ONU on or off (`SET-ONUSWITCH`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetOnuSwitch {
    locator: OnuLocator,
    enabled: bool,
}

impl SetOnuSwitch {
    /// Switch the ONU on when `enabled`.
    pub fn new(locator: OnuLocator, enabled: bool) -> Self {
        Self { locator, enabled }
    }

    /// Render the command.
    pub fn build(self) -> Command {
        Command::from_code(code("SET", "ONUSWITCH"))
            .with_aid(self.locator.to_block())
            .with_payload(ParameterBlock::new().with_field("switch", "ONUSWITCH", self.enabled))
    }
}

/// Restart a line card (`RST-BOARD`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetBoard {
    olt_id: Ipv4Address,
    board_id: String,
}

impl ResetBoard {
    /// `board_id` is `rack-shelf-slot`.
    pub fn new(olt_id: Ipv4Address, board_id: impl Into<String>) -> Self {
        Self {
            olt_id,
            board_id: board_id.into(),
        }
    }

    /// Render the command.
    pub fn build(self) -> Command {
        Command::from_code(code("RST", "BOARD")).with_aid(
            ParameterBlock::new()
                .with_field("olt_id", "OLTID", self.olt_id)
                .with_field("board_id", "BOARDID", self.board_id),
        )
    }
}
