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


//! Enumerated parameter values

use std::fmt;
use tl1kit_codec::Value;

/// How an ONU is identified on its PON port (`ONUIDTYPE`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OnuIdType {
    /// Configured ONU name
    Name,
    /// ONU MAC address
    Mac,
    /// Logical ONU identifier
    Loid,
    /// Index on the PON port
    Number,
}

impl OnuIdType {
    /// Wire form of the value.
    pub fn as_str(self) -> &'static str {
        match self {
            OnuIdType::Name => "ONU_NAME",
            OnuIdType::Mac => "MAC",
            OnuIdType::Loid => "LOID",
            OnuIdType::Number => "ONU_NUMBER",
        }
    }
}

/// ONU authentication mode (`AUTHTYPE`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthType {
    /// Authenticate by MAC address
    Mac,
    /// Authenticate by LOID
    Loid,
    /// LOID, first registration only
    LoidOnceOn,
    /// Authenticate by password
    Password,
}

impl AuthType {
    /// Wire form of the value.
    pub fn as_str(self) -> &'static str {
        match self {
            AuthType::Mac => "MAC",
            AuthType::Loid => "LOID",
            AuthType::LoidOnceOn => "LOIDONCEON",
            AuthType::Password => "PASSWORD",
        }
    }
}

/// PON line rate (`BANDTYPE`), downstream/upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BandType {
    /// 1G/1G
    Symmetric1G,
    /// 10G/1G
    Asymmetric10G,
    /// 10G/10G
    Symmetric10G,
    /// 2.5G/1.25G
    Gpon,
    /// 10G/2.5G
    Xgpon,
}

impl BandType {
    /// Wire form of the value.
    pub fn as_str(self) -> &'static str {
        match self {
            BandType::Symmetric1G => "1G/1G",
            BandType::Asymmetric10G => "10G/1G",
            BandType::Symmetric10G => "10G/10G",
            BandType::Gpon => "2.5G/1.25G",
            BandType::Xgpon => "10G/2.5G",
        }
    }
}

impl fmt::Display for OnuIdType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for AuthType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for BandType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<OnuIdType> for Value {
    fn from(value: OnuIdType) -> Self {
        Value::from(value.as_str())
    }
}

impl From<AuthType> for Value {
    fn from(value: AuthType) -> Self {
        Value::from(value.as_str())
    }
}

impl From<BandType> for Value {
    fn from(value: BandType) -> Self {
        Value::from(value.as_str())
    }
}
