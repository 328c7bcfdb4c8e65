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

//! Wire primitives.
//!
//! TL1 is a flat text protocol without native types. Every parameter value is
//! one of the wrappers below, each rendering to the exact token the network
//! element expects and validating itself at construction.

use crate::{CodecError, CodecResult};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::net::Ipv4Addr;
use std::str::FromStr;

/// Numeric value; booleans travel as `0` / `1`.
///
/// Equality, ordering and hashing use the numeric value, so `Bool(true)`
/// equals `Int(1)`.
#[derive(Debug, Clone, Copy)]
pub enum Number {
    /// Flag value
    Bool(bool),
    /// Integer value
    Int(i64),
}

impl Number {
    /// The value as a signed integer.
    pub fn as_i64(self) -> i64 {
        match self {
            Number::Bool(flag) => i64::from(flag),
            Number::Int(value) => value,
        }
    }

    /// `true` when the value is non-zero.
    pub fn is_truthy(self) -> bool {
        self.as_i64() != 0
    }

    /// Integer sum, `None` on overflow.
    pub fn checked_add(self, rhs: impl Into<Number>) -> Option<Number> {
        self.as_i64().checked_add(rhs.into().as_i64()).map(Number::Int)
    }

    /// Integer difference, `None` on overflow.
    pub fn checked_sub(self, rhs: impl Into<Number>) -> Option<Number> {
        self.as_i64().checked_sub(rhs.into().as_i64()).map(Number::Int)
    }
}

impl Default for Number {
    fn default() -> Self {
        Number::Bool(false)
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.as_i64() == other.as_i64()
    }
}

impl Eq for Number {}

impl PartialEq<i64> for Number {
    fn eq(&self, other: &i64) -> bool {
        self.as_i64() == *other
    }
}

impl PartialEq<bool> for Number {
    fn eq(&self, other: &bool) -> bool {
        self.as_i64() == i64::from(*other)
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Number {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_i64().cmp(&other.as_i64())
    }
}

impl Hash for Number {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_i64().hash(state);
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_i64())
    }
}

impl From<bool> for Number {
    fn from(value: bool) -> Self {
        Number::Bool(value)
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number::Int(value)
    }
}

impl From<i32> for Number {
    fn from(value: i32) -> Self {
        Number::Int(i64::from(value))
    }
}

impl From<u32> for Number {
    fn from(value: u32) -> Self {
        Number::Int(i64::from(value))
    }
}

/// Text value, rendered verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Text(String);

impl Text {
    /// Wrap a string.
    pub fn new(value: impl Into<String>) -> Self {
        Text(value.into())
    }

    /// Borrow the text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `true` for the empty string.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Unwrap into the owned string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for Text {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Text {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Text {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Text {
    fn from(value: &str) -> Self {
        Text(value.to_string())
    }
}

impl From<String> for Text {
    fn from(value: String) -> Self {
        Text(value)
    }
}

/// Validated dotted-quad IPv4 address.
///
/// Immutable once constructed: a different address means a new value, which
/// is validated again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ipv4Address(Ipv4Addr);

impl Ipv4Address {
    /// Parse and validate an address.
    ///
    /// # Errors
    /// [`CodecError::InvalidAddress`] when `value` is not a dotted-quad address.
    pub fn new(value: &str) -> CodecResult<Self> {
        value.parse()
    }

    /// The underlying address.
    pub fn addr(self) -> Ipv4Addr {
        self.0
    }
}

impl FromStr for Ipv4Address {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<Ipv4Addr>()
            .map(Ipv4Address)
            .map_err(|_| CodecError::InvalidAddress(s.to_string()))
    }
}

impl TryFrom<&str> for Ipv4Address {
    type Error = CodecError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Ipv4Addr> for Ipv4Address {
    fn from(value: Ipv4Addr) -> Self {
        Ipv4Address(value)
    }
}

impl fmt::Display for Ipv4Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// TCP/UDP port number, bounded to `0..=65535`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NetworkPort(u16);

impl NetworkPort {
    /// Validate a port number.
    ///
    /// # Errors
    /// [`CodecError::PortOutOfRange`] outside `0..=65535`.
    pub fn new(value: i64) -> CodecResult<Self> {
        u16::try_from(value)
            .map(NetworkPort)
            .map_err(|_| CodecError::PortOutOfRange(value))
    }

    /// The port number.
    pub fn get(self) -> u16 {
        self.0
    }
}

impl TryFrom<i64> for NetworkPort {
    type Error = CodecError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        NetworkPort::new(value)
    }
}

impl From<u16> for NetworkPort {
    fn from(value: u16) -> Self {
        NetworkPort(value)
    }
}

impl fmt::Display for NetworkPort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Any wire primitive that can be the value of a parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    /// Integer or flag
    Number(Number),
    /// Free text
    Text(Text),
    /// IPv4 address
    Address(Ipv4Address),
    /// Port number
    Port(NetworkPort),
}

impl Value {
    /// `true` when the value renders to nothing and should be left out of a block.
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Text(text) => text.is_empty(),
            _ => false,
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Text(Text::default())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(value) => value.fmt(f),
            Value::Text(value) => value.fmt(f),
            Value::Address(value) => value.fmt(f),
            Value::Port(value) => value.fmt(f),
        }
    }
}

impl From<Number> for Value {
    fn from(value: Number) -> Self {
        Value::Number(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Number(Number::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(Number::from(value))
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Number(Number::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Number(Number::from(value))
    }
}

impl From<Text> for Value {
    fn from(value: Text) -> Self {
        Value::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(Text::from(value))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(Text::from(value))
    }
}

impl From<Ipv4Address> for Value {
    fn from(value: Ipv4Address) -> Self {
        Value::Address(value)
    }
}

impl From<NetworkPort> for Value {
    fn from(value: NetworkPort) -> Self {
        Value::Port(value)
    }
}
