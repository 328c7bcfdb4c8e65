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

//! Output message grammar: the three shapes a network element can send.

use crate::{CodecError, ResponseData, consts};
use jiff::civil::{Date, DateTime, Time};
use std::fmt;
use std::str::FromStr;

/// Completion status of a synchronous response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCode {
    /// `COMPLD`
    Completed,
    /// `DELAY`
    Delayed,
    /// `DENY`
    Denied,
    /// `PRTL`
    Partial,
    /// `RTRV`
    Retrieve,
    /// `NONE`
    None,
}

impl StatusCode {
    /// Wire token.
    pub fn as_str(self) -> &'static str {
        match self {
            StatusCode::Completed => "COMPLD",
            StatusCode::Delayed => "DELAY",
            StatusCode::Denied => "DENY",
            StatusCode::Partial => "PRTL",
            StatusCode::Retrieve => "RTRV",
            StatusCode::None => "NONE",
        }
    }

    /// `true` for `COMPLD`.
    pub fn is_success(self) -> bool {
        self == StatusCode::Completed
    }
}

impl FromStr for StatusCode {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "COMPLD" => Ok(StatusCode::Completed),
            "DELAY" => Ok(StatusCode::Delayed),
            "DENY" => Ok(StatusCode::Denied),
            "PRTL" => Ok(StatusCode::Partial),
            "RTRV" => Ok(StatusCode::Retrieve),
            "NONE" => Ok(StatusCode::None),
            other => Err(CodecError::UnknownStatus(other.to_string())),
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity of an autonomous message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AlarmCode {
    /// `A`, non-alarm or warning
    Warning,
    /// `*`
    Minor,
    /// `**`
    Major,
    /// `*C`
    Critical,
}

impl AlarmCode {
    /// Wire token.
    pub fn as_str(self) -> &'static str {
        match self {
            AlarmCode::Warning => "A",
            AlarmCode::Minor => "*",
            AlarmCode::Major => "**",
            AlarmCode::Critical => "*C",
        }
    }
}

impl FromStr for AlarmCode {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "*C" => Ok(AlarmCode::Critical),
            "**" => Ok(AlarmCode::Major),
            "*" => Ok(AlarmCode::Minor),
            "A" => Ok(AlarmCode::Warning),
            other => Err(CodecError::UnknownAlarm(other.to_string())),
        }
    }
}

impl fmt::Display for AlarmCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Final character of an output message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Terminator {
    /// `>`: more blocks follow
    Continue,
    /// `;`: the message is complete
    Stop,
    /// `<`: acknowledgment
    Ack,
}

impl Terminator {
    /// Wire character.
    pub fn as_char(self) -> char {
        match self {
            Terminator::Continue => '>',
            Terminator::Stop => ';',
            Terminator::Ack => '<',
        }
    }

    /// `true` for any terminator character.
    pub fn is_terminator(c: char) -> bool {
        matches!(c, '>' | ';' | '<')
    }
}

impl TryFrom<char> for Terminator {
    type Error = CodecError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            '>' => Ok(Terminator::Continue),
            ';' => Ok(Terminator::Stop),
            '<' => Ok(Terminator::Ack),
            other => Err(CodecError::UnknownTerminator(other)),
        }
    }
}

impl fmt::Display for Terminator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// `SID YYYY-MM-DD HH:MM:SS`, the first line of a response or autonomous message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseHeader {
    /// Source identifier of the network element
    pub source_id: String,
    /// Timestamp reported by the network element
    pub timestamp: DateTime,
}

impl ResponseHeader {
    /// Build a header.
    pub fn new(source_id: impl Into<String>, timestamp: DateTime) -> Self {
        ResponseHeader {
            source_id: source_id.into(),
            timestamp,
        }
    }

    /// Date part of the timestamp.
    pub fn date(&self) -> Date {
        self.timestamp.date()
    }

    /// Time part of the timestamp.
    pub fn time(&self) -> Time {
        self.timestamp.time()
    }
}

impl FromStr for ResponseHeader {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (sid, stamp) = s
            .trim()
            .split_once(' ')
            .ok_or_else(|| CodecError::MalformedHeader(s.to_string()))?;
        let timestamp = stamp
            .trim()
            .parse::<DateTime>()
            .map_err(|err| CodecError::MalformedHeader(format!("{s:?}: {err}")))?;
        Ok(ResponseHeader::new(sid, timestamp))
    }
}

/// `M CTAG STATUS`, the identifier line of a synchronous response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseId {
    /// Type marker, always `M`
    pub kind: String,
    /// Correlation tag echoed from the command
    pub ctag: String,
    /// Completion status
    pub status: StatusCode,
}

impl ResponseId {
    /// Build a response identifier.
    pub fn new(ctag: impl Into<String>, status: StatusCode) -> Self {
        ResponseId {
            kind: consts::RESPONSE_MARKER.to_string(),
            ctag: ctag.into(),
            status,
        }
    }
}

impl FromStr for ResponseId {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = s.split_whitespace().collect();
        match tokens.as_slice() {
            [kind, ctag, status] if *kind == consts::RESPONSE_MARKER => Ok(ResponseId {
                kind: (*kind).to_string(),
                ctag: (*ctag).to_string(),
                status: status.parse()?,
            }),
            _ => Err(CodecError::MalformedIdentifier(s.to_string())),
        }
    }
}

/// `CODE ATAG CLAUSE...`, the identifier line of an autonomous message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutonomousIdentifier {
    /// Severity
    pub code: AlarmCode,
    /// Autonomous tag, a sequence number chosen by the network element
    pub atag: String,
    /// Remaining tokens, usually the verb and modifiers of the report
    pub clause: Vec<String>,
}

impl FromStr for AutonomousIdentifier {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokens = s.split_whitespace();
        let (Some(code), Some(atag)) = (tokens.next(), tokens.next()) else {
            return Err(CodecError::MalformedIdentifier(s.to_string()));
        };
        let clause: Vec<String> = tokens.map(str::to_string).collect();
        if clause.is_empty() {
            return Err(CodecError::MalformedIdentifier(s.to_string()));
        }
        Ok(AutonomousIdentifier {
            code: code.parse()?,
            atag: atag.to_string(),
            clause,
        })
    }
}

/// A synchronous reply to a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Source and timestamp
    pub header: ResponseHeader,
    /// Correlation tag and status
    pub identifier: ResponseId,
    /// Body text without the terminator
    pub text: String,
    /// Whether more blocks follow
    pub terminator: Terminator,
    /// Structured body, when a vendor profile parsed one
    pub result: Option<ResponseData>,
}

impl Response {
    /// A response with an unparsed body.
    pub fn new(
        header: ResponseHeader,
        identifier: ResponseId,
        text: impl Into<String>,
        terminator: Terminator,
    ) -> Self {
        Response {
            header,
            identifier,
            text: text.into(),
            terminator,
            result: None,
        }
    }

    /// Attach a structured body.
    pub fn with_result(mut self, result: ResponseData) -> Self {
        self.result = Some(result);
        self
    }

    /// Correlation tag.
    pub fn ctag(&self) -> &str {
        &self.identifier.ctag
    }

    /// Completion status.
    pub fn status(&self) -> StatusCode {
        self.identifier.status
    }

    /// `true` when no further blocks follow.
    pub fn is_final(&self) -> bool {
        self.terminator == Terminator::Stop
    }
}

/// Short `CODE CTAG<` acknowledgment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcknowledgmentMessage {
    /// Acknowledgment code, e.g. `IP` (in progress) or `OK`
    pub code: String,
    /// Correlation tag echoed from the command
    pub ctag: String,
    /// Always [`Terminator::Ack`]
    pub terminator: Terminator,
}

impl AcknowledgmentMessage {
    /// Build an acknowledgment.
    pub fn new(code: impl Into<String>, ctag: impl Into<String>) -> Self {
        AcknowledgmentMessage {
            code: code.into(),
            ctag: ctag.into(),
            terminator: Terminator::Ack,
        }
    }
}

/// Unsolicited notification, typically an alarm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutonomousMessage {
    /// Source and timestamp
    pub header: ResponseHeader,
    /// Severity, tag and clause
    pub identifier: AutonomousIdentifier,
    /// Body text without the terminator
    pub text: String,
    /// Whether more blocks follow
    pub terminator: Terminator,
}

/// Any decoded output message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tl1Message {
    /// `CODE CTAG<`
    Acknowledgment(AcknowledgmentMessage),
    /// Unsolicited report
    Autonomous(AutonomousMessage),
    /// Reply to a command
    Response(Response),
}

impl Tl1Message {
    /// Correlation tag, when the message carries one.
    pub fn ctag(&self) -> Option<&str> {
        match self {
            Tl1Message::Acknowledgment(ack) => Some(&ack.ctag),
            Tl1Message::Autonomous(_) => None,
            Tl1Message::Response(response) => Some(response.ctag()),
        }
    }

    /// Terminator of the message.
    pub fn terminator(&self) -> Terminator {
        match self {
            Tl1Message::Acknowledgment(ack) => ack.terminator,
            Tl1Message::Autonomous(message) => message.terminator,
            Tl1Message::Response(response) => response.terminator,
        }
    }

    /// Borrow the response, if this is one.
    pub fn as_response(&self) -> Option<&Response> {
        match self {
            Tl1Message::Response(response) => Some(response),
            _ => None,
        }
    }

    /// Consume into the response, if this is one.
    pub fn into_response(self) -> Option<Response> {
        match self {
            Tl1Message::Response(response) => Some(response),
            _ => None,
        }
    }
}

impl From<AcknowledgmentMessage> for Tl1Message {
    fn from(value: AcknowledgmentMessage) -> Self {
        Tl1Message::Acknowledgment(value)
    }
}

impl From<AutonomousMessage> for Tl1Message {
    fn from(value: AutonomousMessage) -> Self {
        Tl1Message::Autonomous(value)
    }
}

impl From<Response> for Tl1Message {
    fn from(value: Response) -> Self {
        Tl1Message::Response(value)
    }
}
