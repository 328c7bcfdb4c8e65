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

//! Command grammar.
//!
//! A TL1 command is assembled from four blocks:
//!
//! ```text
//! VERB[-MOD1[-MOD2]]:TID:AID:CTAG:GBLOCK:PARAMS;
//! ```
//!
//! [`CommandCode`] renders the verb triple, [`StagingBlock`] the addressing
//! quad and [`ParameterBlock`] the payload. [`Command`] glues them together.

use crate::{CodecError, CodecResult, Value, consts};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// A single `KEY=VALUE` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Parameter {
    key: String,
    value: Value,
}

impl Parameter {
    /// Create a parameter from a wire key and any primitive value.
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Parameter {
            key: key.into(),
            value: value.into(),
        }
    }

    /// The wire key, e.g. `ONUID`.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The typed value.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// `true` when the value renders to nothing.
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.key, consts::ASSIGNMENT, self.value)
    }
}

/// Ordered mapping of field names to [`Parameter`]s.
///
/// Field names are the caller's handles (`olt_id`); parameter keys are what
/// goes on the wire (`OLTID`). Insertion order is rendering order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterBlock {
    entries: Vec<(String, Parameter)>,
}

impl ParameterBlock {
    /// Empty block.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`ParameterBlock::insert`].
    pub fn with_field(
        mut self,
        name: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        self.insert(name, Parameter::new(key, value));
        self
    }

    /// Insert or replace a field. A replaced field keeps its position.
    pub fn insert(&mut self, name: impl Into<String>, parameter: Parameter) {
        let name = name.into();
        if let Some(slot) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = parameter;
        } else {
            self.entries.push((name, parameter));
        }
    }

    /// Remove a field, returning its parameter.
    pub fn remove(&mut self, name: &str) -> Option<Parameter> {
        let index = self.entries.iter().position(|(n, _)| n == name)?;
        Some(self.entries.remove(index).1)
    }

    /// Look up a field by name.
    pub fn get(&self, name: &str) -> Option<&Parameter> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, parameter)| parameter)
    }

    /// `true` if the field is present.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when there are no fields.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(name, parameter)` in rendering order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Parameter)> {
        self.entries.iter().map(|(n, p)| (n.as_str(), p))
    }

    /// Projection onto the named fields, keeping this block's order.
    ///
    /// Used when one logical field set is split between the addressing
    /// segment and the payload segment of a command.
    pub fn select(&self, names: &[&str]) -> ParameterBlock {
        ParameterBlock {
            entries: self
                .entries
                .iter()
                .filter(|(n, _)| names.contains(&n.as_str()))
                .cloned()
                .collect(),
        }
    }
}

impl fmt::Display for ParameterBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (_, parameter) in self.entries.iter().filter(|(_, p)| !p.is_empty()) {
            if !first {
                write!(f, "{}", consts::PARAMETER_SEPARATOR)?;
            }
            write!(f, "{parameter}")?;
            first = false;
        }
        Ok(())
    }
}

/// Split a `K=V,K=V` segment into ordered pairs.
///
/// # Errors
/// [`CodecError::MalformedCommand`] when an item has no `=`.
pub fn parse_parameters(segment: &str) -> CodecResult<Vec<(String, String)>> {
    if segment.is_empty() {
        return Ok(Vec::new());
    }
    segment
        .split(consts::PARAMETER_SEPARATOR)
        .map(|item| {
            item.split_once(consts::ASSIGNMENT)
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .ok_or_else(|| CodecError::MalformedCommand(format!("parameter without value: {item:?}")))
        })
        .collect()
}

fn parameter_block(segment: &str) -> CodecResult<ParameterBlock> {
    let mut block = ParameterBlock::new();
    for (key, value) in parse_parameters(segment)? {
        block.insert(key.clone(), Parameter::new(key, value));
    }
    Ok(block)
}

/// Verb and modifiers, e.g. `CFG-ONU` or `LOGIN`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CommandCode {
    /// Action, e.g. `ADD`
    pub verb: String,
    /// First modifier, e.g. `ONU`
    pub mod1: String,
    /// Second modifier
    pub mod2: String,
}

impl CommandCode {
    /// Verb only.
    pub fn new(verb: impl Into<String>) -> Self {
        CommandCode {
            verb: verb.into(),
            ..Self::default()
        }
    }

    /// Set the first modifier.
    pub fn with_mod1(mut self, mod1: impl Into<String>) -> Self {
        self.mod1 = mod1.into();
        self
    }

    /// Set the second modifier.
    pub fn with_mod2(mut self, mod2: impl Into<String>) -> Self {
        self.mod2 = mod2.into();
        self
    }

    fn fields(&self) -> [&str; 3] {
        [&self.verb, &self.mod1, &self.mod2]
    }
}

impl fmt::Display for CommandCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for field in self.fields().into_iter().filter(|s| !s.is_empty()) {
            if !first {
                write!(f, "{}", consts::CODE_SEPARATOR)?;
            }
            f.write_str(field)?;
            first = false;
        }
        Ok(())
    }
}

/// Target, access identifier, correlation tag and general block.
///
/// All four positions are always rendered, empty or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagingBlock {
    /// Target identifier
    pub tid: String,
    /// Access identifier
    pub aid: ParameterBlock,
    /// Correlation tag, echoed back in the matching response
    pub ctag: String,
    /// General block
    pub gblock: String,
}

impl Default for StagingBlock {
    fn default() -> Self {
        StagingBlock {
            tid: String::new(),
            aid: ParameterBlock::new(),
            ctag: consts::DEFAULT_CTAG.to_string(),
            gblock: String::new(),
        }
    }
}

impl fmt::Display for StagingBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = consts::BLOCK_SEPARATOR;
        write!(
            f,
            "{}{sep}{}{sep}{}{sep}{}",
            self.tid, self.aid, self.ctag, self.gblock
        )
    }
}

/// Expected shape of a response body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ResponseKind {
    /// Let the vendor profile decide from the body
    #[default]
    Default,
    /// The body must be a table
    List,
}

/// Hints a command passes to the vendor profile decoding its reply.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Modifiers {
    response_kind: ResponseKind,
    entries: BTreeMap<String, String>,
}

impl Modifiers {
    /// No hints.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the expected response shape.
    pub fn with_response_kind(mut self, kind: ResponseKind) -> Self {
        self.response_kind = kind;
        self
    }

    /// Attach a vendor-specific hint.
    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    /// Expected response shape.
    pub fn response_kind(&self) -> ResponseKind {
        self.response_kind
    }

    /// Vendor-specific hint.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

/// A complete TL1 command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Command {
    code: CommandCode,
    staging: StagingBlock,
    payload: ParameterBlock,
    modifiers: Modifiers,
}

impl Command {
    /// Command with a bare verb and default staging block.
    pub fn new(verb: impl Into<String>) -> Self {
        Self::from_code(CommandCode::new(verb))
    }

    /// Command from a prepared verb triple.
    pub fn from_code(code: CommandCode) -> Self {
        Command {
            code,
            ..Self::default()
        }
    }

    /// Set the target identifier.
    pub fn with_tid(mut self, tid: impl Into<String>) -> Self {
        self.staging.tid = tid.into();
        self
    }

    /// Set the access identifier block.
    pub fn with_aid(mut self, aid: ParameterBlock) -> Self {
        self.staging.aid = aid;
        self
    }

    /// Set the correlation tag.
    pub fn with_ctag(mut self, ctag: impl Into<String>) -> Self {
        self.staging.ctag = ctag.into();
        self
    }

    /// Set the general block.
    pub fn with_gblock(mut self, gblock: impl Into<String>) -> Self {
        self.staging.gblock = gblock.into();
        self
    }

    /// Replace the payload.
    pub fn with_payload(mut self, payload: ParameterBlock) -> Self {
        self.payload = payload;
        self
    }

    /// Add one payload field.
    pub fn with_parameter(mut self, name: impl Into<String>, parameter: Parameter) -> Self {
        self.payload.insert(name, parameter);
        self
    }

    /// Replace the decoding hints.
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Shorthand for setting the expected response shape.
    pub fn with_response_kind(mut self, kind: ResponseKind) -> Self {
        self.modifiers.response_kind = kind;
        self
    }

    /// Verb triple.
    pub fn code(&self) -> &CommandCode {
        &self.code
    }

    /// Addressing block.
    pub fn staging(&self) -> &StagingBlock {
        &self.staging
    }

    /// Mutable addressing block.
    pub fn staging_mut(&mut self) -> &mut StagingBlock {
        &mut self.staging
    }

    /// Payload block.
    pub fn payload(&self) -> &ParameterBlock {
        &self.payload
    }

    /// Mutable payload block.
    pub fn payload_mut(&mut self) -> &mut ParameterBlock {
        &mut self.payload
    }

    /// Decoding hints.
    pub fn modifiers(&self) -> &Modifiers {
        &self.modifiers
    }

    /// Correlation tag.
    pub fn ctag(&self) -> &str {
        &self.staging.ctag
    }

    /// Change the correlation tag in place.
    pub fn set_ctag(&mut self, ctag: impl Into<String>) {
        self.staging.ctag = ctag.into();
    }

    /// A command needs an alphanumeric verb; modifiers, when present, are
    /// alphanumeric too.
    pub fn is_well_formed(&self) -> bool {
        let token = |s: &str| s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
        !self.code.verb.is_empty()
            && token(&self.code.verb)
            && token(&self.code.mod1)
            && token(&self.code.mod2)
            && !self.staging.ctag.contains([':', ';'])
    }

    /// The wire form as ASCII bytes.
    ///
    /// # Errors
    /// [`CodecError::NonAsciiCommand`] for the first character outside 7-bit ASCII.
    pub fn to_bytes(&self) -> CodecResult<Vec<u8>> {
        let rendered = self.to_string();
        if let Some((position, character)) = rendered.char_indices().find(|(_, c)| !c.is_ascii()) {
            return Err(CodecError::NonAsciiCommand {
                position,
                character,
            });
        }
        Ok(rendered.into_bytes())
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = consts::BLOCK_SEPARATOR;
        write!(
            f,
            "{}{sep}{}{sep}{}{}",
            self.code,
            self.staging,
            self.payload,
            consts::COMMAND_TERMINATOR
        )
    }
}

impl FromStr for Command {
    type Err = CodecError;

    /// Parse the wire form. Parameter values come back as text.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let body = s
            .trim()
            .strip_suffix(consts::COMMAND_TERMINATOR)
            .ok_or_else(|| CodecError::MalformedCommand(format!("missing terminator: {s:?}")))?;

        let blocks: Vec<&str> = body.splitn(6, consts::BLOCK_SEPARATOR).collect();
        if blocks.len() < 4 {
            return Err(CodecError::MalformedCommand(format!(
                "expected at least 4 blocks, found {}: {s:?}",
                blocks.len()
            )));
        }

        let mut words = blocks[0].split(consts::CODE_SEPARATOR);
        let verb = words.next().unwrap_or_default();
        let code = CommandCode::new(verb)
            .with_mod1(words.next().unwrap_or_default())
            .with_mod2(words.next().unwrap_or_default());
        if verb.is_empty() || words.next().is_some() {
            return Err(CodecError::MalformedCommand(format!(
                "invalid command code: {:?}",
                blocks[0]
            )));
        }

        Ok(Command {
            code,
            staging: StagingBlock {
                tid: blocks[1].to_string(),
                aid: parameter_block(blocks[2])?,
                ctag: blocks[3].to_string(),
                gblock: blocks.get(4).copied().unwrap_or_default().to_string(),
            },
            payload: parameter_block(blocks.get(5).copied().unwrap_or_default())?,
            modifiers: Modifiers::default(),
        })
    }
}
