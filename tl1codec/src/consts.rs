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

//! Wire constants for TL1 over a Telnet-style stream.

/// Interpret As Command. Must be doubled when it appears as data.
pub const IAC: u8 = 0xFF;
/// Carriage Return
pub const CR: u8 = b'\r';
/// Line Feed
pub const LF: u8 = b'\n';

/// Every TL1 output message begins with `CR LF LF`.
pub const PREAMBLE: &str = "\r\n\n";
/// Line separator inside a message.
pub const LINE_SEPARATOR: &str = "\r\n";

/// Ctag used when the caller does not supply one.
pub const DEFAULT_CTAG: &str = "CTAG";

/// Separator between the verb and its modifiers.
pub const CODE_SEPARATOR: char = '-';
/// Separator between command blocks.
pub const BLOCK_SEPARATOR: char = ':';
/// Separator between parameters of a block.
pub const PARAMETER_SEPARATOR: char = ',';
/// Separator between a parameter key and its value.
pub const ASSIGNMENT: char = '=';
/// Terminates every command.
pub const COMMAND_TERMINATOR: char = ';';

/// Separator between `KEY=VALUE` pairs in a flat response body.
pub const RECORD_SEPARATOR: &str = "   ";
/// Column separator of tabular response bodies.
pub const COLUMN_SEPARATOR: char = '\t';

/// Identifier type marker of a synchronous response.
pub const RESPONSE_MARKER: &str = "M";
