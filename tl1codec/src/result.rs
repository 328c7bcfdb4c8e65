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

/// Result Type for Codec Operations
pub type CodecResult<T> = Result<T, CodecError>;

/// Represents possible errors raised while building, encoding or decoding TL1 messages.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// The value is not a dotted-quad IPv4 address.
    #[error("Invalid IPv4 address: {0:?}")]
    InvalidAddress(String),

    /// Port number outside `0..=65535`.
    #[error("Port number must be between 0 and 65535, got {0}")]
    PortOutOfRange(i64),

    /// A rendered command contains a character outside 7-bit ASCII.
    #[error("Command is not ASCII: {character:?} at position {position}")]
    NonAsciiCommand {
        /// Byte offset of the offending character
        position: usize,
        /// The offending character
        character: char,
    },

    /// A received message contains a character outside 7-bit ASCII.
    #[error("Response is not ASCII: {character:?} at position {position}")]
    NonAsciiResponse {
        /// Character offset of the offending character in the message
        position: usize,
        /// The offending character
        character: char,
    },

    /// The message does not have the header / identifier / body layout.
    #[error("Malformed message: {0}")]
    MalformedMessage(String),

    /// The header line could not be split into source id and date-time.
    #[error("Malformed header: {0}")]
    MalformedHeader(String),

    /// The identifier line does not match the response or autonomous shape.
    #[error("Malformed identifier: {0}")]
    MalformedIdentifier(String),

    /// The acknowledgment is not of the form `CODE CTAG<`.
    #[error("Malformed acknowledgment: {0}")]
    MalformedAcknowledgment(String),

    /// Unrecognised completion status.
    #[error("Unknown status code: {0:?}")]
    UnknownStatus(String),

    /// Unrecognised alarm severity.
    #[error("Unknown alarm code: {0:?}")]
    UnknownAlarm(String),

    /// The final character of a message is not a terminator.
    #[error("Unknown terminator: {0:?}")]
    UnknownTerminator(char),

    /// A tabular response body disagrees with its own metadata.
    #[error("Malformed table: {0}")]
    MalformedTable(String),

    /// Text that does not follow the command grammar.
    #[error("Malformed command: {0}")]
    MalformedCommand(String),

    /// An I/O error occurred while reading from or writing to the underlying stream.
    #[error("I/O error during {operation}: {kind:?}")]
    IOError {
        /// The kind of I/O error that occurred
        kind: std::io::ErrorKind,
        /// Description of the operation that failed
        operation: String,
    },
}

impl CodecError {
    /// Construction-time validation failures: bad address, port or command text.
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            CodecError::InvalidAddress(_)
                | CodecError::PortOutOfRange(_)
                | CodecError::NonAsciiCommand { .. }
                | CodecError::MalformedCommand(_)
        )
    }

    /// Failures to make sense of a received message.
    ///
    /// These are failures of the whole exchange; the raw buffer is not a
    /// recoverable partial result.
    pub fn is_malformed_message(&self) -> bool {
        matches!(
            self,
            CodecError::NonAsciiResponse { .. }
                | CodecError::MalformedMessage(_)
                | CodecError::MalformedHeader(_)
                | CodecError::MalformedIdentifier(_)
                | CodecError::MalformedAcknowledgment(_)
                | CodecError::UnknownStatus(_)
                | CodecError::UnknownAlarm(_)
                | CodecError::UnknownTerminator(_)
                | CodecError::MalformedTable(_)
        )
    }
}

impl From<std::io::Error> for CodecError {
    fn from(err: std::io::Error) -> Self {
        CodecError::IOError {
            kind: err.kind(),
            operation: err.to_string(),
        }
    }
}
