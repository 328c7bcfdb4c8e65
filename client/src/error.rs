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

//! Client error types

use std::time::Duration;
use thiserror::Error;
use tl1kit_codec::CodecError;

/// Client result type
pub type Result<T> = std::result::Result<T, ClientError>;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// I/O error from the underlying TCP stream
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Encoding, framing or classification failure
    #[error("Protocol error: {0}")]
    Codec(#[from] CodecError),

    /// `connect` called on a session that already has a connection
    #[error("Session is already connected")]
    AlreadyConnected,

    /// Operation requires a connection
    #[error("Session is not connected")]
    NotConnected,

    /// Host or port not configured
    #[error("Host and port must be set before connecting")]
    MissingAddress,

    /// Connection attempt did not complete in time
    #[error("Connection attempt timed out after {0:?}")]
    ConnectTimeout(Duration),

    /// No output message arrived in time
    #[error("No response within {0:?}")]
    Timeout(Duration),

    /// The network element closed the connection
    #[error("Connection closed by network element")]
    ConnectionClosed,
}

impl ClientError {
    /// Check if the error is recoverable
    ///
    /// Recoverable errors leave the session usable; re-issuing the command
    /// might succeed.
    pub fn is_recoverable(&self) -> bool {
        match self {
            ClientError::Timeout(_) => true,
            ClientError::Codec(err) => !matches!(err, CodecError::IOError { .. }),
            _ => false,
        }
    }

    /// Check if the error is a connection error
    ///
    /// The caller must reconnect before issuing further commands.
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            ClientError::Io(_)
                | ClientError::AlreadyConnected
                | ClientError::NotConnected
                | ClientError::MissingAddress
                | ClientError::ConnectTimeout(_)
                | ClientError::ConnectionClosed
                | ClientError::Codec(CodecError::IOError { .. })
        )
    }

    /// Check if the error is a protocol error
    pub fn is_protocol_error(&self) -> bool {
        matches!(self, ClientError::Codec(_))
    }
}
