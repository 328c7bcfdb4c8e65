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

use crate::{
    AcknowledgmentMessage, AutonomousIdentifier, AutonomousMessage, CodecResult, Modifiers,
    Response, ResponseHeader, ResponseId, Terminator,
};
use std::fmt;

/// Constructors for the three output message shapes.
///
/// The classifier splits a message into its parts and hands them to the
/// profile. A vendor overrides whichever constructor needs to enrich its
/// message, typically [`VendorProfile::response`] to parse a body.
pub trait VendorProfile: fmt::Debug + Send + Sync {
    /// Build an acknowledgment from `CODE CTAG<`.
    fn acknowledgment(
        &self,
        code: String,
        ctag: String,
        modifiers: &Modifiers,
    ) -> CodecResult<AcknowledgmentMessage> {
        let _ = modifiers;
        Ok(AcknowledgmentMessage::new(code, ctag))
    }

    /// Build an autonomous message.
    fn autonomous(
        &self,
        header: ResponseHeader,
        identifier: AutonomousIdentifier,
        text: String,
        terminator: Terminator,
        modifiers: &Modifiers,
    ) -> CodecResult<AutonomousMessage> {
        let _ = modifiers;
        Ok(AutonomousMessage {
            header,
            identifier,
            text,
            terminator,
        })
    }

    /// Build a synchronous response.
    fn response(
        &self,
        header: ResponseHeader,
        identifier: ResponseId,
        text: String,
        terminator: Terminator,
        modifiers: &Modifiers,
    ) -> CodecResult<Response> {
        let _ = modifiers;
        Ok(Response::new(header, identifier, text, terminator))
    }
}

/// Plain TL1: bodies stay as text.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardVendor;

impl VendorProfile for StandardVendor {}
