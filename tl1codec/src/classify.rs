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
    AutonomousIdentifier, CodecError, CodecResult, Modifiers, ResponseHeader, ResponseId,
    Terminator, Tl1Message, VendorProfile, consts,
};
use tracing::trace;

/// Classify one output message and build it through `vendor`.
///
/// Returns `Ok(None)` when `text` does not begin with the `\r\n\n` preamble:
/// that is not a TL1 message, and callers treat it as "no data yet".
///
/// The preamble and its space padding are stripped. A message whose final
/// character is `<` is an acknowledgment `CODE CTAG<`. Anything else is split
/// into header line, identifier line and body; an identifier starting with
/// `M` marks a response, any other identifier an autonomous message. The last
/// character of the body is the terminator and is not part of the text.
///
/// # Errors
/// [`CodecError::NonAsciiResponse`] for the first character outside 7-bit
/// ASCII, one of the other malformed-message [`CodecError`] variants when the
/// text has the preamble but not the grammar, or whatever the vendor
/// constructor returns.
pub fn classify(
    text: &str,
    modifiers: &Modifiers,
    vendor: &dyn VendorProfile,
) -> CodecResult<Option<Tl1Message>> {
    let Some(rest) = text.strip_prefix(consts::PREAMBLE) else {
        trace!("Ignoring text without preamble: {:?}", text);
        return Ok(None);
    };
    if let Some((position, character)) = text.chars().enumerate().find(|(_, c)| !c.is_ascii()) {
        return Err(CodecError::NonAsciiResponse {
            position,
            character,
        });
    }
    let rest = rest.trim_start_matches(' ');

    let last = rest
        .chars()
        .last()
        .ok_or_else(|| CodecError::MalformedMessage("empty message".to_string()))?;

    if last == Terminator::Ack.as_char() {
        let body = &rest[..rest.len() - last.len_utf8()];
        let (code, ctag) = body
            .split_once(' ')
            .map(|(code, ctag)| (code.trim(), ctag.trim()))
            .filter(|(code, ctag)| !code.is_empty() && !ctag.is_empty())
            .ok_or_else(|| CodecError::MalformedAcknowledgment(body.to_string()))?;
        let ack = vendor.acknowledgment(code.to_string(), ctag.to_string(), modifiers)?;
        return Ok(Some(Tl1Message::Acknowledgment(ack)));
    }

    let mut segments = rest.splitn(3, consts::LINE_SEPARATOR);
    let (Some(header_line), Some(identifier_line), Some(body)) =
        (segments.next(), segments.next(), segments.next())
    else {
        return Err(CodecError::MalformedMessage(format!(
            "expected header, identifier and body: {rest:?}"
        )));
    };

    let header: ResponseHeader = header_line.parse()?;
    let terminator = Terminator::try_from(last)?;
    let body = body[..body.len() - last.len_utf8()].to_string();

    let is_response = identifier_line
        .split_whitespace()
        .next()
        .is_some_and(|marker| marker == consts::RESPONSE_MARKER);

    if is_response {
        let identifier: ResponseId = identifier_line.parse()?;
        let response = vendor.response(header, identifier, body, terminator, modifiers)?;
        Ok(Some(Tl1Message::Response(response)))
    } else {
        let identifier: AutonomousIdentifier = identifier_line.parse()?;
        let message = vendor.autonomous(header, identifier, body, terminator, modifiers)?;
        Ok(Some(Tl1Message::Autonomous(message)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AlarmCode, StandardVendor, StatusCode};

    fn run(text: &str) -> CodecResult<Option<Tl1Message>> {
        classify(text, &Modifiers::default(), &StandardVendor)
    }

    #[test]
    fn login_acknowledgment() {
        let message = run("\r\n\n      OK CTAG<").unwrap().unwrap();
        let Tl1Message::Acknowledgment(ack) = message else {
            panic!("expected acknowledgment, got {message:?}");
        };
        assert_eq!(ack.code, "OK");
        assert_eq!(ack.ctag, "CTAG");
        assert_eq!(ack.terminator, Terminator::Ack);
    }

    #[test]
    fn in_progress_acknowledgment() {
        let message = run("\r\n\n   IP 17<").unwrap().unwrap();
        assert_eq!(message.ctag(), Some("17"));
        assert_eq!(message.terminator(), Terminator::Ack);
    }

    #[test]
    fn synchronous_response() {
        let text = "\r\n\n   OLT-1 2024-03-05 14:07:09\r\nM  42 COMPLD\r\n   EN=0   ENDESC=No error\r\n;";
        let response = run(text).unwrap().unwrap().into_response().unwrap();
        assert_eq!(response.header.source_id, "OLT-1");
        assert_eq!(response.ctag(), "42");
        assert_eq!(response.status(), StatusCode::Completed);
        assert_eq!(response.text, "   EN=0   ENDESC=No error\r\n");
        assert_eq!(response.terminator, Terminator::Stop);
        assert!(response.is_final());
        assert!(response.result.is_none());
    }

    #[test]
    fn continued_response() {
        let text = "\r\n\n   OLT-1 2024-03-05 14:07:09\r\nM  42 RTRV\r\n   part one\r\n>";
        let response = run(text).unwrap().unwrap().into_response().unwrap();
        assert_eq!(response.terminator, Terminator::Continue);
        assert!(!response.is_final());
    }

    #[test]
    fn autonomous_message() {
        let text = "\r\n\n   OLT-1 2024-03-05 14:07:09\r\n*C 1001 REPT ALM ONU\r\n   \"LOS\"\r\n;";
        let message = run(text).unwrap().unwrap();
        let Tl1Message::Autonomous(alarm) = message else {
            panic!("expected autonomous message, got {message:?}");
        };
        assert_eq!(alarm.identifier.code, AlarmCode::Critical);
        assert_eq!(alarm.identifier.atag, "1001");
        assert_eq!(alarm.identifier.clause, vec!["REPT", "ALM", "ONU"]);
        assert_eq!(alarm.text, "   \"LOS\"\r\n");
    }

    #[test]
    fn no_preamble_is_no_message() {
        assert_eq!(run(""), Ok(None));
        assert_eq!(run("OK CTAG<"), Ok(None));
        assert_eq!(run("\r\n   OLT-1"), Ok(None));
    }

    #[test]
    fn non_ascii_message() {
        let err = run("\r\n\n   OLT-1 2024-03-05 14:07:09\r\nM  7 COMPLD\r\n   NAME=caf\u{e9}\r\n;")
            .unwrap_err();
        assert_eq!(
            err,
            CodecError::NonAsciiResponse {
                position: 57,
                character: '\u{e9}',
            }
        );
        assert!(err.is_malformed_message());
    }

    #[test]
    fn malformed_messages() {
        assert!(matches!(run("\r\n\n"), Err(CodecError::MalformedMessage(_))));
        assert!(matches!(
            run("\r\n\n   OKCTAG<"),
            Err(CodecError::MalformedAcknowledgment(_))
        ));
        assert!(matches!(
            run("\r\n\n   OLT-1 2024-03-05 14:07:09;"),
            Err(CodecError::MalformedMessage(_))
        ));
        assert!(matches!(
            run("\r\n\n   OLT-1 2024-03-05 14:07:09\r\nM  42 COMPLD\r\nbody!"),
            Err(CodecError::UnknownTerminator('!'))
        ));
        assert!(matches!(
            run("\r\n\n   OLT-1 not-a-date\r\nM  42 COMPLD\r\n;"),
            Err(CodecError::MalformedHeader(_))
        ));
        assert!(matches!(
            run("\r\n\n   OLT-1 2024-03-05 14:07:09\r\nM  42 DONE\r\n;"),
            Err(CodecError::UnknownStatus(_))
        ));
        assert!(matches!(
            run("\r\n\n   OLT-1 2024-03-05 14:07:09\r\nX 1 REPT\r\n;"),
            Err(CodecError::UnknownAlarm(_))
        ));
    }
}
