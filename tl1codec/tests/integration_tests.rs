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

//! Integration tests for tl1codec
//!
//! These tests drive commands and output messages through the codec, the
//! classifier and a custom vendor profile together.

use bytes::BytesMut;
use proptest::prelude::*;
use tl1kit_codec::{
    CodecResult, Command, CommandCode, Modifiers, Parameter, ParameterBlock, Record, Response,
    ResponseData, ResponseHeader, ResponseId, ResponseKind, StandardVendor, Terminator,
    Tl1Codec, Tl1Message, VendorProfile, classify, parse_parameters,
};
use tokio_util::codec::{Decoder, Encoder};

// ============================================================================
// Helper Functions
// ============================================================================

fn decode_all(codec: &mut Tl1Codec, buffer: &mut BytesMut) -> Vec<String> {
    let mut messages = Vec::new();
    while let Some(message) = codec.decode(buffer).unwrap() {
        messages.push(message);
    }
    messages
}

/// Splits the body on whitespace into a record of `KEY=VALUE` pairs and
/// remembers the expected shape in a field.
#[derive(Debug)]
struct PairsVendor;

impl VendorProfile for PairsVendor {
    fn response(
        &self,
        header: ResponseHeader,
        identifier: ResponseId,
        text: String,
        terminator: Terminator,
        modifiers: &Modifiers,
    ) -> CodecResult<Response> {
        let mut fields: Vec<(String, String)> = text
            .split_whitespace()
            .filter_map(|pair| pair.split_once('='))
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        fields.push((
            "kind".to_string(),
            format!("{:?}", modifiers.response_kind()),
        ));
        let record: Record = fields.into_iter().collect();
        Ok(Response::new(header, identifier, text, terminator).with_result(ResponseData::Record(record)))
    }
}

// ============================================================================
// Command Rendering Tests
// ============================================================================

#[test]
fn omission_rule() {
    assert_eq!(CommandCode::new("CFG").with_mod1("ONU").to_string(), "CFG-ONU");
    assert_eq!(CommandCode::new("LOGIN").to_string(), "LOGIN");
}

#[test]
fn login_round_trip() {
    let login = Command::new("LOGIN").with_payload(
        ParameterBlock::new()
            .with_field("username", "UN", "admin")
            .with_field("password", "PWD", "secret"),
    );
    assert_eq!(login.to_string(), "LOGIN:::CTAG::UN=admin,PWD=secret;");

    let message = classify("\r\n\n      OK CTAG<", login.modifiers(), &StandardVendor)
        .unwrap()
        .unwrap();
    match message {
        Tl1Message::Acknowledgment(ack) => {
            assert_eq!(ack.code, "OK");
            assert_eq!(ack.ctag, "CTAG");
            assert_eq!(ack.terminator, Terminator::Ack);
        }
        other => panic!("expected acknowledgment, got {other:?}"),
    }
}

#[test]
fn split_field_set() {
    let onu = ParameterBlock::new()
        .with_field("olt_id", "OLTID", "10.0.0.1")
        .with_field("pon_id", "PONID", "NA-NA-3-2")
        .with_field("onu_id", "ONUID", "FHTT01")
        .with_field("model", "ONUTYPE", "AN5506-04-F1");
    let command = Command::from_code(CommandCode::new("ADD").with_mod1("ONU"))
        .with_aid(onu.select(&["olt_id", "pon_id"]))
        .with_payload(onu.select(&["onu_id", "model"]))
        .with_ctag("11");
    assert_eq!(
        command.to_string(),
        "ADD-ONU::OLTID=10.0.0.1,PONID=NA-NA-3-2:11::ONUID=FHTT01,ONUTYPE=AN5506-04-F1;"
    );
}

// ============================================================================
// Stream Tests
// ============================================================================

#[test]
fn stream_of_mixed_messages() {
    let mut codec = Tl1Codec::new();
    let mut buffer = BytesMut::new();
    buffer.extend_from_slice(b"\r\n\n   IP 5<");
    buffer.extend_from_slice(
        b"\r\n\n   OLT 2024-06-01 08:00:00\r\n** 301 REPT ALM PON\r\n   \"LOS\"\r\n;",
    );
    buffer.extend_from_slice(
        b"\r\n\n   OLT 2024-06-01 08:00:01\r\nM  5 COMPLD\r\n   ONUID=1   STATE=UP\r\n;",
    );

    let modifiers = Modifiers::new().with_response_kind(ResponseKind::List);
    let kinds: Vec<&'static str> = decode_all(&mut codec, &mut buffer)
        .iter()
        .map(|text| match classify(text, &modifiers, &PairsVendor).unwrap() {
            Some(Tl1Message::Acknowledgment(_)) => "ack",
            Some(Tl1Message::Autonomous(_)) => "autonomous",
            Some(Tl1Message::Response(response)) => {
                let record = response.result.as_ref().and_then(ResponseData::as_record).unwrap();
                assert_eq!(record.get("ONUID"), Some("1"));
                assert_eq!(record.get("kind"), Some("List"));
                "response"
            }
            None => "none",
        })
        .collect();
    assert_eq!(kinds, vec!["ack", "autonomous", "response"]);
}

#[test]
fn chunked_stream() {
    let reply: &[u8] = b"\r\n\n   OLT 2024-06-01 08:00:01\r\nM  5 COMPLD\r\n   EN=0\r\n;\r\n";
    let mut codec = Tl1Codec::new();
    let mut buffer = BytesMut::new();
    let mut messages = Vec::new();
    for chunk in reply.chunks(4) {
        buffer.extend_from_slice(chunk);
        messages.extend(decode_all(&mut codec, &mut buffer));
    }
    assert_eq!(messages.len(), 1);
    assert!(messages[0].ends_with("EN=0\r\n;"));
}

#[test]
fn split_anywhere_in_body_with_terminator_characters() {
    let reply: &[u8] =
        b"\r\n\n   OLT 2024-06-01 08:00:01\r\nM  5 COMPLD\r\n   DESC=<lobby>;   EN=0\r\n;";
    for split in 1..reply.len() {
        let mut codec = Tl1Codec::new();
        let mut buffer = BytesMut::from(&reply[..split]);
        let mut messages = decode_all(&mut codec, &mut buffer);
        buffer.extend_from_slice(&reply[split..]);
        messages.extend(decode_all(&mut codec, &mut buffer));
        assert_eq!(
            messages,
            vec![String::from_utf8(reply.to_vec()).unwrap()],
            "split at {split}"
        );
    }
}

#[test]
fn iac_in_command_is_doubled() {
    let mut codec = Tl1Codec::new();
    let mut buffer = BytesMut::new();
    codec.encode(&b"\xFF\xFF"[..], &mut buffer).unwrap();
    codec.encode(&Command::new("RTRV"), &mut buffer).unwrap();
    assert_eq!(&buffer[..], b"\xFF\xFF\xFF\xFFRTRV:::CTAG::;");
}

// ============================================================================
// Property Tests
// ============================================================================

prop_compose! {
    fn parameters()(pairs in prop::collection::vec(("[A-Z]{1,6}", "[A-Za-z0-9.-]{1,10}"), 0..6))
        -> ParameterBlock {
        let mut block = ParameterBlock::new();
        for (key, value) in pairs {
            block.insert(key.clone(), Parameter::new(key, value));
        }
        block
    }
}

proptest! {
    #[test]
    fn rendering_is_deterministic_and_reparses(
        verb in "[A-Z]{1,8}",
        mod1 in "[A-Z]{0,6}",
        mod2 in "[A-Z]{0,6}",
        ctag in "[A-Z0-9]{1,6}",
        aid in parameters(),
        payload in parameters(),
    ) {
        let command = Command::from_code(CommandCode::new(verb).with_mod1(mod1).with_mod2(mod2))
            .with_ctag(ctag.clone())
            .with_aid(aid.clone())
            .with_payload(payload.clone());

        let first = command.to_bytes().unwrap();
        let second = command.to_bytes().unwrap();
        prop_assert_eq!(&first, &second);

        let parsed: Command = command.to_string().parse().unwrap();
        prop_assert_eq!(parsed.code().to_string(), command.code().to_string());
        prop_assert_eq!(parsed.ctag(), ctag.as_str());

        let expected = |block: &ParameterBlock| -> Vec<(String, String)> {
            block.iter().map(|(_, p)| (p.key().to_string(), p.value().to_string())).collect()
        };
        prop_assert_eq!(parse_parameters(&aid.to_string()).unwrap(), expected(&aid));
        prop_assert_eq!(parse_parameters(&payload.to_string()).unwrap(), expected(&payload));
        prop_assert_eq!(expected(&parsed.staging().aid), expected(&aid));
        prop_assert_eq!(expected(parsed.payload()), expected(&payload));
    }
}
