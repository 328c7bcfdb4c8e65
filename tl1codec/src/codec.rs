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

use crate::{CodecError, Command, Terminator, consts};
use bytes::{Buf, BufMut, BytesMut};
use tokio_util::codec::{Decoder, Encoder};
use tracing::{debug, trace, warn};

/// TL1 stream framing.
///
/// Outgoing commands are rendered, checked for ASCII and IAC-escaped. Incoming
/// bytes are cut into whole output messages, each yielded as a `String` that
/// starts at its `\r\n\n` preamble and ends at its terminator. Bytes after a
/// complete message stay buffered, so replies queued on the stream come out
/// in the order they were sent.
///
/// Decoding never fails: each byte becomes the `char` of the same value and
/// content checks are left to [`classify`](crate::classify).
#[derive(Debug, Clone, Copy, Default)]
pub struct Tl1Codec;

impl Tl1Codec {
    /// Create a new codec.
    pub fn new() -> Self {
        Self
    }

    fn escape(bytes: &[u8], dst: &mut BytesMut) {
        let escapes = bytes.iter().filter(|&&b| b == consts::IAC).count();
        dst.reserve(bytes.len() + escapes);
        for &byte in bytes {
            if byte == consts::IAC {
                dst.put_u8(consts::IAC);
            }
            dst.put_u8(byte);
        }
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

/// Length of the longest suffix of `buf` that could begin a preamble.
fn partial_preamble(buf: &[u8]) -> usize {
    let preamble = consts::PREAMBLE.as_bytes();
    (1..preamble.len())
        .rev()
        .find(|&n| buf.ends_with(&preamble[..n]))
        .unwrap_or(0)
}

/// `true` when `message`, which starts after the preamble and ends at its
/// last non-whitespace byte, carries its terminator.
///
/// A single-line message is an acknowledgment and ends at its terminator.
/// In a multi-line message the terminator must sit alone on the last line, so
/// `<` or `;` inside a body line does not end the message.
fn is_complete(message: &[u8]) -> bool {
    let Some((&last, rest)) = message.split_last() else {
        return false;
    };
    if !Terminator::is_terminator(char::from(last)) {
        return false;
    }
    if !rest.contains(&b'\n') {
        return true;
    }
    rest.iter()
        .rposition(|&b| b != b' ' && b != b'\t')
        .is_some_and(|index| rest[index] == b'\n')
}

fn discard(src: &mut BytesMut, count: usize) {
    if src[..count].iter().any(|b| !b.is_ascii_whitespace()) {
        debug!("Discarding {} bytes outside of any message", count);
    } else {
        trace!("Discarding {} bytes of whitespace", count);
    }
    src.advance(count);
}

impl Decoder for Tl1Codec {
    type Item = String;
    type Error = CodecError;

    /// Cut the next complete output message out of `src`.
    ///
    /// Anything before the first preamble is discarded. A message runs until
    /// the next preamble or the end of the buffer. It is complete once its
    /// last non-whitespace byte is a terminator that is either on the only
    /// line or on a line of its own. An unterminated message followed by
    /// another preamble can never complete and is dropped.
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<String>, Self::Error> {
        let preamble = consts::PREAMBLE.as_bytes();
        loop {
            let Some(start) = find(src, preamble) else {
                let keep = partial_preamble(src);
                if src.len() > keep {
                    let count = src.len() - keep;
                    discard(src, count);
                }
                return Ok(None);
            };
            if start > 0 {
                discard(src, start);
            }

            let end = find(&src[preamble.len()..], preamble)
                .map_or(src.len(), |offset| offset + preamble.len());
            let length = src[..end]
                .iter()
                .rposition(|b| !b.is_ascii_whitespace())
                .map_or(0, |index| index + 1);

            if length > preamble.len() && is_complete(&src[preamble.len()..length]) {
                let frame = src.split_to(length);
                let message: String = frame.iter().map(|&b| char::from(b)).collect();
                trace!("Decoded message of {} bytes", message.len());
                return Ok(Some(message));
            }

            if end == src.len() {
                return Ok(None);
            }
            warn!(
                "Dropping unterminated message of {} bytes followed by another message",
                end
            );
            src.advance(end);
        }
    }

    fn decode_eof(&mut self, buf: &mut BytesMut) -> Result<Option<String>, Self::Error> {
        if let Some(message) = self.decode(buf)? {
            return Ok(Some(message));
        }
        if buf.iter().any(|b| !b.is_ascii_whitespace()) {
            warn!(
                "Stream ended inside a message, dropping {} bytes",
                buf.len()
            );
        }
        buf.clear();
        Ok(None)
    }
}

impl Encoder<&Command> for Tl1Codec {
    type Error = CodecError;

    fn encode(&mut self, item: &Command, dst: &mut BytesMut) -> Result<(), Self::Error> {
        let bytes = item.to_bytes()?;
        Self::escape(&bytes, dst);
        Ok(())
    }
}

impl Encoder<&[u8]> for Tl1Codec {
    type Error = CodecError;

    fn encode(&mut self, item: &[u8], dst: &mut BytesMut) -> Result<(), Self::Error> {
        Self::escape(item, dst);
        Ok(())
    }
}
