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


//! Fiberhome vendor profile

use crate::table::{is_table, parse_record, parse_table};
use tl1kit_codec::{
    CodecError, CodecResult, Modifiers, Response, ResponseData, ResponseHeader, ResponseId,
    ResponseKind, Terminator, VendorProfile,
};
use tracing::{debug, trace};

/// Vendor profile for Fiberhome ANM/UNM network managers.
///
/// Every response body is parsed: list replies into a
/// [`Table`](tl1kit_codec::Table), everything else into a flat
/// [`Record`](tl1kit_codec::Record). Commands built with
/// [`ResponseKind::List`] require a list reply.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fiberhome;

impl VendorProfile for Fiberhome {
    fn response(
        &self,
        header: ResponseHeader,
        identifier: ResponseId,
        text: String,
        terminator: Terminator,
        modifiers: &Modifiers,
    ) -> CodecResult<Response> {
        let result = if is_table(&text) {
            let table = parse_table(&text)?;
            debug!(
                "Parsed table {:?} with {} rows (block {}/{})",
                table.title,
                table.rows.len(),
                table.number,
                table.blocks
            );
            ResponseData::Table(table)
        } else if modifiers.response_kind() == ResponseKind::List {
            return Err(CodecError::MalformedTable(format!(
                "list reply to {} without {} marker",
                identifier.ctag,
                crate::table::TABLE_MARKER
            )));
        } else {
            let record = parse_record(&text)?;
            trace!("Parsed record with {} fields", record.len());
            ResponseData::Record(record)
        };
        Ok(Response::new(header, identifier, text, terminator).with_result(result))
    }
}
