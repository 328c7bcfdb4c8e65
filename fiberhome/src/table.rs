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


//! Response body parsers.
//!
//! A list reply looks like:
//!
//! ```text
//!    total_blocks=1
//!    block_number=1
//!    block_records=2
//! --------------------------------
//! List of ONU
//! ONUIP	NAME	STATE
//! --------------------------------
//! 10.1.1.2	onu-a	up
//! 10.1.1.3	onu-b	down
//! ```
//!
//! Anything else is read as flat `KEY=VALUE` pairs separated by three spaces.

use tl1kit_codec::{CodecError, CodecResult, Record, Table, consts};

/// Leading field of a list reply.
pub const TABLE_MARKER: &str = "total_blocks";

/// `true` when the body starts with the list metadata.
pub fn is_table(text: &str) -> bool {
    text.split(consts::LINE_SEPARATOR)
        .next()
        .is_some_and(|line| line.trim().starts_with(TABLE_MARKER))
}

fn malformed(reason: impl Into<String>) -> CodecError {
    CodecError::MalformedTable(reason.into())
}

fn is_rule(line: &str) -> bool {
    let line = line.trim();
    !line.is_empty() && line.chars().all(|c| c == '-' || c == '=')
}

fn metadata<T: std::str::FromStr>(line: Option<&str>, field: &str) -> CodecResult<T> {
    let line = line.ok_or_else(|| malformed(format!("missing {field} line")))?;
    let (_, value) = line
        .split_once(consts::ASSIGNMENT)
        .ok_or_else(|| malformed(format!("{field} line without value: {line:?}")))?;
    value
        .trim()
        .parse()
        .map_err(|_| malformed(format!("{field} is not a count: {value:?}")))
}

fn cells(line: &str) -> impl Iterator<Item = &str> {
    line.split(consts::COLUMN_SEPARATOR).map(str::trim)
}

/// Parse a list reply into a [`Table`].
///
/// Exactly `records` rows are read after the column header; a rule line after
/// the title and after the header is skipped when present. Missing rows or a
/// row whose cell count differs from the header fail instead of being padded.
pub fn parse_table(text: &str) -> CodecResult<Table> {
    let mut lines = text.split(consts::LINE_SEPARATOR);

    let blocks = metadata(lines.next(), "total_blocks")?;
    let number = metadata(lines.next(), "block_number")?;
    let records: usize = metadata(lines.next(), "block_records")?;

    let separator = lines.next().ok_or_else(|| malformed("missing separator"))?;
    if !is_rule(separator) {
        return Err(malformed(format!("expected separator, got {separator:?}")));
    }

    let title = lines
        .next()
        .ok_or_else(|| malformed("missing title"))?
        .trim()
        .to_string();

    let mut lines = lines.peekable();
    lines.next_if(|line| is_rule(line));
    let header = lines.next().ok_or_else(|| malformed("missing column header"))?;
    let columns: Vec<String> = cells(header).map(str::to_string).collect();
    lines.next_if(|line| is_rule(line));

    let mut rows: Vec<Record> = Vec::with_capacity(records);
    for index in 0..records {
        let line = lines
            .next()
            .ok_or_else(|| malformed(format!("expected {records} rows, found {index}")))?;
        let values: Vec<&str> = cells(line).collect();
        if values.len() != columns.len() {
            return Err(malformed(format!(
                "row {index} has {} cells for {} columns",
                values.len(),
                columns.len()
            )));
        }
        rows.push(columns.iter().map(String::as_str).zip(values).collect());
    }

    Ok(Table {
        blocks,
        number,
        records,
        title,
        columns,
        rows,
    })
}

/// Parse a flat `KEY=VALUE   KEY=VALUE` body into one [`Record`].
///
/// An empty body yields an empty record. Each line is split on the
/// three-space separator; a piece without `=` fails.
pub fn parse_record(text: &str) -> CodecResult<Record> {
    text.split(consts::LINE_SEPARATOR)
        .flat_map(|line| line.split(consts::RECORD_SEPARATOR))
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(|piece| {
            piece
                .split_once(consts::ASSIGNMENT)
                .map(|(key, value)| (key.trim(), value.trim()))
                .ok_or_else(|| malformed(format!("expected KEY=VALUE, got {piece:?}")))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIST: &str = "   total_blocks=1\r\n   block_number=1\r\n   block_records=2\r\n\
        --------------------\r\nList of ONU\r\nONUIP\tNAME\tSTATE\r\n\
        --------------------\r\n10.1.1.2\tonu-a\tup\r\n10.1.1.3\tonu-b\tdown\r\n";

    #[test]
    fn test_marker_detection() {
        assert!(is_table(LIST));
        assert!(!is_table("   EN=0   ENDESC=No error\r\n"));
        assert!(!is_table(""));
    }

    #[test]
    fn test_parse_table() {
        let table = parse_table(LIST).unwrap();
        assert_eq!((table.blocks, table.number, table.records), (1, 1, 2));
        assert_eq!(table.title, "List of ONU");
        assert_eq!(table.columns, vec!["ONUIP", "NAME", "STATE"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1].get("NAME"), Some("onu-b"));
        assert_eq!(table.rows[0].len(), 3);
    }

    #[test]
    fn test_rule_before_header() {
        let text = "total_blocks=1\r\nblock_number=1\r\nblock_records=1\r\n----\r\n\
            Trunks\r\n----\r\nNO\tPORT\r\n1\tNA-NA-1-1\r\n";
        let table = parse_table(text).unwrap();
        assert_eq!(table.title, "Trunks");
        assert_eq!(table.rows[0].get("PORT"), Some("NA-NA-1-1"));
    }

    #[test]
    fn test_missing_rows_fail() {
        let text = LIST.replace("10.1.1.3\tonu-b\tdown\r\n", "");
        assert!(matches!(
            parse_table(&text),
            Err(CodecError::MalformedTable(_))
        ));
    }

    #[test]
    fn test_short_row_fails() {
        let text = LIST.replace("\tonu-b\tdown", "\tonu-b");
        assert!(matches!(
            parse_table(&text),
            Err(CodecError::MalformedTable(_))
        ));
    }

    #[test]
    fn test_bad_metadata_fails() {
        assert!(parse_table("total_blocks=x\r\n").is_err());
        assert!(parse_table("total_blocks=1\r\nblock_number=1\r\n").is_err());
        assert!(parse_table("total_blocks=1\r\nblock_number=1\r\nblock_records=0\r\ntitle\r\n").is_err());
    }

    #[test]
    fn test_empty_table() {
        let text = "total_blocks=1\r\nblock_number=1\r\nblock_records=0\r\n---\r\nEmpty\r\nA\tB\r\n---\r\n";
        let table = parse_table(text).unwrap();
        assert!(table.rows.is_empty());
        assert_eq!(table.columns.len(), 2);
    }

    #[test]
    fn test_parse_record() {
        let record = parse_record("   EN=0   ENDESC=No error\r\n").unwrap();
        assert_eq!(record.get("EN"), Some("0"));
        assert_eq!(record.get("ENDESC"), Some("No error"));
        assert_eq!(record.names().collect::<Vec<_>>(), vec!["EN", "ENDESC"]);
    }

    #[test]
    fn test_parse_record_multiline_and_empty() {
        let record = parse_record("   A=1\r\n   B=2\r\n").unwrap();
        assert_eq!(record.len(), 2);
        assert!(parse_record("   \r\n").unwrap().is_empty());
        assert!(matches!(
            parse_record("   A=1   garbage"),
            Err(CodecError::MalformedTable(_))
        ));
    }
}
