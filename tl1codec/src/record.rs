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

//! Structured response bodies.

/// Immutable, ordered set of named text fields.
///
/// The field list is decided when the record is parsed (table headers or the
/// keys of a flat body); records never change afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    /// Field value by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Field names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }

    /// `(name, value)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// `true` when the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Record {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// Tabular result set, one [`Record`] per row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    /// Total number of blocks in the multi-block reply
    pub blocks: u32,
    /// Index of this block
    pub number: u32,
    /// Number of rows in this block
    pub records: usize,
    /// Table title line
    pub title: String,
    /// Column names
    pub columns: Vec<String>,
    /// Rows keyed by column name
    pub rows: Vec<Record>,
}

impl Table {
    /// Values of one column, in row order.
    pub fn column<'a>(&'a self, name: &'a str) -> impl Iterator<Item = Option<&'a str>> + 'a {
        self.rows.iter().map(move |row| row.get(name))
    }
}

/// Parsed body of a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseData {
    /// Tabular result set
    Table(Table),
    /// Flat `KEY=VALUE` body
    Record(Record),
}

impl ResponseData {
    /// Borrow the table, if this is one.
    pub fn as_table(&self) -> Option<&Table> {
        match self {
            ResponseData::Table(table) => Some(table),
            ResponseData::Record(_) => None,
        }
    }

    /// Borrow the record, if this is one.
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            ResponseData::Record(record) => Some(record),
            ResponseData::Table(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_keeps_order() {
        let record: Record = [("EN", "IRNE"), ("ENDESC", "resource not exist")]
            .into_iter()
            .collect();
        assert_eq!(record.names().collect::<Vec<_>>(), vec!["EN", "ENDESC"]);
        assert_eq!(record.get("EN"), Some("IRNE"));
        assert_eq!(record.get("missing"), None);
        assert_eq!(record.len(), 2);
    }

    #[test]
    fn table_column() {
        let table = Table {
            columns: vec!["ONUID".into()],
            rows: vec![
                [("ONUID", "1")].into_iter().collect(),
                [("ONUID", "2")].into_iter().collect(),
            ],
            records: 2,
            ..Table::default()
        };
        assert_eq!(
            table.column("ONUID").collect::<Vec<_>>(),
            vec![Some("1"), Some("2")]
        );
        assert!(ResponseData::Table(table).as_record().is_none());
    }
}
