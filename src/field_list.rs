// openalias – client library for OpenAlias payment records
// Copyright © 2023 The openalias authors
//
// This program is free software: you can redistribute it and/or modify it under
// the terms of the GNU General Public License as published by the Free Software
// Foundation, either version 3 of the License, or (at your option) any later
// version.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more
// details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.

//! The `key=value;` field list following the ticker in an OpenAlias record.

use crate::parse::{rstrip_wsp, strip_wsp, trim_wsp};
use std::collections::HashSet;

// field-list = [ segment *( ";" segment ) ]
// segment    = *WSP [ key *WSP "=" *WSP value ] *WSP
// value      = *( any char except ";" and controls other than HTAB )
//
// Only segments whose key is one of the caller's known keys are checked.
// Anything else, including empty segments and segments without "=", is
// skipped.

#[derive(Debug, PartialEq, Eq)]
pub struct Field<'a> {
    pub key: &'a str,
    pub value: &'a str,
}

#[derive(Debug, PartialEq, Eq)]
pub enum FieldListParseError {
    DuplicateKey,
    Syntax,
}

#[derive(Debug, PartialEq, Eq)]
pub struct FieldList<'a>(Vec<Field<'a>>);

impl<'a> AsRef<[Field<'a>]> for FieldList<'a> {
    fn as_ref(&self) -> &[Field<'a>] {
        &self.0
    }
}

impl<'a> FieldList<'a> {
    pub fn from_str(val: &'a str, known_keys: &[&str]) -> Result<Self, FieldListParseError> {
        let mut fields = vec![];
        let mut keys_seen = HashSet::new();

        for segment in val.split(';') {
            let segment = trim_wsp(segment);

            let (key, value) = match segment.split_once('=') {
                Some((key, value)) => (rstrip_wsp(key).unwrap_or(key), Some(value)),
                None => (segment, None),
            };

            if !known_keys.contains(&key) {
                continue;
            }

            let value = value.ok_or(FieldListParseError::Syntax)?;
            let value = strip_wsp(value).unwrap_or(value);

            if !value.chars().all(is_value_char) {
                return Err(FieldListParseError::Syntax);
            }
            if !keys_seen.insert(key) {
                return Err(FieldListParseError::DuplicateKey);
            }

            fields.push(Field { key, value });
        }

        Ok(FieldList(fields))
    }

    pub fn get(&self, key: &str) -> Option<&'a str> {
        self.0.iter().find(|f| f.key == key).map(|f| f.value)
    }
}

fn is_value_char(c: char) -> bool {
    !c.is_control() || c == '\t'
}
