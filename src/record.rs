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

//! OpenAlias records.
//!
//! An OpenAlias record is a DNS TXT record of the form
//!
//! ```text
//! oa1:<ticker> <key>=<value>; <key>=<value>; ...
//! ```
//!
//! where the ticker names the cryptocurrency and the only mandatory key is
//! `recipient_address`.

use crate::{
    field_list::{FieldList, FieldListParseError},
    parse::{is_wsp, trim_wsp},
};
use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    str::FromStr,
};
use tracing::trace;

/// The prefix identifying version 1 OpenAlias records.
pub const OPENALIAS_PREFIX: &str = "oa1:";

const FIELD_KEYS: &[&str] = &[
    "recipient_address",
    "recipient_name",
    "tx_description",
    "tx_payment_id",
    "tx_amount",
    "address_signature",
    "checksum",
];

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum MalformedRecordErrorKind {
    MissingPrefix,
    MissingTicker,
    InvalidTickerChars,
    MissingAddress,
    FieldSyntax,
    DuplicateField,
}

impl Display for MalformedRecordErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingPrefix => write!(f, "oa1: prefix missing"),
            Self::MissingTicker => write!(f, "coin ticker missing"),
            Self::InvalidTickerChars => write!(f, "invalid characters in coin ticker"),
            Self::MissingAddress => write!(f, "recipient_address missing"),
            Self::FieldSyntax => write!(f, "invalid field list"),
            Self::DuplicateField => write!(f, "duplicate field"),
        }
    }
}

/// An error that occurs when a string is not a well-formed OpenAlias record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MalformedRecordError {
    /// The offending input, with surrounding whitespace removed.
    pub record: Box<str>,
    pub kind: MalformedRecordErrorKind,
}

impl MalformedRecordError {
    fn new(record: &str, kind: MalformedRecordErrorKind) -> Self {
        Self {
            record: record.into(),
            kind,
        }
    }
}

impl Display for MalformedRecordError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "malformed OpenAlias record {:?}: {}", self.record, self.kind)
    }
}

impl Error for MalformedRecordError {}

/// A coin ticker symbol such as `xmr` or `btc`.
///
/// Tickers consist of ASCII letters and digits. They are matched
/// case-insensitively and kept in lowercase.
#[derive(Clone, Eq, Hash, PartialEq)]
pub struct Ticker(Box<str>);

impl Ticker {
    pub fn new(s: &str) -> Result<Self, MalformedRecordErrorKind> {
        if s.is_empty() {
            return Err(MalformedRecordErrorKind::MissingTicker);
        }
        if !s.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(MalformedRecordErrorKind::InvalidTickerChars);
        }
        Ok(Self(s.to_ascii_lowercase().into()))
    }
}

impl Display for Ticker {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::Debug for Ticker {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", &self.0)
    }
}

impl AsRef<str> for Ticker {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Ticker {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for Ticker {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

/// The payment details published in one OpenAlias record.
///
/// Optional fields hold the empty string when the record does not have the
/// corresponding key. Values are taken verbatim: addresses, amounts and
/// signatures are not interpreted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoinResult {
    pub coin: Ticker,
    pub recipient_address: Box<str>,  // non-empty
    pub recipient_name: Box<str>,
    pub tx_description: Box<str>,
    pub tx_payment_id: Box<str>,
    pub tx_amount: Box<str>,
    pub address_signature: Box<str>,
    pub checksum: Box<str>,
}

impl CoinResult {
    fn from_field_list(
        coin: Ticker,
        fields: &FieldList<'_>,
    ) -> Result<Self, MalformedRecordErrorKind> {
        let recipient_address: Box<str> = match fields.get("recipient_address") {
            Some(value) if !value.is_empty() => value.into(),
            _ => return Err(MalformedRecordErrorKind::MissingAddress),
        };

        let field = |key: &str| -> Box<str> { fields.get(key).unwrap_or_default().into() };

        Ok(Self {
            coin,
            recipient_address,
            recipient_name: field("recipient_name"),
            tx_description: field("tx_description"),
            tx_payment_id: field("tx_payment_id"),
            tx_amount: field("tx_amount"),
            address_signature: field("address_signature"),
            checksum: field("checksum"),
        })
    }
}

impl FromStr for CoinResult {
    type Err = MalformedRecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_record(s)
    }
}

/// Parses one TXT record value as an OpenAlias record.
///
/// # Errors
///
/// Fails with a [`MalformedRecordError`] naming the violated part of the
/// grammar. The error also carries the input, so that callers looking at many
/// TXT records can report which one was rejected.
///
/// # Examples
///
/// ```
/// use openalias::record::parse_record;
///
/// let r = parse_record(
///     "oa1:ltc recipient_address=MDRRb9pdLs6nXQ91VNfJEN68ohHSwWvscv; recipient_name=Privex Donations;",
/// )?;
///
/// assert_eq!(r.coin, "ltc");
/// assert_eq!(&*r.recipient_address, "MDRRb9pdLs6nXQ91VNfJEN68ohHSwWvscv");
/// assert_eq!(&*r.recipient_name, "Privex Donations");
/// # Ok::<_, openalias::record::MalformedRecordError>(())
/// ```
pub fn parse_record(raw: &str) -> Result<CoinResult, MalformedRecordError> {
    let record = trim_wsp(raw);

    let err = |kind| MalformedRecordError::new(record, kind);

    let s = record
        .strip_prefix(OPENALIAS_PREFIX)
        .ok_or_else(|| err(MalformedRecordErrorKind::MissingPrefix))?;

    let (ticker, rest) = s.split_once(is_wsp).unwrap_or((s, ""));

    let coin = Ticker::new(ticker).map_err(err)?;

    // keys outside `FIELD_KEYS` are skipped, whatever their shape
    let fields = FieldList::from_str(rest, FIELD_KEYS).map_err(|e| match e {
        FieldListParseError::DuplicateKey => err(MalformedRecordErrorKind::DuplicateField),
        FieldListParseError::Syntax => err(MalformedRecordErrorKind::FieldSyntax),
    })?;

    CoinResult::from_field_list(coin, &fields).map_err(err)
}

/// Parses a set of TXT record values, keeping only OpenAlias records.
///
/// Each value is parsed on its own; values that are not well-formed OpenAlias
/// records are left out. The order of the input is preserved.
pub fn parse_records<I>(raw_records: I) -> Vec<CoinResult>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    raw_records
        .into_iter()
        .filter_map(|raw| match parse_record(raw.as_ref()) {
            Ok(r) => Some(r),
            Err(e) => {
                trace!(record = %e.record, error = %e.kind, "skipping TXT record");
                None
            }
        })
        .collect()
}
