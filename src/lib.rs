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

//! A client library for [OpenAlias], the convention of publishing
//! cryptocurrency payment details in a domain’s DNS TXT records.
//!
//! An OpenAlias record looks like this:
//!
//! ```text
//! oa1:xmr recipient_address=46BeWrHp...; recipient_name=Monero Development;
//! ```
//!
//! The library has two halves. Module `record` parses and validates such
//! records, and module `select` picks the record for a given coin out of all
//! TXT records of a domain. Both work on plain strings and do no I/O.
//! Module `resolver` obtains the TXT records from DNS, through the trait
//! [`LookupTxt`][crate::resolver::LookupTxt].
//!
//! # Usage
//!
//! ```
//! use openalias::{lookup_coin, parse_records};
//!
//! let txts = [
//!     "oa1:ltc recipient_address=MDRRb9pdLs6nXQ91VNfJEN68ohHSwWvscv; recipient_name=Privex Donations;",
//!     "v=spf1 include:_spf.example.com ~all",
//! ];
//!
//! assert_eq!(parse_records(txts).len(), 1);
//!
//! let ltc = lookup_coin(txts, "ltc").unwrap();
//! assert_eq!(&*ltc.recipient_name, "Privex Donations");
//! ```
//!
//! # Cargo features
//!
//! The feature **`hickory-resolver`** makes an implementation of
//! [`LookupTxt`][crate::resolver::LookupTxt] available for the Hickory DNS
//! resolver, along with functions to query over UDP, TCP, or DNS-over-HTTPS.
//!
//! [OpenAlias]: https://openalias.org

mod field_list;
pub mod name;
mod parse;
pub mod record;
pub mod resolver;
pub mod select;

pub use crate::{
    name::{query_name, Alias, ParseAliasError},
    record::{
        parse_record, parse_records, CoinResult, MalformedRecordError, MalformedRecordErrorKind,
        Ticker,
    },
    resolver::{
        look_up_txt_records, resolve_coin, Config, DohProvider, LookupError, LookupTxt,
        ResolutionError, ResolutionErrorKind, Transport,
    },
    select::{find_coins, lookup_coin, CoinNotFoundError},
};
