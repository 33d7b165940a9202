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

//! Selecting the record for a particular coin.

use crate::record::{parse_record, CoinResult, Ticker};
use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};
use tracing::trace;

/// An error indicating that none of the records is for the requested coin.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoinNotFoundError {
    pub ticker: Box<str>,
}

impl Display for CoinNotFoundError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "no OpenAlias record found for coin {:?}", self.ticker)
    }
}

impl Error for CoinNotFoundError {}

/// Finds the OpenAlias record for the given coin among a domain’s TXT records.
///
/// The ticker is compared case-insensitively. TXT records that are not
/// OpenAlias records are skipped. Should there be more than one record for
/// the coin, the first one wins; records after it are not looked at.
///
/// # Errors
///
/// Fails with [`CoinNotFoundError`] if no record matches, including when
/// `ticker` is not a valid ticker symbol.
///
/// # Examples
///
/// ```
/// use openalias::select::lookup_coin;
///
/// let txts = [
///     "v=spf1 -all",
///     "oa1:xmr recipient_address=46BeWrHpwXmHDpDEUmZBWZfoQpdc6HaERCNmx1pEYL2rAcuwufPN9rXHHtyUA4QVy66qeFQkn6sfK8aHYjA3jk3o1Bv16em;",
/// ];
///
/// let r = lookup_coin(txts, "XMR")?;
///
/// assert_eq!(r.coin, "xmr");
/// # Ok::<_, openalias::select::CoinNotFoundError>(())
/// ```
pub fn lookup_coin<I>(raw_txt_records: I, ticker: &str) -> Result<CoinResult, CoinNotFoundError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let not_found = || CoinNotFoundError {
        ticker: ticker.into(),
    };

    let wanted = Ticker::new(ticker).map_err(|_| not_found())?;

    raw_txt_records
        .into_iter()
        .filter_map(|raw| parse_lenient(raw.as_ref()))
        .find(|r| r.coin == wanted)
        .ok_or_else(not_found)
}

/// Returns all OpenAlias records for the given coin, in input order.
///
/// Unlike [`lookup_coin`], this does not pick a winner among duplicates,
/// leaving callers free to treat conflicting records as an error.
pub fn find_coins<I>(raw_txt_records: I, ticker: &str) -> Vec<CoinResult>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let wanted = match Ticker::new(ticker) {
        Ok(t) => t,
        Err(_) => return vec![],
    };

    raw_txt_records
        .into_iter()
        .filter_map(|raw| parse_lenient(raw.as_ref()))
        .filter(|r| r.coin == wanted)
        .collect()
}

fn parse_lenient(raw: &str) -> Option<CoinResult> {
    match parse_record(raw) {
        Ok(r) => Some(r),
        Err(e) => {
            trace!(record = %e.record, error = %e.kind, "ignoring TXT record");
            None
        }
    }
}
