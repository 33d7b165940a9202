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

//! Retrieving TXT records from DNS.
//!
//! Resolution goes through the [`LookupTxt`] trait, so that any DNS client
//! can be plugged in. With feature `hickory-resolver`, an implementation for
//! the Hickory DNS resolver is provided, together with [`resolve_txt`] which
//! queries over classic UDP or TCP DNS, or over DNS-over-HTTPS.

#[cfg(feature = "hickory-resolver")]
mod hickory_resolver;

#[cfg(feature = "hickory-resolver")]
pub use self::hickory_resolver::{build_resolver, resolve_txt};

use crate::{
    name,
    record::CoinResult,
    select::{lookup_coin, CoinNotFoundError},
};
use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    future::Future,
    io::{self, ErrorKind},
    str::FromStr,
    time::Duration,
};
use tokio::time;
use tracing::{debug, trace};

/// A trait for looking up DNS TXT records.
///
/// The error type used here is `std::io::Error`. The following error kinds on
/// the query result are recognised and receive special treatment.
///
/// * `ErrorKind::InvalidInput` on the query: the domain argument could not be used
/// * `ErrorKind::NotFound` on the query: NXDOMAIN
/// * `ErrorKind::TimedOut` on the query: timeout
///
/// Any other error kind counts as a failure of the transport. A domain that
/// exists but has no TXT records must produce an empty answer, not an error.
///
/// The inner, per-record `std::io::Error` can be used to signal errors
/// (parsing, encoding) with individual TXT records.
pub trait LookupTxt: Send + Sync {
    /// The answer consisting of TXT records found.
    type Answer: IntoIterator<Item = io::Result<Vec<u8>>>;
    /// The future resolving to the query’s answer.
    type Query<'a>: Future<Output = io::Result<Self::Answer>> + Send + 'a
    where
        Self: 'a;

    /// Looks up the domain’s TXT records in DNS.
    ///
    /// The domain will be passed to this trait as a string in absolute A-label
    /// (ASCII) format, with trailing dot (eg `donate.example.com.`).
    ///
    /// The character strings making up one TXT record are expected to be
    /// concatenated into a single value.
    fn lookup_txt(&self, domain: &str) -> Self::Query<'_>;
}

/// The network path used for DNS queries.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Transport {
    /// The platform’s resolver configuration, as is.
    #[default]
    System,
    /// Classic DNS over UDP, to the platform’s name servers.
    Udp,
    /// Classic DNS over TCP, to the platform’s name servers.
    Tcp,
    /// DNS-over-HTTPS, to a public provider.
    Doh,
}

impl Display for Transport {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::System => write!(f, "system"),
            Self::Udp => write!(f, "udp"),
            Self::Tcp => write!(f, "tcp"),
            Self::Doh => write!(f, "doh"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseTransportError;

impl Display for ParseTransportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "unknown transport")
    }
}

impl Error for ParseTransportError {}

impl FromStr for Transport {
    type Err = ParseTransportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("system") {
            Ok(Self::System)
        } else if s.eq_ignore_ascii_case("udp") {
            Ok(Self::Udp)
        } else if s.eq_ignore_ascii_case("tcp") {
            Ok(Self::Tcp)
        } else if s.eq_ignore_ascii_case("doh") || s.eq_ignore_ascii_case("https") {
            Ok(Self::Doh)
        } else {
            Err(ParseTransportError)
        }
    }
}

/// Public DNS-over-HTTPS services.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum DohProvider {
    #[default]
    Cloudflare,
    Google,
    Quad9,
}

/// Configuration for TXT record resolution.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    /// The maximum duration of a TXT record lookup, including all attempts.
    /// When this duration is exceeded the lookup fails with a timeout.
    pub lookup_timeout: Duration,

    /// Number of attempts a resolver built by this library makes per name
    /// server before giving up. Each attempt gets an equal share of
    /// `lookup_timeout`.
    pub attempts: usize,

    /// The service used for [`Transport::Doh`].
    pub doh_provider: DohProvider,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lookup_timeout: Duration::from_secs(10),
            attempts: 2,
            doh_provider: DohProvider::Cloudflare,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ResolutionErrorKind {
    InvalidDomain,
    Timeout,
    NxDomain,
    TransportFailure,
}

impl ResolutionErrorKind {
    fn from_io(error: &io::Error) -> Self {
        match error.kind() {
            ErrorKind::InvalidInput => Self::InvalidDomain,
            ErrorKind::NotFound => Self::NxDomain,
            ErrorKind::TimedOut => Self::Timeout,
            _ => Self::TransportFailure,
        }
    }
}

impl Display for ResolutionErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDomain => write!(f, "invalid domain name"),
            Self::Timeout => write!(f, "lookup timed out"),
            Self::NxDomain => write!(f, "domain does not exist"),
            Self::TransportFailure => write!(f, "lookup failed"),
        }
    }
}

/// An error that occurs when TXT records cannot be retrieved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolutionError {
    /// The domain queried, or the alias as given if it was not usable.
    pub domain: Box<str>,
    pub kind: ResolutionErrorKind,
}

impl ResolutionError {
    pub fn new(domain: &str, kind: ResolutionErrorKind) -> Self {
        Self {
            domain: domain.into(),
            kind,
        }
    }
}

impl Display for ResolutionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "could not resolve TXT records for {}: {}", self.domain, self.kind)
    }
}

impl Error for ResolutionError {}

/// Looks up the TXT records published for an alias.
///
/// The alias is converted to a query name first (see
/// [`query_name`][crate::name::query_name]). TXT values that are not valid
/// UTF-8, or that the resolver flagged as unusable, are dropped. An empty
/// result means the domain exists but has no TXT records.
///
/// # Errors
///
/// Fails if the alias is not a usable domain name, if the lookup takes longer
/// than `config.lookup_timeout`, or if the resolver reports an error.
pub async fn look_up_txt_records<T>(
    resolver: &T,
    alias: &str,
    config: &Config,
) -> Result<Vec<String>, ResolutionError>
where
    T: LookupTxt + ?Sized,
{
    let domain = name::query_name(alias)
        .map_err(|_| ResolutionError::new(alias, ResolutionErrorKind::InvalidDomain))?;

    // Note the trailing dot: only absolute queries.
    let dname = format!("{domain}.");

    trace!(%domain, "looking up TXT records");

    let txts = match time::timeout(config.lookup_timeout, resolver.lookup_txt(&dname)).await {
        Ok(Ok(txts)) => txts,
        Ok(Err(e)) => {
            debug!(%domain, error = %e, "TXT lookup failed");
            return Err(ResolutionError::new(&domain, ResolutionErrorKind::from_io(&e)));
        }
        Err(_) => {
            debug!(%domain, "TXT lookup timed out");
            return Err(ResolutionError::new(&domain, ResolutionErrorKind::Timeout));
        }
    };

    let mut result = vec![];

    for txt in txts {
        match txt.and_then(|s| String::from_utf8(s).map_err(|_| ErrorKind::InvalidData.into())) {
            Ok(s) => result.push(s),
            Err(e) => {
                trace!(%domain, error = %e, "dropping unusable TXT record");
            }
        }
    }

    Ok(result)
}

/// An error that occurs when resolving an alias to a coin’s payment details.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LookupError {
    Resolution(ResolutionError),
    CoinNotFound(CoinNotFoundError),
}

impl Display for LookupError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resolution(error) => error.fmt(f),
            Self::CoinNotFound(error) => error.fmt(f),
        }
    }
}

impl Error for LookupError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Resolution(error) => Some(error),
            Self::CoinNotFound(error) => Some(error),
        }
    }
}

impl From<ResolutionError> for LookupError {
    fn from(error: ResolutionError) -> Self {
        Self::Resolution(error)
    }
}

impl From<CoinNotFoundError> for LookupError {
    fn from(error: CoinNotFoundError) -> Self {
        Self::CoinNotFound(error)
    }
}

/// Resolves an alias to the payment details for the given coin.
///
/// This combines [`look_up_txt_records`] and
/// [`lookup_coin`][crate::select::lookup_coin]. Errors from either step are
/// passed on as they are; nothing is retried.
pub async fn resolve_coin<T>(
    resolver: &T,
    alias: &str,
    ticker: &str,
    config: &Config,
) -> Result<CoinResult, LookupError>
where
    T: LookupTxt + ?Sized,
{
    let txts = look_up_txt_records(resolver, alias, config).await?;

    let result = lookup_coin(&txts, ticker)?;

    Ok(result)
}
