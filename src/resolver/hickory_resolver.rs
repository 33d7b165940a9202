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

use super::{
    look_up_txt_records, Config, DohProvider, LookupTxt, ResolutionError, ResolutionErrorKind,
    Transport,
};
use hickory_resolver::{
    config::{NameServerConfig, Protocol, ResolverConfig, ResolverOpts},
    error::{ResolveError, ResolveErrorKind},
    proto::op::ResponseCode,
    system_conf, Name, TokioAsyncResolver,
};
use std::{
    future::Future,
    io::{self, ErrorKind},
    iter,
    pin::Pin,
};
use tracing::debug;

type TxtAnswer = Box<dyn Iterator<Item = io::Result<Vec<u8>>> + Send>;

impl LookupTxt for TokioAsyncResolver {
    type Answer = TxtAnswer;
    type Query<'a> = Pin<Box<dyn Future<Output = io::Result<Self::Answer>> + Send + 'a>>;

    fn lookup_txt(&self, domain: &str) -> Self::Query<'_> {
        let name = Name::from_ascii(domain);

        Box::pin(async move {
            let name = name.map_err(|_| ErrorKind::InvalidInput)?;

            let lookup = match self.txt_lookup(name).await {
                Ok(lookup) => lookup,
                Err(e) => return answer_from_error(e),
            };

            let txts = lookup.into_iter().map(|txt| Ok(txt.txt_data().concat()));

            let txts: TxtAnswer = Box::new(txts);

            Ok(txts)
        })
    }
}

fn answer_from_error(e: ResolveError) -> io::Result<TxtAnswer> {
    match e.kind() {
        // NOERROR without answers: the name exists, it just has no TXT records
        ResolveErrorKind::NoRecordsFound { response_code, .. }
            if *response_code != ResponseCode::NXDomain =>
        {
            let txts: TxtAnswer = Box::new(iter::empty());
            Ok(txts)
        }
        ResolveErrorKind::NoRecordsFound { .. } => Err(ErrorKind::NotFound.into()),
        ResolveErrorKind::Timeout => Err(ErrorKind::TimedOut.into()),
        _ => Err(io::Error::new(ErrorKind::Other, e)),
    }
}

/// Builds a Hickory resolver that sends its queries over the given transport.
///
/// `Transport::Udp` and `Transport::Tcp` use the name servers from the
/// platform configuration, restricted to the one protocol.
/// `Transport::Doh` ignores the platform configuration and uses the provider
/// in `config.doh_provider`.
///
/// # Errors
///
/// Fails if the platform configuration cannot be read, or if it has no name
/// servers usable with the requested protocol.
pub fn build_resolver(transport: Transport, config: &Config) -> io::Result<TokioAsyncResolver> {
    let (resolver_config, mut opts) = match transport {
        Transport::System => read_system_conf()?,
        Transport::Udp => restrict_system_conf(Protocol::Udp)?,
        Transport::Tcp => restrict_system_conf(Protocol::Tcp)?,
        Transport::Doh => {
            let resolver_config = match config.doh_provider {
                DohProvider::Cloudflare => ResolverConfig::cloudflare_https(),
                DohProvider::Google => ResolverConfig::google_https(),
                DohProvider::Quad9 => ResolverConfig::quad9_https(),
            };
            (resolver_config, ResolverOpts::default())
        }
    };

    apply_config(&mut opts, config);

    Ok(TokioAsyncResolver::tokio(resolver_config, opts))
}

// `lookup_timeout` bounds the whole lookup, so it is shared between attempts.
fn apply_config(opts: &mut ResolverOpts, config: &Config) {
    let attempts = config.attempts.max(1);

    opts.timeout = config.lookup_timeout / u32::try_from(attempts).unwrap_or(u32::MAX);
    opts.attempts = attempts;
}

fn read_system_conf() -> io::Result<(ResolverConfig, ResolverOpts)> {
    system_conf::read_system_conf().map_err(|e| io::Error::new(ErrorKind::Other, e.to_string()))
}

fn restrict_system_conf(protocol: Protocol) -> io::Result<(ResolverConfig, ResolverOpts)> {
    let (resolver_config, opts) = read_system_conf()?;

    let name_servers: Vec<NameServerConfig> = resolver_config
        .name_servers()
        .iter()
        .filter(|ns| ns.protocol == protocol)
        .cloned()
        .collect();

    if name_servers.is_empty() {
        return Err(io::Error::new(
            ErrorKind::Unsupported,
            format!("no {protocol:?} name servers configured"),
        ));
    }

    let resolver_config = ResolverConfig::from_parts(
        resolver_config.domain().cloned(),
        resolver_config.search().to_vec(),
        name_servers,
    );

    Ok((resolver_config, opts))
}

/// Looks up a domain’s TXT records over the given transport.
///
/// This builds a fresh resolver for the query; callers making many queries
/// should hold on to a resolver from [`build_resolver`] and use
/// [`look_up_txt_records`] instead.
pub async fn resolve_txt(
    domain: &str,
    transport: Transport,
    config: &Config,
) -> Result<Vec<String>, ResolutionError> {
    let resolver = build_resolver(transport, config).map_err(|e| {
        debug!(%transport, error = %e, "could not set up resolver");
        ResolutionError::new(domain, ResolutionErrorKind::TransportFailure)
    })?;

    look_up_txt_records(&resolver, domain, config).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use hickory_resolver::proto::{op::Query, rr::RecordType};
    use std::time::Duration;

    fn no_records_found(response_code: ResponseCode) -> ResolveError {
        let name = Name::from_ascii("donate.example.com.").unwrap();

        ResolveErrorKind::NoRecordsFound {
            query: Box::new(Query::query(name, RecordType::TXT)),
            soa: None,
            negative_ttl: None,
            response_code,
            trusted: true,
        }
        .into()
    }

    #[test]
    fn answer_from_error_no_txt_records() {
        let txts = answer_from_error(no_records_found(ResponseCode::NoError)).unwrap();

        assert_eq!(txts.count(), 0);
    }

    #[test]
    fn answer_from_error_nxdomain() {
        let e = answer_from_error(no_records_found(ResponseCode::NXDomain)).err().unwrap();

        assert_eq!(e.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn answer_from_error_timeout() {
        let e = answer_from_error(ResolveErrorKind::Timeout.into()).err().unwrap();

        assert_eq!(e.kind(), ErrorKind::TimedOut);
    }

    #[test]
    fn answer_from_error_other() {
        let e = answer_from_error(ResolveErrorKind::Message("no connections available").into())
            .err()
            .unwrap();

        assert_eq!(e.kind(), ErrorKind::Other);
    }

    #[test]
    fn apply_config_splits_timeout_between_attempts() {
        let mut opts = ResolverOpts::default();

        apply_config(&mut opts, &Config::default());

        assert_eq!(opts.timeout, Duration::from_secs(5));
        assert_eq!(opts.attempts, 2);

        let config = Config {
            attempts: 0,
            ..Default::default()
        };
        apply_config(&mut opts, &config);

        assert_eq!(opts.timeout, Duration::from_secs(10));
        assert_eq!(opts.attempts, 1);
    }
}
