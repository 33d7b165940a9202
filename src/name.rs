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

//! OpenAlias aliases and the DNS names they are published under.

use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    hash::{Hash, Hasher},
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseAliasError;

impl Display for ParseAliasError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "could not parse alias")
    }
}

impl Error for ParseAliasError {}

/// An OpenAlias alias.
///
/// An alias is either a plain domain name (`example.com`) or an email-style
/// address (`donate@example.com`). The email-style form is a shorthand for the
/// domain obtained by replacing the `@` with a dot (`donate.example.com`).
#[derive(Clone, Eq)]
pub struct Alias(Box<str>);

impl Alias {
    /// Creates a new alias from the given string.
    ///
    /// Surrounding whitespace and a single trailing dot are removed, then the
    /// resulting domain name is validated. Equivalence comparison is
    /// case-insensitive.
    pub fn new(s: &str) -> Result<Self, ParseAliasError> {
        let s = s.trim();
        let s = s.strip_suffix('.').unwrap_or(s);

        let domain = match s.rsplit_once('@') {
            Some((user, domain)) => {
                if user.is_empty() || user.contains('@') {
                    return Err(ParseAliasError);
                }
                format!("{user}.{domain}")
            }
            None => s.into(),
        };

        if !is_valid_dns_name(&domain) {
            return Err(ParseAliasError);
        }

        // length limits apply to the A-label form that goes on the wire
        let ascii = idna::domain_to_ascii(&domain).map_err(|_| ParseAliasError)?;
        if !has_valid_domain_len(&ascii) || !ascii.split('.').all(has_valid_label_len) {
            return Err(ParseAliasError);
        }

        Ok(Self(domain.into()))
    }

    /// Returns the domain in A-label (ASCII) form, suitable for a DNS query.
    pub fn to_ascii(&self) -> String {
        // validated in `Alias::new`
        idna::domain_to_ascii(&self.0).unwrap_or_else(|_| self.0.to_ascii_lowercase())
    }
}

/// Converts an alias to the A-label domain name whose TXT records hold the
/// alias’s OpenAlias records.
pub fn query_name(alias: &str) -> Result<String, ParseAliasError> {
    Alias::new(alias).map(|a| a.to_ascii())
}

impl Display for Alias {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::Debug for Alias {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", &self.0)
    }
}

impl AsRef<str> for Alias {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq for Alias {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl Hash for Alias {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_ascii_lowercase().hash(state);
    }
}

fn is_valid_dns_name(s: &str) -> bool {
    fn is_tld(s: &str) -> bool {
        is_label(s) && !s.chars().all(|c: char| c.is_ascii_digit())
    }

    if !has_valid_domain_len(s) {
        return false;
    }

    let mut labels = s.split('.').rev().peekable();

    if matches!(labels.next(), Some(l) if !is_tld(l)) {
        return false;
    }
    if labels.peek().is_none() {
        return false;
    }

    labels.all(is_label)
}

// Underscores are common in service labels, non-ASCII is handled by IDNA.
fn is_label(s: &str) -> bool {
    has_valid_label_len(s)
        && !s.starts_with('-')
        && !s.ends_with('-')
        && s.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_') || !c.is_ascii())
}

const MAX_DOMAIN_LENGTH: usize = 253;

fn has_valid_domain_len(s: &str) -> bool {
    matches!(s.len(), 1..=MAX_DOMAIN_LENGTH)
}

fn has_valid_label_len(s: &str) -> bool {
    matches!(s.len(), 1..=63)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alias_ok() {
        assert!(Alias::new("privex.io").is_ok());
        assert!(Alias::new("getmonero.org.").is_ok());
        assert!(Alias::new(" donate@getmonero.org ").is_ok());
        assert!(Alias::new("☕.example.中国").is_ok());
        assert!(Alias::new("_oa.example.com").is_ok());

        assert!(Alias::new("").is_err());
        assert!(Alias::new("example").is_err());
        assert!(Alias::new("example..com").is_err());
        assert!(Alias::new("-bad.example.com").is_err());
        assert!(Alias::new("example.123").is_err());
        assert!(Alias::new("@example.com").is_err());
        assert!(Alias::new("a@b@example.com").is_err());
        assert!(Alias::new("semi;colon.example.com").is_err());
    }

    #[test]
    fn alias_eq_ignores_case() {
        assert_eq!(
            Alias::new("Donate@GetMonero.org").unwrap(),
            Alias::new("donate.getmonero.org").unwrap()
        );
    }

    #[test]
    fn query_name_ok() {
        assert_eq!(query_name("donate@getmonero.org").unwrap(), "donate.getmonero.org");
        assert_eq!(query_name("Privex.IO.").unwrap(), "privex.io");
        assert_eq!(query_name("☕.example.中国").unwrap(), "xn--53h.example.xn--fiqs8s");
        assert_eq!(query_name("no spaces.example.com"), Err(ParseAliasError));
    }

    #[test]
    fn alias_a_label_too_long() {
        // 63 octets as UTF-8, longer once encoded as an A-label
        let label = format!("{}ü", "a".repeat(61));
        assert_eq!(label.len(), 63);

        assert_eq!(Alias::new(&format!("{label}.example.com")), Err(ParseAliasError));
        assert!(Alias::new(&format!("{}ü.example.com", "a".repeat(50))).is_ok());
    }
}
