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

//! Common parsing utilities.

/// Strips a run of whitespace at the start of the input.
///
/// Like the other `strip_` functions, returns `None` if there was nothing to
/// strip.
pub fn strip_wsp(input: &str) -> Option<&str> {
    input
        .strip_prefix(is_wsp)
        .map(|s| s.trim_start_matches(is_wsp))
}

pub fn rstrip_wsp(input: &str) -> Option<&str> {
    input
        .strip_suffix(is_wsp)
        .map(|s| s.trim_end_matches(is_wsp))
}

pub fn trim_wsp(input: &str) -> &str {
    input.trim_matches(is_wsp)
}

// TXT record values arrive from DNS as-is, so line breaks are treated like any
// other blank.
pub fn is_wsp(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_wsp_ok() {
        assert_eq!(strip_wsp(""), None);
        assert_eq!(strip_wsp("x"), None);
        assert_eq!(strip_wsp(" x"), Some("x"));
        assert_eq!(strip_wsp(" \t\r\n x "), Some("x "));
        assert_eq!(strip_wsp("  "), Some(""));
    }

    #[test]
    fn rstrip_wsp_ok() {
        assert_eq!(rstrip_wsp(""), None);
        assert_eq!(rstrip_wsp("x"), None);
        assert_eq!(rstrip_wsp(" x \r\n"), Some(" x"));
    }

    #[test]
    fn trim_wsp_ok() {
        assert_eq!(trim_wsp("\t oa1:xmr \n"), "oa1:xmr");
        assert_eq!(trim_wsp("   "), "");
    }
}
