pub mod common;

use common::{RECORD_1, RECORD_2, SPF_RECORD};
use openalias::{
    lookup_coin, parse_record, parse_records, CoinNotFoundError, CoinResult,
    MalformedRecordErrorKind,
};
use std::str::FromStr;

#[test]
fn parse_ltc_record() {
    let c = parse_record(RECORD_1).unwrap();

    assert_eq!(c.coin, "ltc");
    assert_eq!(&*c.recipient_address, "MDRRb9pdLs6nXQ91VNfJEN68ohHSwWvscv");
    assert_eq!(&*c.recipient_name, "Privex Donations");
}

#[test]
fn parse_bch_record_with_colon_in_address() {
    let c = parse_record(RECORD_2).unwrap();

    assert_eq!(c.coin, "bch");
    assert_eq!(
        &*c.recipient_address,
        "bitcoincash:qr6ss5pnnx9wad32j7lhulwp6k6we60gyuzsqc6pyj"
    );
    assert_eq!(&*c.recipient_name, "Privex Donations");
}

#[test]
fn parse_multiple_records() {
    let cs = parse_records([RECORD_1, RECORD_2]);

    assert_eq!(cs.len(), 2);
    assert_eq!(cs[0].coin, "ltc");
    assert_eq!(&*cs[0].recipient_address, "MDRRb9pdLs6nXQ91VNfJEN68ohHSwWvscv");
    assert_eq!(&*cs[0].recipient_name, "Privex Donations");
    assert_eq!(cs[1].coin, "bch");
    assert_eq!(
        &*cs[1].recipient_address,
        "bitcoincash:qr6ss5pnnx9wad32j7lhulwp6k6we60gyuzsqc6pyj"
    );
    assert_eq!(&*cs[1].recipient_name, "Privex Donations");
}

#[test]
fn parse_record_is_repeatable() {
    let a = parse_record(RECORD_2).unwrap();
    let b = CoinResult::from_str(RECORD_2).unwrap();

    assert_eq!(a, b);
}

#[test]
fn malformed_records_rejected_alone_but_skipped_in_batch() {
    let no_prefix = "ltc recipient_address=MDRRb9pdLs6nXQ91VNfJEN68ohHSwWvscv;";
    let no_address = "oa1:ltc recipient_name=Privex Donations;";

    assert_eq!(
        parse_record(no_prefix).unwrap_err().kind,
        MalformedRecordErrorKind::MissingPrefix
    );
    assert_eq!(
        parse_record(no_address).unwrap_err().kind,
        MalformedRecordErrorKind::MissingAddress
    );

    let cs = parse_records([no_prefix, RECORD_1, no_address, SPF_RECORD, RECORD_2]);

    assert_eq!(cs.len(), 2);
    assert_eq!(cs[0].coin, "ltc");
    assert_eq!(cs[1].coin, "bch");

    let c = lookup_coin([no_prefix, no_address, RECORD_1], "ltc").unwrap();
    assert_eq!(c, parse_record(RECORD_1).unwrap());
}

#[test]
fn lookup_coin_among_unrelated_records() {
    let records = vec![RECORD_1.to_owned(), RECORD_2.to_owned(), SPF_RECORD.to_owned()];

    let c = lookup_coin(&records, "bch").unwrap();

    assert_eq!(c.coin, "bch");
    assert_eq!(
        &*c.recipient_address,
        "bitcoincash:qr6ss5pnnx9wad32j7lhulwp6k6we60gyuzsqc6pyj"
    );
}

#[test]
fn lookup_coin_not_found() {
    let e = lookup_coin([RECORD_1], "xmr").unwrap_err();

    assert_eq!(e, CoinNotFoundError { ticker: "xmr".into() });
    assert_eq!(e.to_string(), "no OpenAlias record found for coin \"xmr\"");
}

#[test]
fn lookup_coin_with_unrecognized_fields() {
    let records = [
        SPF_RECORD,
        "oa1:xmr recipient_address=46BeWrHpwXmHDpDEUmZBWZfoQpdc6HaERCNmx1pEYL2rAcuwufPN9rXHHtyUA4QVy66qeFQkn6sfK8aHYjA3jk3o1Bv16em;; x-custom=1; 2fa=yes; flag; note=1; note=2;",
    ];

    let c = lookup_coin(records, "xmr").unwrap();

    assert_eq!(
        &*c.recipient_address,
        "46BeWrHpwXmHDpDEUmZBWZfoQpdc6HaERCNmx1pEYL2rAcuwufPN9rXHHtyUA4QVy66qeFQkn6sfK8aHYjA3jk3o1Bv16em"
    );
    assert_eq!(&*c.recipient_name, "");
}
