use std::{future::Future, io, pin::Pin, sync::Arc};
use openalias::LookupTxt;

pub const RECORD_1: &str =
    "oa1:ltc recipient_address=MDRRb9pdLs6nXQ91VNfJEN68ohHSwWvscv; recipient_name=Privex Donations;";
pub const RECORD_2: &str = "oa1:bch recipient_address=bitcoincash:qr6ss5pnnx9wad32j7lhulwp6k6we60gyuzsqc6pyj; recipient_name=Privex Donations;";
pub const SPF_RECORD: &str = "v=spf1 include:_spf.example.com ~all";

pub type LookupOutput = Vec<io::Result<Vec<u8>>>;
pub type LookupFuture<'a> = Pin<Box<dyn Future<Output = io::Result<LookupOutput>> + Send + 'a>>;

#[derive(Clone)]
pub struct MockLookup(Arc<dyn Fn(&str) -> LookupFuture<'_> + Send + Sync>);

impl MockLookup {
    pub fn new(f: impl Fn(&str) -> LookupFuture<'_> + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }
}

impl LookupTxt for MockLookup {
    type Answer = LookupOutput;
    type Query<'a> = Pin<Box<dyn Future<Output = io::Result<Self::Answer>> + Send + 'a>>;

    fn lookup_txt(&self, domain: &str) -> Self::Query<'_> {
        let domain = domain.to_owned();

        Box::pin(async move { self.0(&domain).await })
    }
}

pub fn txt_answer<I>(records: I) -> LookupOutput
where
    I: IntoIterator,
    I::Item: Into<Vec<u8>>,
{
    records.into_iter().map(|r| Ok(r.into())).collect()
}
