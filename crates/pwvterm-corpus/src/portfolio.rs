//! Static portfolio-company listing.
//!
//! Distinct from the extracted entity aggregates: this comes from a
//! hand-maintained JSON file grouped into four fixed fund buckets. A
//! portfolio company may or may not also appear as an entity aggregate;
//! that join is by case-insensitive name and absence is normal.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::CorpusError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FundBucket {
    Representative,
    FundOne,
    RollingFund,
    Angel,
}

impl FundBucket {
    pub const ALL: [FundBucket; 4] = [
        FundBucket::Representative,
        FundBucket::FundOne,
        FundBucket::RollingFund,
        FundBucket::Angel,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FundBucket::Representative => "Representative",
            FundBucket::FundOne => "Fund I",
            FundBucket::RollingFund => "Rolling Fund",
            FundBucket::Angel => "Angel",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioCompany {
    pub name: String,
    #[serde(default)]
    pub url: String,
    pub slug: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub formerly: Option<String>,
    #[serde(default)]
    pub acquired_by: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioBook {
    #[serde(default)]
    pub representative: Vec<PortfolioCompany>,
    #[serde(default)]
    pub fund_one: Vec<PortfolioCompany>,
    #[serde(default)]
    pub rolling_fund: Vec<PortfolioCompany>,
    #[serde(default)]
    pub angel: Vec<PortfolioCompany>,
}

impl PortfolioBook {
    pub fn from_json_str(text: &str) -> Result<Self, CorpusError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CorpusError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    fn bucket(&self, bucket: FundBucket) -> &[PortfolioCompany] {
        match bucket {
            FundBucket::Representative => &self.representative,
            FundBucket::FundOne => &self.fund_one,
            FundBucket::RollingFund => &self.rolling_fund,
            FundBucket::Angel => &self.angel,
        }
    }

    /// All companies in bucket order, each with its bucket attached.
    pub fn iter(&self) -> impl Iterator<Item = (FundBucket, &PortfolioCompany)> {
        FundBucket::ALL
            .into_iter()
            .flat_map(|b| self.bucket(b).iter().map(move |c| (b, c)))
    }

    pub fn len(&self) -> usize {
        FundBucket::ALL.into_iter().map(|b| self.bucket(b).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn find_by_slug(&self, slug: &str) -> Option<(FundBucket, &PortfolioCompany)> {
        self.iter().find(|(_, c)| c.slug == slug)
    }

    pub fn find_by_name(&self, name: &str) -> Option<(FundBucket, &PortfolioCompany)> {
        let want = name.trim();
        self.iter().find(|(_, c)| c.name.eq_ignore_ascii_case(want))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "representative": [
            {"name": "Acme", "url": "https://acme.example", "slug": "acme", "tags": ["devtools"]}
        ],
        "fundOne": [
            {"name": "Globex", "url": "https://globex.example", "slug": "globex",
             "formerly": "Globex Labs", "acquiredBy": "Initech"}
        ],
        "rollingFund": [],
        "angel": [
            {"name": "Umbra", "url": "https://umbra.example", "slug": "umbra"}
        ]
    }"#;

    #[test]
    fn parses_buckets_and_iterates_in_bucket_order() {
        let book = PortfolioBook::from_json_str(SAMPLE).unwrap();
        assert_eq!(book.len(), 3);

        let order: Vec<_> = book.iter().map(|(b, c)| (b, c.slug.as_str())).collect();
        assert_eq!(
            order,
            vec![
                (FundBucket::Representative, "acme"),
                (FundBucket::FundOne, "globex"),
                (FundBucket::Angel, "umbra"),
            ]
        );
    }

    #[test]
    fn finds_by_slug_and_case_insensitive_name() {
        let book = PortfolioBook::from_json_str(SAMPLE).unwrap();
        let (bucket, globex) = book.find_by_slug("globex").unwrap();
        assert_eq!(bucket, FundBucket::FundOne);
        assert_eq!(globex.formerly.as_deref(), Some("Globex Labs"));
        assert_eq!(globex.acquired_by.as_deref(), Some("Initech"));

        assert!(book.find_by_name("UMBRA").is_some());
        assert!(book.find_by_name("nope").is_none());
    }

    #[test]
    fn empty_listing_is_fine() {
        let book = PortfolioBook::from_json_str("{}").unwrap();
        assert!(book.is_empty());
    }
}
