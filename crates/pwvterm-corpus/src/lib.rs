//! In-memory corpus of extracted blog-post entities.
//!
//! The corpus is produced offline (an extraction pipeline writes one JSON
//! record per post, merged into a single document) and loaded whole at
//! session start. Everything here is read-only after load:
//! - `posts` keyed by slug
//! - denormalized per-name aggregates for companies/investors/people/topics
//! - a flat, ordered quote list (quotes need a stable ordinal position)
//!
//! The loader performs no validation beyond shape: missing optional fields
//! default, unknown fact categories are carried through verbatim.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

pub mod portfolio;

pub use portfolio::{FundBucket, PortfolioBook, PortfolioCompany};

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("failed to read corpus file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed corpus JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// One corpus document. Immutable after load, keyed by `slug`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub companies: Vec<String>,
    #[serde(default)]
    pub investors: Vec<String>,
    #[serde(default)]
    pub people: Vec<PersonRef>,
    #[serde(default)]
    pub facts: Vec<Fact>,
    #[serde(default)]
    pub figures: Vec<Figure>,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub quotes: Vec<PostQuote>,
    #[serde(default)]
    pub pub_date: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PersonRef {
    pub name: String,
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Fact {
    pub text: String,
    #[serde(default)]
    pub category: FactCategory,
    #[serde(default)]
    pub date: Option<String>,
}

/// Fact categories emitted by the extraction pipeline. The pipeline is
/// LLM-backed and may drift, so unknown strings are preserved rather than
/// rejected at load time.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum FactCategory {
    Insight,
    Trend,
    Philosophy,
    Announcement,
    Milestone,
    Funding,
    Launch,
    Partnership,
    Other(String),
}

impl Default for FactCategory {
    fn default() -> Self {
        FactCategory::Other(String::new())
    }
}

impl From<String> for FactCategory {
    fn from(s: String) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "insight" => FactCategory::Insight,
            "trend" => FactCategory::Trend,
            "philosophy" => FactCategory::Philosophy,
            "announcement" => FactCategory::Announcement,
            "milestone" => FactCategory::Milestone,
            "funding" => FactCategory::Funding,
            "launch" => FactCategory::Launch,
            "partnership" => FactCategory::Partnership,
            _ => FactCategory::Other(s),
        }
    }
}

impl FactCategory {
    pub fn as_str(&self) -> &str {
        match self {
            FactCategory::Insight => "insight",
            FactCategory::Trend => "trend",
            FactCategory::Philosophy => "philosophy",
            FactCategory::Announcement => "announcement",
            FactCategory::Milestone => "milestone",
            FactCategory::Funding => "funding",
            FactCategory::Launch => "launch",
            FactCategory::Partnership => "partnership",
            FactCategory::Other(s) => s.as_str(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Figure {
    #[serde(default, deserialize_with = "de_stringish")]
    pub value: String,
    #[serde(default)]
    pub context: String,
    #[serde(default)]
    pub unit: String,
}

/// A quote as nested inside a post record.
#[derive(Debug, Clone, Deserialize)]
pub struct PostQuote {
    pub quote: String,
    #[serde(default)]
    pub speaker: String,
    #[serde(default)]
    pub context: Option<String>,
}

/// A quote in the flat corpus-level sequence. The position in that sequence
/// is stable and backs the display identifier `"<postSlug>-<index>"`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub quote: String,
    #[serde(default)]
    pub speaker: String,
    #[serde(default)]
    pub context: Option<String>,
    #[serde(default)]
    pub post_slug: String,
    #[serde(default)]
    pub post_title: String,
    #[serde(default)]
    pub pub_date: Option<String>,
}

impl Quote {
    /// Deterministic display identifier for a quote at a given corpus
    /// position.
    pub fn display_id(&self, index: usize) -> String {
        format!("{}-{}", self.post_slug, index)
    }
}

/// Denormalized per-name record: which posts mention the entity, how often.
///
/// `mentions` and `posts.len()` are produced by separate offline
/// aggregation passes and may diverge. `posts.len()` is authoritative for
/// displayed counts; `mentions` only participates in sort order.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntityAggregate {
    #[serde(default)]
    pub posts: Vec<String>,
    #[serde(default)]
    pub mentions: u32,
    #[serde(default)]
    pub role: Option<String>,
}

impl EntityAggregate {
    pub fn display_count(&self) -> usize {
        self.posts.len()
    }

    pub fn sort_weight(&self) -> u32 {
        if self.mentions > 0 {
            self.mentions
        } else {
            self.posts.len() as u32
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntityIndex {
    #[serde(default)]
    pub companies: BTreeMap<String, EntityAggregate>,
    #[serde(default)]
    pub investors: BTreeMap<String, EntityAggregate>,
    #[serde(default)]
    pub people: BTreeMap<String, EntityAggregate>,
    #[serde(default)]
    pub topics: BTreeMap<String, EntityAggregate>,
    #[serde(default)]
    pub quotes: Vec<Quote>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorpusMetadata {
    #[serde(default)]
    pub extracted_at: Option<String>,
    #[serde(default)]
    pub total_posts: Option<usize>,
    #[serde(default)]
    pub date_range: Option<DateRange>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DateRange {
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
}

/// The whole consumed corpus document. Keys in `posts` are slugs; entity
/// aggregate keys are canonical display names (lookups elsewhere are
/// case-insensitive and resolve to these keys).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Corpus {
    #[serde(default)]
    pub posts: BTreeMap<String, Post>,
    #[serde(default)]
    pub entities: EntityIndex,
    #[serde(default)]
    pub metadata: CorpusMetadata,
}

impl Corpus {
    pub fn from_json_str(text: &str) -> Result<Self, CorpusError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CorpusError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn post(&self, slug: &str) -> Option<&Post> {
        self.posts.get(slug)
    }

    pub fn lookup_company(&self, name: &str) -> Option<(&str, &EntityAggregate)> {
        lookup_in(&self.entities.companies, name)
    }

    pub fn lookup_investor(&self, name: &str) -> Option<(&str, &EntityAggregate)> {
        lookup_in(&self.entities.investors, name)
    }

    pub fn lookup_person(&self, name: &str) -> Option<(&str, &EntityAggregate)> {
        lookup_in(&self.entities.people, name)
    }

    pub fn lookup_topic(&self, name: &str) -> Option<(&str, &EntityAggregate)> {
        lookup_in(&self.entities.topics, name)
    }

    pub fn fact_count(&self) -> usize {
        self.posts.values().map(|p| p.facts.len()).sum()
    }

    pub fn figure_count(&self) -> usize {
        self.posts.values().map(|p| p.figures.len()).sum()
    }
}

/// Case-insensitive name lookup resolving to the canonical map key. The
/// corpora are small (hundreds of names), so a scan beats maintaining a
/// folded-key side index.
fn lookup_in<'a>(
    map: &'a BTreeMap<String, EntityAggregate>,
    name: &str,
) -> Option<(&'a str, &'a EntityAggregate)> {
    let want = name.trim();
    map.iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(want))
        .map(|(key, agg)| (key.as_str(), agg))
}

fn de_stringish<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    // Extraction output is inconsistent about figure values: sometimes a
    // string ("2.5"), sometimes a bare number. Accept both.
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "posts": {
            "acme-raises": {
                "slug": "acme-raises",
                "title": "Acme raises a Series A",
                "companies": ["Acme"],
                "people": [{"name": "Jane Doe", "role": "CEO"}],
                "facts": [{"text": "Acme raised $10M", "category": "funding", "date": "2024-01-15"}],
                "figures": [{"value": 10, "context": "Series A round", "unit": "$M"}],
                "topics": ["fundraising"],
                "quotes": [{"quote": "We build tools.", "speaker": "Jane Doe"}],
                "pubDate": "2024-01-15",
                "tags": ["news"]
            }
        },
        "entities": {
            "companies": {"Acme": {"posts": ["acme-raises"], "mentions": 1}},
            "people": {"Jane Doe": {"posts": ["acme-raises"], "mentions": 1, "role": "CEO"}},
            "topics": {"fundraising": {"posts": ["acme-raises"], "mentions": 1}},
            "quotes": [{"quote": "We build tools.", "speaker": "Jane Doe", "postSlug": "acme-raises", "postTitle": "Acme raises a Series A"}]
        },
        "metadata": {"extractedAt": "2024-02-01", "totalPosts": 1}
    }"#;

    #[test]
    fn parses_the_consumed_contract() {
        let corpus = Corpus::from_json_str(SAMPLE).unwrap();
        assert_eq!(corpus.posts.len(), 1);

        let post = corpus.post("acme-raises").unwrap();
        assert_eq!(post.title, "Acme raises a Series A");
        assert_eq!(post.people[0].role.as_deref(), Some("CEO"));
        assert_eq!(post.facts[0].category, FactCategory::Funding);
        // Numeric figure values are coerced to strings.
        assert_eq!(post.figures[0].value, "10");

        assert_eq!(corpus.entities.quotes.len(), 1);
        assert_eq!(corpus.entities.quotes[0].display_id(0), "acme-raises-0");
        assert_eq!(corpus.metadata.total_posts, Some(1));
    }

    #[test]
    fn lookup_is_case_insensitive_and_returns_canonical_key() {
        let corpus = Corpus::from_json_str(SAMPLE).unwrap();
        for probe in ["acme", "ACME", "Acme", "  aCmE  "] {
            let (canonical, agg) = corpus.lookup_company(probe).unwrap();
            assert_eq!(canonical, "Acme");
            assert_eq!(agg.display_count(), 1);
        }
        assert!(corpus.lookup_company("Bcme").is_none());
    }

    #[test]
    fn unknown_fact_category_is_preserved() {
        let fact: Fact =
            serde_json::from_str(r#"{"text": "x", "category": "speculation"}"#).unwrap();
        assert_eq!(fact.category, FactCategory::Other("speculation".into()));
        assert_eq!(fact.category.as_str(), "speculation");
    }

    #[test]
    fn missing_optional_fields_default() {
        let corpus = Corpus::from_json_str(r#"{"posts": {}, "entities": {}}"#).unwrap();
        assert!(corpus.posts.is_empty());
        assert!(corpus.entities.quotes.is_empty());
        assert!(corpus.metadata.extracted_at.is_none());
    }

    #[test]
    fn sort_weight_prefers_mentions_when_present() {
        let drifted = EntityAggregate {
            posts: vec!["a".into(), "b".into()],
            mentions: 5,
            role: None,
        };
        assert_eq!(drifted.sort_weight(), 5);
        assert_eq!(drifted.display_count(), 2);

        let no_mentions = EntityAggregate {
            posts: vec!["a".into()],
            mentions: 0,
            role: None,
        };
        assert_eq!(no_mentions.sort_weight(), 1);
    }
}
