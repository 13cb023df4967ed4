use proptest::prelude::*;
use pwvterm_corpus::{Corpus, EntityAggregate};

fn corpus_with_company(name: &str) -> Corpus {
    let mut corpus = Corpus::default();
    corpus.entities.companies.insert(
        name.to_string(),
        EntityAggregate {
            posts: vec!["p1".to_string()],
            mentions: 1,
            role: None,
        },
    );
    corpus
}

// Printable ASCII names without leading/trailing whitespace, since lookup
// trims its probe before comparing.
fn name_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9 .&-]{0,30}[A-Za-z0-9]".prop_map(|s| s.trim().to_string())
}

proptest! {
    #[test]
    fn lookup_is_invariant_under_ascii_case(name in name_strategy()) {
        let corpus = corpus_with_company(&name);

        let exact = corpus.lookup_company(&name).map(|(k, _)| k.to_string());
        let upper = corpus
            .lookup_company(&name.to_ascii_uppercase())
            .map(|(k, _)| k.to_string());
        let lower = corpus
            .lookup_company(&name.to_ascii_lowercase())
            .map(|(k, _)| k.to_string());

        prop_assert_eq!(exact.as_deref(), Some(name.as_str()));
        prop_assert_eq!(upper, exact.clone());
        prop_assert_eq!(lower, exact);
    }

    #[test]
    fn lookup_trims_surrounding_whitespace(name in name_strategy()) {
        let corpus = corpus_with_company(&name);
        let padded = format!("  {name}\t");
        let hit = corpus.lookup_company(&padded).map(|(k, _)| k.to_string());
        prop_assert_eq!(hit.as_deref(), Some(name.as_str()));
    }
}
