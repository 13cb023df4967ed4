//! One command object per verb the terminal understands.
//!
//! Registration order below is load-bearing: the dispatch engine scans in
//! order and the first `matches` wins, so any command whose alias is a
//! textual prefix of another's must come after the more specific one
//! ("fortune | cowsay" before "fortune" and "cowsay").

mod fortune;
mod listing;
mod misc;
mod portfolio;
mod posts;
mod quotes;

pub use fortune::{CowsayCommand, FortuneCommand, FortuneCowsayCommand};
pub use listing::{EntityKind, EntityListCommand};
pub use misc::{SocialsCommand, StatsCommand, UptimeCommand};
pub use portfolio::PortfolioCommand;
pub use posts::{PostsCommand, SearchCommand};
pub use quotes::{FactsCommand, QuotesCommand};

use crate::command::{Command, CommandRegistry};

pub fn default_registry() -> CommandRegistry {
    let commands: Vec<Box<dyn Command>> = vec![
        // Most specific first: the piped form shares prefixes with both
        // `fortune` and `cowsay`.
        Box::new(FortuneCowsayCommand),
        Box::new(FortuneCommand),
        Box::new(CowsayCommand),
        Box::new(EntityListCommand::new(EntityKind::Company)),
        Box::new(EntityListCommand::new(EntityKind::Investor)),
        Box::new(EntityListCommand::new(EntityKind::Person)),
        Box::new(EntityListCommand::new(EntityKind::Topic)),
        Box::new(PostsCommand),
        Box::new(QuotesCommand),
        Box::new(FactsCommand),
        Box::new(PortfolioCommand),
        Box::new(SearchCommand),
        Box::new(StatsCommand),
        Box::new(SocialsCommand),
        Box::new(UptimeCommand::new()),
    ];
    CommandRegistry::new(commands)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_registry_passes_the_reachability_assertion() {
        let registry = default_registry();
        assert!(registry.len() >= 15);
    }

    #[test]
    fn piped_fortune_wins_over_bare_fortune() {
        let registry = default_registry();
        assert_eq!(
            registry.find("fortune | cowsay").unwrap().name(),
            "fortune | cowsay"
        );
        assert_eq!(registry.find("fortune").unwrap().name(), "fortune");
        assert_eq!(registry.find("cowsay hello").unwrap().name(), "cowsay");
    }
}
