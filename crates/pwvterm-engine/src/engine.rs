//! The dispatch engine: one fully synchronous turn per input line.
//!
//! Grammar precedence per turn:
//! 1. empty input
//! 2. bare integers (numeric selection against the current list)
//! 3. the ordered command registry, first match wins
//! 4. the legacy inline verbs (help/showcase/timeline/connections)
//! 5. unrecognized-command error
//!
//! The engine owns the only mutable session state: the current selectable
//! list, replaced wholesale whenever a result publishes one. Nothing here
//! returns `Err` or panics on user input — every turn produces exactly one
//! `CommandResult`.

use pwvterm_corpus::{Corpus, PortfolioBook};

use crate::command::{CommandContext, CommandRegistry};
use crate::commands::{default_registry, EntityKind};
use crate::legacy;
use crate::render::{entity_profile, portfolio_profile, post_label};
use crate::result::{CommandResult, SelectableItem, SelectableKind};
use crate::rng::XorShift64;

pub struct QueryEngine<'a> {
    corpus: &'a Corpus,
    portfolio: &'a PortfolioBook,
    registry: CommandRegistry,
    width: usize,
    rng: XorShift64,
    current_list: Vec<SelectableItem>,
}

impl<'a> QueryEngine<'a> {
    pub fn new(corpus: &'a Corpus, portfolio: &'a PortfolioBook) -> Self {
        Self::with_registry(corpus, portfolio, default_registry())
    }

    pub fn with_registry(
        corpus: &'a Corpus,
        portfolio: &'a PortfolioBook,
        registry: CommandRegistry,
    ) -> Self {
        Self {
            corpus,
            portfolio,
            registry,
            width: 80,
            rng: XorShift64::from_clock(),
            current_list: Vec::new(),
        }
    }

    /// Fixed seed for deterministic random picks (tests, scripted demos).
    pub fn seed_rng(&mut self, seed: u64) {
        self.rng = XorShift64::new(seed);
    }

    pub fn set_width(&mut self, width: usize) {
        self.width = width;
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn corpus(&self) -> &Corpus {
        self.corpus
    }

    pub fn current_list(&self) -> &[SelectableItem] {
        &self.current_list
    }

    pub fn execute_command(&mut self, input: &str) -> CommandResult {
        let original = input.trim();
        if original.is_empty() {
            return CommandResult::empty();
        }
        let lower = original.to_lowercase();

        // Numeric selection outranks every registered command. No verb is
        // purely numeric, by design, but the precedence must not depend on
        // that staying true.
        if lower.bytes().all(|b| b.is_ascii_digit()) {
            let result = self.select_numeric(&lower);
            return self.commit(result);
        }

        if let Some(result) = self.dispatch_registered(original, &lower) {
            return self.commit(result);
        }

        if let Some(result) = self.dispatch_legacy(original, &lower) {
            return self.commit(result);
        }

        CommandResult::error(format!(
            "command not found: {original} — type `help` for the list"
        ))
    }

    /// A result carrying selectable items replaces the session list; one
    /// that doesn't leaves it alone.
    fn commit(&mut self, result: CommandResult) -> CommandResult {
        if let Some(items) = &result.selectable {
            self.current_list = items.clone();
        }
        result
    }

    fn dispatch_registered(&mut self, original: &str, lower: &str) -> Option<CommandResult> {
        let command = self.registry.find(lower)?;
        let args: Vec<&str> = original.split_whitespace().skip(1).collect();
        let mut ctx = CommandContext {
            corpus: self.corpus,
            portfolio: self.portfolio,
            width: self.width,
            rng: &mut self.rng,
        };
        Some(command.execute(&mut ctx, original, &args))
    }

    fn dispatch_legacy(&mut self, original: &str, lower: &str) -> Option<CommandResult> {
        let rest = original
            .split_once(char::is_whitespace)
            .map(|(_, r)| r)
            .unwrap_or("");

        if lower == "help" || lower == "?" {
            return Some(legacy::help(&self.registry, self.width));
        }
        if lower == "showcase" || lower.starts_with("showcase ") {
            let mut ctx = CommandContext {
                corpus: self.corpus,
                portfolio: self.portfolio,
                width: self.width,
                rng: &mut self.rng,
            };
            return Some(legacy::showcase(&mut ctx, rest));
        }
        if lower == "timeline" || lower.starts_with("timeline ") {
            return Some(legacy::timeline(self.corpus, self.width, rest));
        }
        if lower == "connections"
            || lower.starts_with("connections ")
            || lower == "connect"
            || lower.starts_with("connect ")
        {
            return Some(legacy::connections(self.corpus, self.width, rest));
        }
        None
    }

    fn select_numeric(&mut self, digits: &str) -> CommandResult {
        if self.current_list.is_empty() {
            return CommandResult::error(
                "no active list — run `companies`, `posts`, or `portfolio` first",
            );
        }

        let len = self.current_list.len();
        // Absurdly long digit strings fail to parse; treat them the same
        // as any other out-of-range pick.
        let n = digits.parse::<usize>().unwrap_or(usize::MAX);
        if n == 0 || n > len {
            return CommandResult::error(format!(
                "selection out of range — pick a number between 1 and {len}"
            ));
        }

        let item = self.current_list[n - 1].clone();
        match item.kind {
            SelectableKind::Company(name) => self.entity_selection(EntityKind::Company, &name),
            SelectableKind::Investor(name) => self.entity_selection(EntityKind::Investor, &name),
            SelectableKind::Person(name) => self.entity_selection(EntityKind::Person, &name),
            SelectableKind::Topic(name) => self.entity_selection(EntityKind::Topic, &name),
            SelectableKind::Post(slug) => {
                let label = post_label(self.corpus, &slug);
                CommandResult::show_post(&slug, format!("Opening \"{label}\"…"))
            }
            SelectableKind::PortfolioCompany(slug) => match self.portfolio.find_by_slug(&slug) {
                Some((bucket, company)) => {
                    portfolio_profile(self.corpus, bucket, company, self.width)
                }
                None => CommandResult::error(format!(
                    "portfolio company \"{slug}\" is gone from the listing"
                )),
            },
            other => CommandResult::error(format!(
                "cannot open items of type \"{}\" yet",
                other.kind_name()
            )),
        }
    }

    fn entity_selection(&self, kind: EntityKind, canonical: &str) -> CommandResult {
        // Items store the canonical key, so this is an exact get; a miss
        // means the list outlived the corpus, which cannot happen within a
        // session, but degrade to an error anyway.
        match kind.index(self.corpus).get(canonical) {
            Some(agg) => entity_profile(self.corpus, kind.singular(), canonical, agg, self.width),
            None => CommandResult::error(format!(
                "no {} named \"{canonical}\" in the corpus",
                kind.singular()
            )),
        }
    }
}
