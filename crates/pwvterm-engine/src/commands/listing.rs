//! The four entity listing verbs: companies / investors / people / topics.

use pwvterm_corpus::{Corpus, EntityAggregate};
use std::collections::BTreeMap;

use crate::command::{Category, Command, CommandContext};
use crate::render::rule;
use crate::result::{CommandResult, SelectableItem, SelectableKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Company,
    Investor,
    Person,
    Topic,
}

impl EntityKind {
    pub fn verb(self) -> &'static str {
        match self {
            EntityKind::Company => "companies",
            EntityKind::Investor => "investors",
            EntityKind::Person => "people",
            EntityKind::Topic => "topics",
        }
    }

    pub fn singular(self) -> &'static str {
        match self {
            EntityKind::Company => "company",
            EntityKind::Investor => "investor",
            EntityKind::Person => "person",
            EntityKind::Topic => "topic",
        }
    }

    pub fn index(self, corpus: &Corpus) -> &BTreeMap<String, EntityAggregate> {
        match self {
            EntityKind::Company => &corpus.entities.companies,
            EntityKind::Investor => &corpus.entities.investors,
            EntityKind::Person => &corpus.entities.people,
            EntityKind::Topic => &corpus.entities.topics,
        }
    }

    pub fn selectable(self, canonical: &str) -> SelectableKind {
        match self {
            EntityKind::Company => SelectableKind::Company(canonical.to_string()),
            EntityKind::Investor => SelectableKind::Investor(canonical.to_string()),
            EntityKind::Person => SelectableKind::Person(canonical.to_string()),
            EntityKind::Topic => SelectableKind::Topic(canonical.to_string()),
        }
    }

    pub fn lookup<'a>(
        self,
        corpus: &'a Corpus,
        name: &str,
    ) -> Option<(&'a str, &'a EntityAggregate)> {
        match self {
            EntityKind::Company => corpus.lookup_company(name),
            EntityKind::Investor => corpus.lookup_investor(name),
            EntityKind::Person => corpus.lookup_person(name),
            EntityKind::Topic => corpus.lookup_topic(name),
        }
    }
}

/// Sorted, numbered entity listing. The displayed count is always the
/// post-list length; `mentions` only drives the sort (offline aggregation
/// can let the two drift).
pub(crate) fn entity_items(corpus: &Corpus, kind: EntityKind) -> Vec<SelectableItem> {
    let mut entries: Vec<(&String, &EntityAggregate)> = kind.index(corpus).iter().collect();
    entries.sort_by(|(a_name, a), (b_name, b)| {
        b.sort_weight().cmp(&a.sort_weight()).then(a_name.cmp(b_name))
    });

    entries
        .into_iter()
        .map(|(name, agg)| {
            let label = match agg.role.as_deref() {
                Some(role) => format!("{name} ({} mentions, {role})", agg.display_count()),
                None => format!("{name} ({} mentions)", agg.display_count()),
            };
            SelectableItem::new(label, kind.selectable(name))
        })
        .collect()
}

pub struct EntityListCommand {
    kind: EntityKind,
}

impl EntityListCommand {
    pub fn new(kind: EntityKind) -> Self {
        Self { kind }
    }
}

impl Command for EntityListCommand {
    fn name(&self) -> &'static str {
        self.kind.verb()
    }

    fn description(&self) -> &'static str {
        match self.kind {
            EntityKind::Company => "companies mentioned across posts",
            EntityKind::Investor => "investors mentioned across posts",
            EntityKind::Person => "people mentioned across posts",
            EntityKind::Topic => "topics extracted from posts",
        }
    }

    fn category(&self) -> Category {
        Category::List
    }

    fn execute(&self, ctx: &mut CommandContext<'_>, _raw: &str, _args: &[&str]) -> CommandResult {
        let items = entity_items(ctx.corpus, self.kind);
        if items.is_empty() {
            return CommandResult::info(format!("no {} found", self.name()));
        }

        let mut out = String::new();
        out.push_str(&format!("{} ({})\n", self.name().to_uppercase(), items.len()));
        out.push_str(&rule(ctx.width));
        out.push('\n');
        for (i, item) in items.iter().enumerate() {
            out.push_str(&format!("  {}. {}\n", i + 1, item.label));
        }
        out.push_str("\nType a number to open a profile.");

        CommandResult::output(out).with_selectable(items)
    }
}
