//! Quote and fact listings.
//!
//! Both seed selectable lists, but their kinds are intentionally not wired
//! into numeric selection yet; selecting one degrades to the generic
//! unknown-item-type error rather than a crash.

use crate::command::{Category, Command, CommandContext};
use crate::render::{rule, truncate_value};
use crate::result::{CommandResult, SelectableItem, SelectableKind};

pub struct QuotesCommand;

impl Command for QuotesCommand {
    fn name(&self) -> &'static str {
        "quotes"
    }

    fn description(&self) -> &'static str {
        "every quote pulled from the posts"
    }

    fn category(&self) -> Category {
        Category::List
    }

    fn execute(&self, ctx: &mut CommandContext<'_>, _raw: &str, _args: &[&str]) -> CommandResult {
        let quotes = &ctx.corpus.entities.quotes;
        if quotes.is_empty() {
            return CommandResult::info("no quotes found");
        }

        let mut out = String::new();
        out.push_str(&format!("QUOTES ({})\n", quotes.len()));
        out.push_str(&rule(ctx.width));
        out.push('\n');

        let mut items: Vec<SelectableItem> = Vec::new();
        for (index, quote) in quotes.iter().enumerate() {
            let label = if quote.speaker.is_empty() {
                format!("\"{}\"", truncate_value(&quote.quote, 60))
            } else {
                format!("\"{}\" — {}", truncate_value(&quote.quote, 60), quote.speaker)
            };
            out.push_str(&format!(
                "  {}. {label}  [{}]\n",
                index + 1,
                quote.display_id(index)
            ));
            items.push(SelectableItem::new(label, SelectableKind::Quote { index }));
        }

        CommandResult::output(out).with_selectable(items)
    }
}

pub struct FactsCommand;

impl Command for FactsCommand {
    fn name(&self) -> &'static str {
        "facts"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["facts "]
    }

    fn description(&self) -> &'static str {
        "extracted facts, optionally filtered by category"
    }

    fn usage(&self) -> &'static str {
        "facts [category]"
    }

    fn category(&self) -> Category {
        Category::List
    }

    fn execute(&self, ctx: &mut CommandContext<'_>, _raw: &str, args: &[&str]) -> CommandResult {
        let filter = args.first().map(|s| s.to_lowercase());

        let mut items: Vec<SelectableItem> = Vec::new();
        let mut lines = String::new();
        for (slug, post) in &ctx.corpus.posts {
            for (index, fact) in post.facts.iter().enumerate() {
                if let Some(want) = filter.as_deref() {
                    if !fact.category.as_str().eq_ignore_ascii_case(want) {
                        continue;
                    }
                }
                let label = format!(
                    "[{}] {}",
                    fact.category.as_str(),
                    truncate_value(&fact.text, 70)
                );
                lines.push_str(&format!("  {}. {label}  (/news/{slug}/)\n", items.len() + 1));
                items.push(SelectableItem::new(
                    label,
                    SelectableKind::Fact {
                        post_slug: slug.clone(),
                        index,
                    },
                ));
            }
        }

        if items.is_empty() {
            return match filter {
                Some(want) => CommandResult::info(format!("no facts found in category \"{want}\"")),
                None => CommandResult::info("no facts found"),
            };
        }

        let mut out = String::new();
        match filter {
            Some(want) => out.push_str(&format!("FACTS · {want} ({})\n", items.len())),
            None => out.push_str(&format!("FACTS ({})\n", items.len())),
        }
        out.push_str(&rule(ctx.width));
        out.push('\n');
        out.push_str(&lines);

        CommandResult::output(out).with_selectable(items)
    }
}
