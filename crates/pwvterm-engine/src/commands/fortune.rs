//! fortune / cowsay / "fortune | cowsay".
//!
//! Registration order matters here: the piped form's alias is a textual
//! superstring of both bare verbs and must be registered first.

use crate::command::{Category, Command, CommandContext};
use crate::render::{cowsay, quote_block};
use crate::result::CommandResult;

/// Fallback line shown when the corpus carries no quotes at all.
pub(crate) const FORTUNE_FALLBACK: &str =
    "\"We invest to help make the future possible.\" — PWV";

pub struct FortuneCommand;

impl Command for FortuneCommand {
    fn name(&self) -> &'static str {
        "fortune"
    }

    fn aliases(&self) -> &'static [&'static str] {
        // The trailing-space alias claims "fortune <anything>", which is
        // why the piped composite has to be registered ahead of this.
        &["fortune "]
    }

    fn description(&self) -> &'static str {
        "a random quote from the archive"
    }

    fn category(&self) -> Category {
        Category::Showcase
    }

    fn execute(&self, ctx: &mut CommandContext<'_>, _raw: &str, _args: &[&str]) -> CommandResult {
        let quotes = &ctx.corpus.entities.quotes;
        if quotes.is_empty() {
            return CommandResult::output(FORTUNE_FALLBACK);
        }
        let index = ctx.rng.gen_range_usize(quotes.len());
        CommandResult::output(quote_block(&quotes[index], index))
    }
}

pub struct CowsayCommand;

impl Command for CowsayCommand {
    fn name(&self) -> &'static str {
        "cowsay"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["cowsay "]
    }

    fn description(&self) -> &'static str {
        "a cow says your text"
    }

    fn usage(&self) -> &'static str {
        "cowsay <text>"
    }

    fn category(&self) -> Category {
        Category::Showcase
    }

    fn execute(&self, ctx: &mut CommandContext<'_>, _raw: &str, args: &[&str]) -> CommandResult {
        let text = if args.is_empty() {
            "Moo!".to_string()
        } else {
            args.join(" ")
        };
        CommandResult::output(cowsay(&text, ctx.width))
    }
}

/// The piped composite: a random quote through the cow.
pub struct FortuneCowsayCommand;

impl Command for FortuneCowsayCommand {
    fn name(&self) -> &'static str {
        "fortune | cowsay"
    }

    fn description(&self) -> &'static str {
        "a random quote, as told by a cow"
    }

    fn category(&self) -> Category {
        Category::Showcase
    }

    fn execute(&self, ctx: &mut CommandContext<'_>, _raw: &str, _args: &[&str]) -> CommandResult {
        let quotes = &ctx.corpus.entities.quotes;
        let text = if quotes.is_empty() {
            FORTUNE_FALLBACK.to_string()
        } else {
            let index = ctx.rng.gen_range_usize(quotes.len());
            let quote = &quotes[index];
            if quote.speaker.is_empty() {
                quote.quote.clone()
            } else {
                format!("{} — {}", quote.quote, quote.speaker)
            }
        };
        CommandResult::output(cowsay(&text, ctx.width))
    }
}
