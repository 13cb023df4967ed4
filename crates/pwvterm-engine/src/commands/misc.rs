//! stats / socials / uptime.

use std::time::Instant;

use crate::command::{Category, Command, CommandContext};
use crate::render::rule;
use crate::result::CommandResult;

pub struct StatsCommand;

impl Command for StatsCommand {
    fn name(&self) -> &'static str {
        "stats"
    }

    fn description(&self) -> &'static str {
        "corpus totals"
    }

    fn category(&self) -> Category {
        Category::Other
    }

    fn execute(&self, ctx: &mut CommandContext<'_>, _raw: &str, _args: &[&str]) -> CommandResult {
        let corpus = ctx.corpus;
        let mut out = String::new();
        out.push_str("CORPUS STATS\n");
        out.push_str(&rule(ctx.width));
        out.push('\n');
        out.push_str(&format!("posts:      {}\n", corpus.posts.len()));
        out.push_str(&format!("companies:  {}\n", corpus.entities.companies.len()));
        out.push_str(&format!("investors:  {}\n", corpus.entities.investors.len()));
        out.push_str(&format!("people:     {}\n", corpus.entities.people.len()));
        out.push_str(&format!("topics:     {}\n", corpus.entities.topics.len()));
        out.push_str(&format!("quotes:     {}\n", corpus.entities.quotes.len()));
        out.push_str(&format!("facts:      {}\n", corpus.fact_count()));
        out.push_str(&format!("figures:    {}\n", corpus.figure_count()));
        out.push_str(&format!("portfolio:  {}\n", ctx.portfolio.len()));
        if let Some(extracted_at) = corpus.metadata.extracted_at.as_deref() {
            out.push_str(&format!("extracted:  {extracted_at}\n"));
        }
        if let Some(range) = corpus.metadata.date_range.as_ref() {
            if let (Some(start), Some(end)) = (range.start.as_deref(), range.end.as_deref()) {
                out.push_str(&format!("range:      {start} → {end}\n"));
            }
        }
        CommandResult::output(out)
    }
}

pub struct SocialsCommand;

impl Command for SocialsCommand {
    fn name(&self) -> &'static str {
        "socials"
    }

    fn description(&self) -> &'static str {
        "where to find us"
    }

    fn category(&self) -> Category {
        Category::Other
    }

    fn execute(&self, ctx: &mut CommandContext<'_>, _raw: &str, _args: &[&str]) -> CommandResult {
        let mut out = String::new();
        out.push_str("FIND US\n");
        out.push_str(&rule(ctx.width));
        out.push('\n');
        out.push_str("  web       https://pwv.com\n");
        out.push_str("  twitter   https://twitter.com/pwvc\n");
        out.push_str("  linkedin  https://www.linkedin.com/company/pwvc\n");
        out.push_str("  rss       /rss.xml\n");
        CommandResult::output(out)
    }
}

/// Session uptime. The start instant is cached at construction, which is
/// the one sanctioned piece of cross-call state a command may hold.
pub struct UptimeCommand {
    started: Instant,
}

impl UptimeCommand {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
        }
    }
}

impl Default for UptimeCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl Command for UptimeCommand {
    fn name(&self) -> &'static str {
        "uptime"
    }

    fn description(&self) -> &'static str {
        "how long this session has been running"
    }

    fn category(&self) -> Category {
        Category::Other
    }

    fn execute(&self, _ctx: &mut CommandContext<'_>, _raw: &str, _args: &[&str]) -> CommandResult {
        let elapsed = self.started.elapsed();
        let secs = elapsed.as_secs();
        let (h, m, s) = (secs / 3600, (secs % 3600) / 60, secs % 60);
        CommandResult::output(format!("up {h:02}:{m:02}:{s:02}"))
    }
}
