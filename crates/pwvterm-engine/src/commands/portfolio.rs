//! The portfolio listing, grouped by fund bucket.

use pwvterm_corpus::FundBucket;

use crate::command::{Category, Command, CommandContext};
use crate::render::rule;
use crate::result::{CommandResult, SelectableItem, SelectableKind};

pub struct PortfolioCommand;

impl Command for PortfolioCommand {
    fn name(&self) -> &'static str {
        "portfolio"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["port"]
    }

    fn description(&self) -> &'static str {
        "portfolio companies by fund"
    }

    fn category(&self) -> Category {
        Category::List
    }

    fn execute(&self, ctx: &mut CommandContext<'_>, _raw: &str, _args: &[&str]) -> CommandResult {
        if ctx.portfolio.is_empty() {
            return CommandResult::info("no portfolio listing loaded");
        }

        let mut out = String::new();
        out.push_str(&format!("PORTFOLIO ({} companies)\n", ctx.portfolio.len()));
        out.push_str(&rule(ctx.width));
        out.push('\n');

        // Numbering runs across buckets: the numbers index into one
        // selectable list.
        let mut items: Vec<SelectableItem> = Vec::new();
        let mut current_bucket: Option<FundBucket> = None;
        for (bucket, company) in ctx.portfolio.iter() {
            if current_bucket != Some(bucket) {
                out.push_str(&format!("\n{}\n", bucket.label().to_uppercase()));
                current_bucket = Some(bucket);
            }

            let mut label = company.name.clone();
            if let Some(formerly) = company.formerly.as_deref() {
                label.push_str(&format!(" (formerly {formerly})"));
            }
            if let Some(acquirer) = company.acquired_by.as_deref() {
                label.push_str(&format!(" (acquired by {acquirer})"));
            }

            out.push_str(&format!("  {}. {label}\n", items.len() + 1));
            items.push(SelectableItem::new(
                label,
                SelectableKind::PortfolioCompany(company.slug.clone()),
            ));
        }
        out.push_str("\nType a number to open a company.");

        CommandResult::output(out).with_selectable(items)
    }
}
