//! Post listing and free-text search.

use crate::command::{Category, Command, CommandContext};
use crate::render::{post_label, rule};
use crate::result::{CommandResult, SelectableItem, SelectableKind};

pub struct PostsCommand;

impl Command for PostsCommand {
    fn name(&self) -> &'static str {
        "posts"
    }

    fn description(&self) -> &'static str {
        "all posts, newest first"
    }

    fn category(&self) -> Category {
        Category::List
    }

    fn execute(&self, ctx: &mut CommandContext<'_>, _raw: &str, _args: &[&str]) -> CommandResult {
        let mut slugs: Vec<&String> = ctx.corpus.posts.keys().collect();
        // Newest first by the ISO date string; undated posts sink to the
        // end in slug order.
        slugs.sort_by(|a, b| {
            let da = ctx.corpus.posts[*a].pub_date.as_deref();
            let db = ctx.corpus.posts[*b].pub_date.as_deref();
            match (da, db) {
                (Some(x), Some(y)) => y.cmp(x),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => a.cmp(b),
            }
        });

        if slugs.is_empty() {
            return CommandResult::info("no posts found");
        }

        let items: Vec<SelectableItem> = slugs
            .iter()
            .map(|slug| {
                SelectableItem::new(
                    post_label(ctx.corpus, slug),
                    SelectableKind::Post((*slug).clone()),
                )
            })
            .collect();

        let mut out = String::new();
        out.push_str(&format!("POSTS ({})\n", items.len()));
        out.push_str(&rule(ctx.width));
        out.push('\n');
        for (i, item) in items.iter().enumerate() {
            out.push_str(&format!("  {}. {}\n", i + 1, item.label));
        }
        out.push_str("\nType a number to open a post.");

        CommandResult::output(out).with_selectable(items)
    }
}

pub struct SearchCommand;

impl Command for SearchCommand {
    fn name(&self) -> &'static str {
        "search"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["search ", "grep", "grep "]
    }

    fn description(&self) -> &'static str {
        "find posts by title or tag substring"
    }

    fn usage(&self) -> &'static str {
        "search <term>"
    }

    fn category(&self) -> Category {
        Category::Exploration
    }

    fn execute(&self, ctx: &mut CommandContext<'_>, _raw: &str, args: &[&str]) -> CommandResult {
        if args.is_empty() {
            return CommandResult::error("usage: search <term>");
        }
        let term = args.join(" ").to_lowercase();

        let mut items: Vec<SelectableItem> = Vec::new();
        for (slug, post) in &ctx.corpus.posts {
            let title_hit = post.title.to_lowercase().contains(&term);
            let tag_hit = post.tags.iter().any(|t| t.to_lowercase().contains(&term));
            if title_hit || tag_hit {
                items.push(SelectableItem::new(
                    post_label(ctx.corpus, slug),
                    SelectableKind::Post(slug.clone()),
                ));
            }
        }

        if items.is_empty() {
            return CommandResult::info(format!("no posts matching \"{}\"", args.join(" ")));
        }

        let mut out = String::new();
        out.push_str(&format!("MATCHES for \"{}\" ({})\n", args.join(" "), items.len()));
        out.push_str(&rule(ctx.width));
        out.push('\n');
        for (i, item) in items.iter().enumerate() {
            out.push_str(&format!("  {}. {}\n", i + 1, item.label));
        }
        out.push_str("\nType a number to open a post.");

        CommandResult::output(out).with_selectable(items)
    }
}
