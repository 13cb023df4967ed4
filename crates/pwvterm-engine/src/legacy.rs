//! Inline handlers for the verbs that predate the command registry:
//! `help`/`?`, `showcase …`, `timeline …`, `connections …`.
//!
//! This is a second, lower-priority dispatch stage behind the same result
//! type. It stays until these grammars are migrated into command objects;
//! the help text below documents them by hand and must move with them.

use pwvterm_corpus::{Corpus, EntityAggregate};
use std::collections::HashSet;

use crate::command::{Category, CommandContext, CommandRegistry};
use crate::commands::EntityKind;
use crate::render::{entity_profile, fact_block, figure_block, post_label, quote_block, rule};
use crate::result::CommandResult;

pub(crate) fn help(registry: &CommandRegistry, width: usize) -> CommandResult {
    let mut out = String::new();
    out.push_str("PWV TERMINAL\n");
    out.push_str(&rule(width));
    out.push('\n');

    let pad = registry
        .iter()
        .map(|c| c.usage().len())
        .max()
        .unwrap_or(0)
        .max("connections <a> and <b>".len());

    for category in Category::ALL {
        let mut wrote_header = false;
        for command in registry.iter() {
            if command.category() != category {
                continue;
            }
            if !wrote_header {
                out.push_str(&format!("\n{}\n", category.label()));
                wrote_header = true;
            }
            out.push_str(&format!(
                "  {:<pad$}  {}\n",
                command.usage(),
                command.description()
            ));
        }
    }

    // Not yet command objects; keep in sync with the legacy dispatch
    // stage in engine.rs.
    out.push_str("\nEXPLORE\n");
    out.push_str(&format!(
        "  {:<pad$}  {}\n",
        "showcase <kind> <name>", "profile a company/investor/person/topic"
    ));
    out.push_str(&format!(
        "  {:<pad$}  {}\n",
        "showcase random", "surprise me"
    ));
    out.push_str(&format!(
        "  {:<pad$}  {}\n",
        "timeline <company>", "a company's posts in date order"
    ));
    out.push_str(&format!(
        "  {:<pad$}  {}\n",
        "connections <a> and <b>", "posts mentioning both"
    ));
    out.push_str("\nNAVIGATION\n");
    out.push_str(&format!(
        "  {:<pad$}  {}\n",
        "<number>", "open an item from the last list"
    ));
    out.push_str(&format!("  {:<pad$}  {}\n", "help | ?", "this help"));
    out.push_str(&format!("  {:<pad$}  {}\n", "clear", "clear the screen"));

    CommandResult::output(out)
}

// ---------------------------------------------------------------------------
// showcase
// ---------------------------------------------------------------------------

const SHOWCASE_USAGE: &str =
    "usage: showcase <company|investor|person|topic> <name>  |  showcase random";

pub(crate) fn showcase(ctx: &mut CommandContext<'_>, rest: &str) -> CommandResult {
    let rest = rest.trim();
    if rest.is_empty() {
        return CommandResult::error(SHOWCASE_USAGE);
    }

    let (kind_token, name) = match rest.split_once(char::is_whitespace) {
        Some((kind, name)) => (kind, name.trim()),
        None => (rest, ""),
    };

    match kind_token.to_lowercase().as_str() {
        "random" => showcase_random(ctx),
        "company" => showcase_entity(ctx, EntityKind::Company, name),
        "investor" => showcase_entity(ctx, EntityKind::Investor, name),
        "person" => showcase_entity(ctx, EntityKind::Person, name),
        "topic" => showcase_entity(ctx, EntityKind::Topic, name),
        other => CommandResult::error(format!(
            "showcase: unknown kind `{other}`\n{SHOWCASE_USAGE}"
        )),
    }
}

fn showcase_entity(ctx: &mut CommandContext<'_>, kind: EntityKind, name: &str) -> CommandResult {
    if name.is_empty() {
        return CommandResult::error(format!("usage: showcase {} <name>", kind.singular()));
    }
    match kind.lookup(ctx.corpus, name) {
        Some((canonical, agg)) => {
            entity_profile(ctx.corpus, kind.singular(), canonical, agg, ctx.width)
        }
        None => CommandResult::error(format!(
            "no {} named \"{name}\" — try `{}`",
            kind.singular(),
            kind.verb()
        )),
    }
}

fn showcase_random(ctx: &mut CommandContext<'_>) -> CommandResult {
    // Uniform over the five showcase kinds; entity picks re-seed the
    // selectable list via the shared profile renderer, item picks render
    // standalone.
    match ctx.rng.gen_range_usize(5) {
        0 => random_entity(ctx, EntityKind::Company),
        1 => random_entity(ctx, EntityKind::Person),
        2 => random_fact(ctx),
        3 => random_figure(ctx),
        _ => random_quote(ctx),
    }
}

fn random_entity(ctx: &mut CommandContext<'_>, kind: EntityKind) -> CommandResult {
    let names: Vec<&String> = kind.index(ctx.corpus).keys().collect();
    if names.is_empty() {
        return CommandResult::info(format!("no {} extracted yet", kind.verb()));
    }
    let name = names[ctx.rng.gen_range_usize(names.len())];
    match kind.lookup(ctx.corpus, name) {
        Some((canonical, agg)) => {
            entity_profile(ctx.corpus, kind.singular(), canonical, agg, ctx.width)
        }
        None => CommandResult::info(format!("no {} extracted yet", kind.verb())),
    }
}

fn random_fact(ctx: &mut CommandContext<'_>) -> CommandResult {
    let candidates: Vec<(&String, &pwvterm_corpus::Post)> = ctx
        .corpus
        .posts
        .iter()
        .filter(|(_, post)| !post.facts.is_empty())
        .collect();
    let Some(&(slug, post)) = candidates.get(ctx.rng.gen_range_usize(candidates.len())) else {
        return CommandResult::info("no facts found");
    };
    let fact = &post.facts[ctx.rng.gen_range_usize(post.facts.len())];
    CommandResult::output(fact_block(fact, slug))
}

fn random_figure(ctx: &mut CommandContext<'_>) -> CommandResult {
    let candidates: Vec<(&String, &pwvterm_corpus::Post)> = ctx
        .corpus
        .posts
        .iter()
        .filter(|(_, post)| !post.figures.is_empty())
        .collect();
    let Some(&(slug, post)) = candidates.get(ctx.rng.gen_range_usize(candidates.len())) else {
        return CommandResult::info("no figures found");
    };
    let figure = &post.figures[ctx.rng.gen_range_usize(post.figures.len())];
    CommandResult::output(figure_block(figure, slug))
}

fn random_quote(ctx: &mut CommandContext<'_>) -> CommandResult {
    let quotes = &ctx.corpus.entities.quotes;
    if quotes.is_empty() {
        return CommandResult::info("no quotes found");
    }
    let index = ctx.rng.gen_range_usize(quotes.len());
    CommandResult::output(quote_block(&quotes[index], index))
}

// ---------------------------------------------------------------------------
// timeline
// ---------------------------------------------------------------------------

pub(crate) fn timeline(corpus: &Corpus, width: usize, rest: &str) -> CommandResult {
    let name = rest.trim();
    if name.is_empty() {
        return CommandResult::error("usage: timeline <company>");
    }

    // Timeline resolves companies only (people/topics are reachable via
    // `connections` but were never ported here).
    let Some((canonical, agg)) = corpus.lookup_company(name) else {
        return CommandResult::error(format!(
            "no company named \"{name}\" — try `companies` (timeline supports companies only)"
        ));
    };

    let mut rows: Vec<(String, String, String)> = agg
        .posts
        .iter()
        .map(|slug| match corpus.post(slug) {
            Some(post) => (
                post.pub_date.clone().unwrap_or_else(|| "Unknown".to_string()),
                post.title.clone(),
                slug.clone(),
            ),
            None => ("Unknown".to_string(), slug.clone(), slug.clone()),
        })
        .collect();
    // Plain lexical ascending sort. Correct only because publish dates are
    // ISO YYYY-MM-DD strings; the literal "Unknown" sorts wherever the
    // alphabet puts it relative to digits.
    rows.sort_by(|a, b| a.0.cmp(&b.0));

    let mut out = String::new();
    out.push_str(&format!("TIMELINE · {canonical}\n"));
    out.push_str(&rule(width));
    out.push('\n');
    for (date, title, slug) in &rows {
        out.push_str(&format!("  {date}  {title}  (/news/{slug}/)\n"));
    }
    CommandResult::output(out)
}

// ---------------------------------------------------------------------------
// connections
// ---------------------------------------------------------------------------

pub(crate) fn connections(corpus: &Corpus, width: usize, rest: &str) -> CommandResult {
    let rest = rest.trim();

    // "<a> and <b>" when the connective is present, otherwise first token
    // vs the rest.
    let (a, b) = if let Some((left, right)) = rest.split_once(" and ") {
        (left.trim(), right.trim())
    } else {
        match rest.split_once(char::is_whitespace) {
            Some((first, remainder)) => (first, remainder.trim()),
            None => return CommandResult::error("usage: connections <a> and <b>"),
        }
    };
    if a.is_empty() || b.is_empty() {
        return CommandResult::error("usage: connections <a> and <b>");
    }

    let a_hit = resolve_entity(corpus, a);
    let b_hit = resolve_entity(corpus, b);
    let (Some((_, a_name, a_agg)), Some((_, b_name, b_agg))) = (a_hit, b_hit) else {
        return CommandResult::error(format!(
            "could not resolve \"{a}\" and/or \"{b}\" (looked in companies, people, topics)"
        ));
    };

    let b_slugs: HashSet<&str> = b_agg.posts.iter().map(String::as_str).collect();
    let common: Vec<&String> = a_agg
        .posts
        .iter()
        .filter(|slug| b_slugs.contains(slug.as_str()))
        .collect();

    if common.is_empty() {
        return CommandResult::info(format!("no shared posts between {a_name} and {b_name}"));
    }

    let mut out = String::new();
    out.push_str(&format!(
        "CONNECTIONS · {a_name} ↔ {b_name} ({})\n",
        common.len()
    ));
    out.push_str(&rule(width));
    out.push('\n');
    for slug in &common {
        out.push_str(&format!(
            "  {}  (/news/{slug}/)\n",
            post_label(corpus, slug)
        ));
    }
    CommandResult::output(out)
}

/// Name resolution for connections. Companies shadow people, which shadow
/// topics, on cross-category name collisions; this ordering is part of the
/// grammar, not an accident.
fn resolve_entity<'a>(
    corpus: &'a Corpus,
    name: &str,
) -> Option<(&'static str, &'a str, &'a EntityAggregate)> {
    corpus
        .lookup_company(name)
        .map(|(n, g)| ("company", n, g))
        .or_else(|| corpus.lookup_person(name).map(|(n, g)| ("person", n, g)))
        .or_else(|| corpus.lookup_topic(name).map(|(n, g)| ("topic", n, g)))
}
