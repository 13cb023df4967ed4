//! Plain-text rendering for command results.
//!
//! The engine renders uncolored text; the shell decides how to paint each
//! result kind. Widths are presentation parameters, not semantic state.

use pwvterm_corpus::{
    Corpus, EntityAggregate, Fact, Figure, FundBucket, PortfolioCompany, Quote,
};

use crate::result::{CommandResult, SelectableItem, SelectableKind};

pub(crate) fn rule(width: usize) -> String {
    "─".repeat(width.clamp(8, 120))
}

/// Trim + ellipsis, counting chars rather than bytes.
pub(crate) fn truncate_value(s: &str, max_chars: usize) -> String {
    let s = s.trim();
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let mut out = String::new();
    out.extend(s.chars().take(max_chars));
    out.push('…');
    out
}

/// Greedy word wrap. Words longer than the width get their own line rather
/// than being split.
pub(crate) fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(8);
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if current.chars().count() + 1 + word.chars().count() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// The classic speech balloon + cow.
pub(crate) fn cowsay(text: &str, width: usize) -> String {
    let inner = width.saturating_sub(4).clamp(12, 60);
    let lines = wrap(text, inner);
    let widest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);

    let mut out = String::new();
    out.push(' ');
    out.push_str(&"_".repeat(widest + 2));
    out.push('\n');

    let count = lines.len();
    for (i, line) in lines.iter().enumerate() {
        let (open, close) = if count == 1 {
            ('<', '>')
        } else if i == 0 {
            ('/', '\\')
        } else if i == count - 1 {
            ('\\', '/')
        } else {
            ('|', '|')
        };
        let pad = widest - line.chars().count();
        out.push_str(&format!("{open} {line}{} {close}\n", " ".repeat(pad)));
    }

    out.push(' ');
    out.push_str(&"-".repeat(widest + 2));
    out.push('\n');
    out.push_str(
        r#"        \   ^__^
         \  (oo)\_______
            (__)\       )\/\
                ||----w |
                ||     ||"#,
    );
    out
}

/// "Title (date)" for known slugs, the bare slug otherwise.
pub(crate) fn post_label(corpus: &Corpus, slug: &str) -> String {
    match corpus.post(slug) {
        Some(post) => match post.pub_date.as_deref() {
            Some(date) => format!("{} ({date})", post.title),
            None => post.title.clone(),
        },
        None => slug.to_string(),
    }
}

pub(crate) fn post_items(corpus: &Corpus, slugs: &[String]) -> Vec<SelectableItem> {
    slugs
        .iter()
        .map(|slug| SelectableItem::new(post_label(corpus, slug), SelectableKind::Post(slug.clone())))
        .collect()
}

fn numbered(items: &[SelectableItem]) -> String {
    let mut out = String::new();
    for (i, item) in items.iter().enumerate() {
        out.push_str(&format!("  {}. {}\n", i + 1, item.label));
    }
    out
}

/// Full profile for an entity aggregate. The post list doubles as the new
/// selectable list, so a numeric selection right after a profile opens one
/// of its posts.
pub(crate) fn entity_profile(
    corpus: &Corpus,
    kind_label: &str,
    canonical: &str,
    agg: &EntityAggregate,
    width: usize,
) -> CommandResult {
    let items = post_items(corpus, &agg.posts);

    let mut out = String::new();
    out.push_str(&format!("{} · {}\n", canonical.to_uppercase(), kind_label));
    out.push_str(&rule(width));
    out.push('\n');
    if let Some(role) = agg.role.as_deref() {
        out.push_str(&format!("ROLE: {role}\n"));
    }
    out.push_str(&format!("MENTIONS: {} posts\n", agg.display_count()));
    if !items.is_empty() {
        out.push_str("\nPOSTS:\n");
        out.push_str(&numbered(&items));
        out.push_str("\nType a number to open a post.");
    }

    CommandResult::output(out).with_selectable(items)
}

/// Portfolio-company profile. Distinct from the entity profile: it renders
/// the static listing entry and only annotates the corpus join when the
/// name happens to match an aggregate.
pub(crate) fn portfolio_profile(
    corpus: &Corpus,
    bucket: FundBucket,
    company: &PortfolioCompany,
    width: usize,
) -> CommandResult {
    let mut out = String::new();
    out.push_str(&format!("{} · portfolio\n", company.name.to_uppercase()));
    out.push_str(&rule(width));
    out.push('\n');
    out.push_str(&format!("FUND: {}\n", bucket.label()));
    if !company.url.is_empty() {
        out.push_str(&format!("URL: {}\n", company.url));
    }
    if let Some(formerly) = company.formerly.as_deref() {
        out.push_str(&format!("FORMERLY: {formerly}\n"));
    }
    if let Some(acquirer) = company.acquired_by.as_deref() {
        out.push_str(&format!("ACQUIRED BY: {acquirer}\n"));
    }
    if !company.tags.is_empty() {
        out.push_str(&format!("TAGS: {}\n", company.tags.join(", ")));
    }
    // Optional join to the extracted entities; absence is normal.
    if let Some((_, agg)) = corpus.lookup_company(&company.name) {
        out.push_str(&format!("IN THE NEWS: {} posts\n", agg.display_count()));
    }
    CommandResult::output(out)
}

pub(crate) fn quote_block(quote: &Quote, index: usize) -> String {
    let mut out = String::new();
    out.push_str(&format!("\"{}\"\n", quote.quote.trim()));
    if !quote.speaker.is_empty() {
        out.push_str(&format!("  — {}", quote.speaker));
        if let Some(context) = quote.context.as_deref() {
            out.push_str(&format!(", {context}"));
        }
        out.push('\n');
    }
    if let Some(date) = quote.pub_date.as_deref() {
        out.push_str(&format!("  {date}\n"));
    }
    if !quote.post_slug.is_empty() {
        out.push_str(&format!(
            "  from \"{}\" (/news/{}/)  [{}]\n",
            quote.post_title,
            quote.post_slug,
            quote.display_id(index)
        ));
    }
    out
}

pub(crate) fn fact_block(fact: &Fact, post_slug: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!("[{}] {}\n", fact.category.as_str(), fact.text.trim()));
    if let Some(date) = fact.date.as_deref() {
        out.push_str(&format!("  {date}\n"));
    }
    out.push_str(&format!("  from /news/{post_slug}/\n"));
    out
}

pub(crate) fn figure_block(figure: &Figure, post_slug: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} {}\n", figure.value, figure.unit));
    if !figure.context.is_empty() {
        out.push_str(&format!("  {}\n", figure.context));
    }
    out.push_str(&format!("  from /news/{post_slug}/\n"));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_respects_width() {
        let lines = wrap("the quick brown fox jumps over the lazy dog", 12);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(line.chars().count() <= 12, "line too long: {line:?}");
        }
    }

    #[test]
    fn wrap_keeps_overlong_words_whole() {
        let lines = wrap("antidisestablishmentarianism", 10);
        assert_eq!(lines, vec!["antidisestablishmentarianism".to_string()]);
    }

    #[test]
    fn truncate_counts_chars_not_bytes() {
        assert_eq!(truncate_value("héllo wörld", 5), "héllo…");
        assert_eq!(truncate_value("short", 10), "short");
    }

    #[test]
    fn cowsay_single_line_uses_angle_brackets() {
        let art = cowsay("Moo!", 80);
        assert!(art.contains("< Moo! >"));
        assert!(art.contains("(oo)"));
    }

    #[test]
    fn cowsay_multiline_uses_balloon_sides() {
        let art = cowsay(
            "a reasonably long sentence that will not fit on one balloon line at all",
            30,
        );
        assert!(art.contains("/ "));
        assert!(art.contains(" \\"));
        assert!(art.contains("\\ "));
    }
}
