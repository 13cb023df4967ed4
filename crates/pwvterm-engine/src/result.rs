//! Structured command results and the session-scoped selectable list.

/// What kind of renderable a turn produced. Every input yields exactly one
/// result; errors are results too, never panics or `Err` escaping the
/// engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultKind {
    /// Regular preformatted output.
    Output,
    /// Informational text reflecting corpus state ("no quotes found"),
    /// deliberately not an error.
    Info,
    /// User-facing error with a human-readable message.
    Error,
    /// Empty input; nothing to render.
    Empty,
    /// A request to navigate to a post; the presentation layer owns the
    /// actual (fire-and-forget) navigation.
    ShowPost,
}

/// Navigation payload carried by a `ShowPost` result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostNav {
    pub slug: String,
    pub url: String,
    pub auto_open: bool,
}

/// One entry in the current selectable list. The kind is assigned when the
/// item is built, so nothing downstream ever has to sniff payload shapes
/// (portfolio companies and entity-aggregate companies are distinct kinds
/// even though both read as "company" to the user).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectableItem {
    pub label: String,
    pub kind: SelectableKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectableKind {
    /// Entity-aggregate company, by canonical name.
    Company(String),
    Investor(String),
    Person(String),
    Topic(String),
    /// Post, by slug.
    Post(String),
    /// Flattened fact, addressed by owning post + position. Not yet wired
    /// into numeric selection.
    Fact { post_slug: String, index: usize },
    /// Corpus-level quote by stable ordinal. Not yet wired into numeric
    /// selection.
    Quote { index: usize },
    /// Portfolio-listing company, by listing slug.
    PortfolioCompany(String),
}

impl SelectableKind {
    pub fn kind_name(&self) -> &'static str {
        match self {
            SelectableKind::Company(_) => "company",
            SelectableKind::Investor(_) => "investor",
            SelectableKind::Person(_) => "person",
            SelectableKind::Topic(_) => "topic",
            SelectableKind::Post(_) => "post",
            SelectableKind::Fact { .. } => "fact",
            SelectableKind::Quote { .. } => "quote",
            SelectableKind::PortfolioCompany(_) => "company",
        }
    }
}

impl SelectableItem {
    pub fn new(label: impl Into<String>, kind: SelectableKind) -> Self {
        Self {
            label: label.into(),
            kind,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub kind: ResultKind,
    pub content: String,
    /// When set, the engine replaces the session's current list wholesale.
    pub selectable: Option<Vec<SelectableItem>>,
    pub navigate: Option<PostNav>,
}

impl CommandResult {
    pub fn output(content: impl Into<String>) -> Self {
        Self {
            kind: ResultKind::Output,
            content: content.into(),
            selectable: None,
            navigate: None,
        }
    }

    pub fn info(content: impl Into<String>) -> Self {
        Self {
            kind: ResultKind::Info,
            content: content.into(),
            selectable: None,
            navigate: None,
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            kind: ResultKind::Error,
            content: content.into(),
            selectable: None,
            navigate: None,
        }
    }

    pub fn empty() -> Self {
        Self {
            kind: ResultKind::Empty,
            content: String::new(),
            selectable: None,
            navigate: None,
        }
    }

    pub fn show_post(slug: &str, content: impl Into<String>) -> Self {
        Self {
            kind: ResultKind::ShowPost,
            content: content.into(),
            selectable: None,
            navigate: Some(PostNav {
                slug: slug.to_string(),
                url: format!("/news/{slug}/"),
                auto_open: true,
            }),
        }
    }

    pub fn with_selectable(mut self, items: Vec<SelectableItem>) -> Self {
        self.selectable = Some(items);
        self
    }

    pub fn is_error(&self) -> bool {
        self.kind == ResultKind::Error
    }
}
