//! The command contract and the ordered registry.
//!
//! Each verb the terminal understands is one value implementing `Command`.
//! The registry is an ordered list, not a map: registration order encodes
//! dispatch precedence, because some aliases are textual prefixes of
//! others ("fortune | cowsay" must be tried before a command that claims
//! the bare "fortune").

use pwvterm_corpus::{Corpus, PortfolioBook};

use crate::result::CommandResult;
use crate::rng::XorShift64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    List,
    Showcase,
    Exploration,
    Other,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::List,
        Category::Showcase,
        Category::Exploration,
        Category::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::List => "LIST",
            Category::Showcase => "SHOWCASE",
            Category::Exploration => "EXPLORATION",
            Category::Other => "OTHER",
        }
    }
}

/// Everything a command may read during one turn. Commands are pure reads
/// over the corpus plus their arguments; the only mutation they can cause
/// is publishing a new selectable list through their returned result. The
/// rng is threaded in so random picks stay deterministic under a fixed
/// seed.
pub struct CommandContext<'a> {
    pub corpus: &'a Corpus,
    pub portfolio: &'a PortfolioBook,
    pub width: usize,
    pub rng: &'a mut XorShift64,
}

pub trait Command {
    /// Canonical verb, lower-case.
    fn name(&self) -> &'static str;

    /// Extra verbs. An alias with a trailing space claims verb-plus-
    /// argument forms ("cowsay <text>"); a bare alias claims both the
    /// exact verb and verb-plus-argument forms.
    fn aliases(&self) -> &'static [&'static str] {
        &[]
    }

    fn description(&self) -> &'static str;

    fn usage(&self) -> &'static str {
        self.name()
    }

    fn category(&self) -> Category;

    /// `raw` is the original-case input line; `args` are the whitespace
    /// tokens after the verb.
    fn execute(&self, ctx: &mut CommandContext<'_>, raw: &str, args: &[&str]) -> CommandResult;

    /// True iff this command claims the (lower-cased, trimmed) input.
    fn matches(&self, input: &str) -> bool {
        let input = input.trim().to_lowercase();
        if input == self.name() {
            return true;
        }
        for alias in self.aliases() {
            let verb = alias.trim_end();
            if input == verb {
                return true;
            }
            // Both alias forms claim "<verb> <args...>"; the boundary must
            // be a real space so "portfolios" never matches alias "port".
            if input.len() > verb.len()
                && input.starts_with(verb)
                && input.as_bytes()[verb.len()] == b' '
            {
                return true;
            }
        }
        false
    }
}

pub struct CommandRegistry {
    commands: Vec<Box<dyn Command>>,
}

impl CommandRegistry {
    /// Builds the registry, asserting that every command stays reachable:
    /// a later command whose canonical name is already claimed by an
    /// earlier registration could never be dispatched.
    pub fn new(commands: Vec<Box<dyn Command>>) -> Self {
        for (i, later) in commands.iter().enumerate() {
            for earlier in &commands[..i] {
                assert!(
                    !earlier.matches(later.name()),
                    "command `{}` is unreachable: its name is claimed by `{}` registered first",
                    later.name(),
                    earlier.name(),
                );
            }
        }
        Self { commands }
    }

    /// First registered command claiming the input, if any.
    pub fn find(&self, input: &str) -> Option<&dyn Command> {
        self.commands
            .iter()
            .find(|c| c.matches(input))
            .map(|c| c.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Command> {
        self.commands.iter().map(|c| c.as_ref())
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// All verbs (names + trimmed aliases), for shell completion.
    pub fn verbs(&self) -> Vec<String> {
        let mut verbs: Vec<String> = Vec::new();
        for command in self.iter() {
            verbs.push(command.name().to_string());
            for alias in command.aliases() {
                let verb = alias.trim_end().to_string();
                if !verbs.contains(&verb) {
                    verbs.push(verb);
                }
            }
        }
        verbs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::CommandResult;

    struct Stub {
        name: &'static str,
        aliases: &'static [&'static str],
    }

    impl Command for Stub {
        fn name(&self) -> &'static str {
            self.name
        }
        fn aliases(&self) -> &'static [&'static str] {
            self.aliases
        }
        fn description(&self) -> &'static str {
            "stub"
        }
        fn category(&self) -> Category {
            Category::Other
        }
        fn execute(
            &self,
            _ctx: &mut CommandContext<'_>,
            _raw: &str,
            _args: &[&str],
        ) -> CommandResult {
            CommandResult::output(self.name)
        }
    }

    #[test]
    fn matches_name_exactly_case_insensitive() {
        let cmd = Stub {
            name: "companies",
            aliases: &[],
        };
        assert!(cmd.matches("companies"));
        assert!(cmd.matches("  COMPANIES  "));
        assert!(!cmd.matches("companies ltd"));
        assert!(!cmd.matches("companie"));
    }

    #[test]
    fn trailing_space_alias_claims_argument_forms() {
        let cmd = Stub {
            name: "cowsay",
            aliases: &["cowsay "],
        };
        assert!(cmd.matches("cowsay"));
        assert!(cmd.matches("cowsay hello world"));
        assert!(!cmd.matches("cowsays hello"));
    }

    #[test]
    fn bare_alias_claims_exact_and_argument_forms() {
        let cmd = Stub {
            name: "search",
            aliases: &["grep"],
        };
        assert!(cmd.matches("grep"));
        assert!(cmd.matches("grep rust"));
        assert!(!cmd.matches("grepx"));
    }

    #[test]
    fn composite_alias_does_not_claim_its_prefix() {
        let piped = Stub {
            name: "fortune | cowsay",
            aliases: &[],
        };
        assert!(piped.matches("fortune | cowsay"));
        assert!(!piped.matches("fortune"));
    }

    #[test]
    fn registry_returns_first_match_in_registration_order() {
        let registry = CommandRegistry::new(vec![
            Box::new(Stub {
                name: "fortune | cowsay",
                aliases: &[],
            }),
            Box::new(Stub {
                name: "fortune",
                aliases: &[],
            }),
        ]);
        let hit = registry.find("fortune | cowsay").unwrap();
        assert_eq!(hit.name(), "fortune | cowsay");
        let hit = registry.find("fortune").unwrap();
        assert_eq!(hit.name(), "fortune");
    }

    #[test]
    #[should_panic(expected = "unreachable")]
    fn registry_rejects_shadowed_names() {
        // "fortune" registered first claims "fortune <anything>", which
        // makes a later "fortune | cowsay" unreachable.
        let _ = CommandRegistry::new(vec![
            Box::new(Stub {
                name: "fortune",
                aliases: &["fortune "],
            }),
            Box::new(Stub {
                name: "fortune | cowsay",
                aliases: &[],
            }),
        ]);
    }
}
