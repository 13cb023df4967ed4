//! The interactive shell over the query engine.
//!
//! By default we use `rustyline` for line editing and tab completion.
//! A minimal stdin-based fallback exists behind `--no-default-features`.
//! The shell owns presentation only: it paints result kinds, intercepts
//! `exit`/`quit`/`clear`, and leaves every other line to the engine.

use anyhow::{anyhow, Result};
use colored::Colorize;
use pwvterm_engine::{CommandResult, QueryEngine, ResultKind};
use std::fs;
use std::io::{self, Read};
#[cfg(not(feature = "repl-rustyline"))]
use std::io::Write;
use std::path::Path;

const BANNER: &str = "PWV terminal";

pub fn run_interactive(engine: &mut QueryEngine<'_>) -> Result<()> {
    #[cfg(feature = "repl-rustyline")]
    {
        run_rustyline(engine)
    }
    #[cfg(not(feature = "repl-rustyline"))]
    {
        run_simple(engine)
    }
}

/// Run script lines and/or `-c` commands, then exit.
pub fn run_script(
    engine: &mut QueryEngine<'_>,
    script: Option<&Path>,
    commands: &[String],
    continue_on_error: bool,
    quiet: bool,
) -> Result<()> {
    let mut lines: Vec<String> = Vec::new();

    if let Some(path) = script {
        let text = if path.as_os_str() == "-" {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        } else {
            fs::read_to_string(path)?
        };
        lines.extend(text.lines().map(str::to_string));
    }
    lines.extend(commands.iter().cloned());

    for (idx, raw) in lines.iter().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with("//") {
            continue;
        }

        if !quiet {
            println!("pwvterm> {line}");
        }

        match intercept(line) {
            Some(ShellControl::Exit) => break,
            Some(ShellControl::Continue) => continue,
            None => {}
        }

        let result = engine.execute_command(line);
        let failed = result.is_error();
        render_result(&result);
        if failed && !continue_on_error {
            return Err(anyhow!(
                "script failed at line {}: {}",
                idx + 1,
                result.content
            ));
        }
    }

    Ok(())
}

/// Run a single command line and fail the process if it errored.
pub fn run_once(engine: &mut QueryEngine<'_>, line: &str) -> Result<()> {
    let result = engine.execute_command(line);
    let failed = result.is_error();
    render_result(&result);
    if failed {
        return Err(anyhow!("command failed"));
    }
    Ok(())
}

enum ShellControl {
    Continue,
    Exit,
}

/// Shell-level verbs the engine never sees.
fn intercept(line: &str) -> Option<ShellControl> {
    match line.to_lowercase().as_str() {
        "exit" | "quit" => Some(ShellControl::Exit),
        "clear" => {
            print!("\x1b[2J\x1b[1;1H");
            Some(ShellControl::Continue)
        }
        _ => None,
    }
}

fn render_result(result: &CommandResult) {
    match result.kind {
        ResultKind::Output => println!("{}", result.content),
        ResultKind::Info => println!("{}", result.content.yellow()),
        ResultKind::Error => eprintln!("{} {}", "error:".red().bold(), result.content),
        ResultKind::Empty => {}
        ResultKind::ShowPost => {
            println!("{}", result.content);
            if let Some(nav) = result.navigate.as_ref() {
                println!("{}", format!("→ {}", nav.url).cyan());
            }
        }
    }
}

#[cfg(not(feature = "repl-rustyline"))]
fn run_simple(engine: &mut QueryEngine<'_>) -> Result<()> {
    println!("{}", BANNER.green().bold());
    println!("Type `help` for commands. Type `exit` to quit.\n");

    let stdin = io::stdin();
    loop {
        print!("{}", "pwvterm> ".cyan().bold());
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            break;
        }

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match intercept(line) {
            Some(ShellControl::Exit) => break,
            Some(ShellControl::Continue) => continue,
            None => {}
        }

        render_result(&engine.execute_command(line));
    }

    Ok(())
}

#[cfg(feature = "repl-rustyline")]
fn run_rustyline(engine: &mut QueryEngine<'_>) -> Result<()> {
    use rustyline::error::ReadlineError;
    use rustyline::Editor;

    println!("{}", BANNER.green().bold());
    println!("Tab-completion enabled. Type `help` for commands. Type `exit` to quit.\n");

    let helper = ShellHelper::new(completion_data(engine));
    let mut rl: Editor<ShellHelper, rustyline::history::DefaultHistory> =
        Editor::new().map_err(|e| anyhow!("failed to init rustyline: {e}"))?;
    rl.set_helper(Some(helper));

    loop {
        let line = match rl.readline("pwvterm> ") {
            Ok(l) => l,
            Err(ReadlineError::Eof) => break,
            Err(ReadlineError::Interrupted) => continue,
            Err(e) => return Err(anyhow!("readline error: {e}")),
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        rl.add_history_entry(line)
            .map_err(|e| anyhow!("failed to record history: {e}"))?;

        match intercept(line) {
            Some(ShellControl::Exit) => break,
            Some(ShellControl::Continue) => continue,
            None => {}
        }

        render_result(&engine.execute_command(line));
    }

    Ok(())
}

// =============================================================================
// Tab completion (rustyline)
// =============================================================================

#[cfg(feature = "repl-rustyline")]
#[derive(Default, Debug, Clone)]
struct CompletionData {
    verbs: Vec<String>,
    showcase_kinds: Vec<String>,
    names: Vec<String>,
}

/// Built once per session; the corpus is immutable after load, so there
/// is nothing to refresh.
#[cfg(feature = "repl-rustyline")]
fn completion_data(engine: &QueryEngine<'_>) -> CompletionData {
    use std::collections::BTreeSet;

    let mut verbs = engine.registry().verbs();
    for legacy in [
        "help",
        "?",
        "showcase",
        "timeline",
        "connections",
        "connect",
        "clear",
        "exit",
        "quit",
    ] {
        if !verbs.iter().any(|v| v == legacy) {
            verbs.push(legacy.to_string());
        }
    }

    let corpus = engine.corpus();
    let mut names: BTreeSet<String> = BTreeSet::new();
    for index in [
        &corpus.entities.companies,
        &corpus.entities.investors,
        &corpus.entities.people,
        &corpus.entities.topics,
    ] {
        names.extend(index.keys().cloned());
    }

    CompletionData {
        verbs,
        showcase_kinds: ["random", "company", "investor", "person", "topic"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        names: names.into_iter().take(512).collect(),
    }
}

#[cfg(feature = "repl-rustyline")]
struct ShellHelper {
    data: CompletionData,
}

#[cfg(feature = "repl-rustyline")]
impl ShellHelper {
    fn new(data: CompletionData) -> Self {
        Self { data }
    }

    fn pairs_from_prefix(items: &[String], prefix: &str) -> Vec<rustyline::completion::Pair> {
        let mut pairs = Vec::new();
        for item in items {
            if item.starts_with(prefix) {
                pairs.push(rustyline::completion::Pair {
                    display: item.clone(),
                    replacement: item.clone(),
                });
            }
        }
        pairs
    }
}

#[cfg(feature = "repl-rustyline")]
impl rustyline::Helper for ShellHelper {}

#[cfg(feature = "repl-rustyline")]
impl rustyline::highlight::Highlighter for ShellHelper {}

#[cfg(feature = "repl-rustyline")]
impl rustyline::hint::Hinter for ShellHelper {
    type Hint = String;
    fn hint(&self, _line: &str, _pos: usize, _ctx: &rustyline::Context<'_>) -> Option<String> {
        None
    }
}

#[cfg(feature = "repl-rustyline")]
impl rustyline::validate::Validator for ShellHelper {}

#[cfg(feature = "repl-rustyline")]
impl rustyline::completion::Completer for ShellHelper {
    type Candidate = rustyline::completion::Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Self::Candidate>)> {
        let start = line[..pos]
            .rfind(|c: char| c.is_whitespace())
            .map(|i| i + 1)
            .unwrap_or(0);
        let word = &line[start..pos];
        let tokens: Vec<&str> = line[..start].split_whitespace().collect();

        let candidates = match tokens.as_slice() {
            // First token: command completion.
            [] => Self::pairs_from_prefix(&self.data.verbs, word),
            ["showcase"] => {
                let mut out = Self::pairs_from_prefix(&self.data.showcase_kinds, word);
                out.extend(Self::pairs_from_prefix(&self.data.names, word));
                out
            }
            ["timeline"] | ["connections"] | ["connect"] | ["showcase", _] => {
                Self::pairs_from_prefix(&self.data.names, word)
            }
            _ => Vec::new(),
        };

        Ok((start, candidates))
    }
}
