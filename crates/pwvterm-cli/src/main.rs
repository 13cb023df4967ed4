//! PWV terminal CLI
//!
//! A faux terminal over the pre-extracted blog corpus: list companies,
//! investors, people and topics, open posts, and poke at quotes, facts
//! and the portfolio listing. Runs interactively by default; `repl
//! --script`/`-c` and `exec` exist for scripted use.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pwvterm_corpus::{Corpus, PortfolioBook};
use pwvterm_engine::QueryEngine;
use std::path::PathBuf;

mod repl;

#[derive(Parser)]
#[command(name = "pwvterm")]
#[command(author, version, about = "PWV terminal: query the extracted blog corpus")]
struct Cli {
    /// Corpus JSON produced by the extraction pipeline.
    #[arg(long, value_name = "FILE")]
    corpus: PathBuf,

    /// Portfolio listing JSON. Without it the portfolio commands report
    /// an empty listing rather than failing.
    #[arg(long, value_name = "FILE")]
    portfolio: Option<PathBuf>,

    /// Render width in columns.
    #[arg(long, default_value_t = 80)]
    width: usize,

    /// Fixed seed for the random-pick commands (fortune, showcase random).
    #[arg(long)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive shell (the default when no subcommand is given).
    Repl {
        /// Run commands from a file (`-` for stdin), then exit.
        #[arg(long, value_name = "FILE")]
        script: Option<PathBuf>,

        /// Run one command (repeatable), after any script lines.
        #[arg(short = 'c', long = "command")]
        commands: Vec<String>,

        /// Keep going when a scripted command errors.
        #[arg(long)]
        continue_on_error: bool,

        /// Suppress echoing of scripted commands.
        #[arg(long)]
        quiet: bool,
    },

    /// Run a single command and exit non-zero if it errors.
    Exec {
        /// The command line, e.g. `pwvterm --corpus c.json exec showcase random`.
        #[arg(required = true, trailing_var_arg = true)]
        line: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let corpus = Corpus::load(&cli.corpus)
        .with_context(|| format!("loading corpus from {}", cli.corpus.display()))?;
    let portfolio = match cli.portfolio.as_ref() {
        Some(path) => PortfolioBook::load(path)
            .with_context(|| format!("loading portfolio from {}", path.display()))?,
        None => PortfolioBook::default(),
    };

    let mut engine = QueryEngine::new(&corpus, &portfolio);
    engine.set_width(cli.width);
    if let Some(seed) = cli.seed {
        engine.seed_rng(seed);
    }

    match cli.command {
        None => repl::run_interactive(&mut engine),
        Some(Commands::Repl {
            script,
            commands,
            continue_on_error,
            quiet,
        }) => {
            if script.is_none() && commands.is_empty() {
                repl::run_interactive(&mut engine)
            } else {
                repl::run_script(
                    &mut engine,
                    script.as_deref(),
                    &commands,
                    continue_on_error,
                    quiet,
                )
            }
        }
        Some(Commands::Exec { line }) => repl::run_once(&mut engine, &line.join(" ")),
    }
}
