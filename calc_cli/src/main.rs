//! # Calcdeck CLI
//!
//! Terminal host for the calculator catalog. Browse the catalog, inspect a
//! calculator, run one from arguments or interactively, or use the
//! general-purpose calculator with history.
//!
//! ```text
//! calcdeck list --category health
//! calcdeck show body-fat
//! calcdeck run discount -s price=200 -s percent=25
//! calcdeck run password -s length=24 --copy
//! calcdeck page median
//! calcdeck basic
//! ```

mod clipboard;
mod render;
mod repl;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueHint};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use calc_core::calculators::{self, Category};
use calc_core::history::History;
use calc_core::{BasicCalculator, Page, Settings};

#[derive(Parser, Debug)]
#[command(author, version, about = "Calcdeck calculator catalog", long_about = None)]
struct Cli {
    /// Settings file (defaults to <config dir>/calcdeck/settings.toml)
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,

    /// Debug logging on stderr
    #[arg(short, long, global = true, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List calculators, optionally for one category
    List(ListArgs),
    /// Show the fields, constraints and formula of a calculator
    Show {
        slug: String,
    },
    /// Fill, validate and compute a calculator in one go
    Run(RunArgs),
    /// Fill and compute a calculator interactively
    Page {
        slug: String,

        /// Seed for random generators
        #[arg(long)]
        seed: Option<u64>,
    },
    /// General-purpose calculator with history
    Basic,
    /// Print the effective settings as TOML
    Config {
        /// Also write them to the settings file
        #[arg(long, action = ArgAction::SetTrue)]
        write: bool,
    },
}

#[derive(Parser, Debug)]
struct ListArgs {
    /// Category key (math, finance, health, conversion, text, random)
    #[arg(short, long)]
    category: Option<String>,
}

#[derive(Parser, Debug)]
struct RunArgs {
    slug: String,

    /// Field value as name=value (repeatable)
    #[arg(short = 's', long = "set", value_name = "NAME=VALUE")]
    values: Vec<String>,

    /// Print the result as JSON
    #[arg(long, action = ArgAction::SetTrue)]
    json: bool,

    /// Copy the result to the clipboard
    #[arg(long, action = ArgAction::SetTrue)]
    copy: bool,

    /// Seed for random generators
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let settings = Settings::load_or_default(cli.config.as_deref()).context("failed to load settings")?;
    debug!(?settings, "settings in effect");

    match cli.command {
        Command::List(args) => handle_list(args),
        Command::Show { slug } => handle_show(&slug),
        Command::Run(args) => handle_run(args, &settings),
        Command::Page { slug, seed } => handle_page(&slug, seed, &settings),
        Command::Basic => handle_basic(&settings),
        Command::Config { write } => handle_config(cli.config, write, &settings),
    }
}

/// Seeded generator when a seed is configured, thread RNG otherwise.
fn make_rng(seed: Option<u64>, settings: &Settings) -> Box<dyn RngCore> {
    match seed.or(settings.random.seed) {
        Some(seed) => {
            debug!(seed, "using seeded RNG");
            Box::new(StdRng::seed_from_u64(seed))
        }
        None => Box::new(rand::rng()),
    }
}

fn handle_list(args: ListArgs) -> Result<()> {
    let category = match args.category.as_deref() {
        Some(key) => Some(Category::from_key(key).ok_or_else(|| {
            let keys: Vec<_> = Category::ALL.iter().map(|c| c.key()).collect();
            anyhow!("unknown category '{}' (expected one of: {})", key, keys.join(", "))
        })?),
        None => None,
    };
    print!("{}", render::catalog_table(category));
    Ok(())
}

fn handle_show(slug: &str) -> Result<()> {
    let def = calculators::find(slug)?;
    print!("{}", render::calculator_details(def));
    Ok(())
}

/// Split `name=value`; the value may itself contain `=`.
fn parse_assignment(raw: &str) -> Result<(&str, &str)> {
    raw.split_once('=')
        .map(|(name, value)| (name.trim(), value))
        .filter(|(name, _)| !name.is_empty())
        .ok_or_else(|| anyhow!("expected NAME=VALUE, got '{}'", raw))
}

fn handle_run(args: RunArgs, settings: &Settings) -> Result<()> {
    let mut page = Page::open(&args.slug)?;
    for raw in &args.values {
        let (name, value) = parse_assignment(raw)?;
        page.set(name, value)?;
    }

    let mut rng = make_rng(args.seed, settings);
    let result = match page.submit(&mut *rng) {
        Ok(result) => result.clone(),
        Err(errors) => {
            for line in render::field_errors(&page, &errors) {
                eprintln!("{}", line);
            }
            bail!("{} input(s) for '{}' need attention", errors.len(), args.slug);
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        for line in page.display(&settings.presentation) {
            println!("{}", line);
        }
    }

    if args.copy {
        match page.copy_text() {
            Some(text) => {
                if clipboard::copy(&text) {
                    eprintln!("Copied to clipboard.");
                }
            }
            None => eprintln!("Nothing to copy."),
        }
    }
    Ok(())
}

fn handle_page(slug: &str, seed: Option<u64>, settings: &Settings) -> Result<()> {
    let mut page = Page::open(slug)?;
    let mut rng = make_rng(seed, settings);
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    repl::page_loop(&mut page, &settings.presentation, &mut *rng, stdin.lock(), &mut stdout)?;
    stdout.flush()?;
    Ok(())
}

fn handle_basic(settings: &Settings) -> Result<()> {
    let mut calc = BasicCalculator::with_history(History::with_capacity(settings.history.capacity));
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    repl::basic_loop(&mut calc, stdin.lock(), &mut stdout)?;
    stdout.flush()?;
    Ok(())
}

fn handle_config(path: Option<PathBuf>, write: bool, settings: &Settings) -> Result<()> {
    print!("{}", settings.to_toml()?);
    if write {
        let path = path
            .or_else(Settings::default_path)
            .ok_or_else(|| anyhow!("no config directory on this platform; pass --config"))?;
        settings
            .save(&path)
            .with_context(|| format!("failed to write {}", path.display()))?;
        eprintln!("Wrote {}", path.display());
    }
    Ok(())
}
