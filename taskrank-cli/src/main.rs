use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use taskrank_core::{
    Analysis, Analyzer, Cycle, PriorityBand, ScoredTask, SortStrategy, Suggestions,
    DEFAULT_SUGGESTIONS, today_in,
};

mod config;
mod input;
mod logging;
mod state;

use config::Config;
use input::InputFormat;
use logging::LogLevel;

#[derive(Parser, Debug)]
#[command(
    name = "taskrank",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("TASKRANK_BUILD_SHA"), ")"),
    about = "Rank tasks by urgency, importance, effort and dependencies"
)]
struct Cli {
    /// Log level (overrides TASKRANK_LOG)
    #[arg(long, global = true, value_enum)]
    log_level: Option<LogLevel>,

    #[command(subcommand)]
    command: Command,
}

/// Where the tasks come from and which day to score them against.
#[derive(clap::Args, Debug)]
struct InputArgs {
    /// Task file (JSON or CSV). Reads stdin when omitted or `-`.
    #[arg(long, short)]
    input: Option<PathBuf>,

    /// Input format (default: from file extension, JSON for stdin)
    #[arg(long, value_enum)]
    format: Option<InputFormat>,

    /// Evaluation date, YYYY-MM-DD (default: today in the configured timezone)
    #[arg(long)]
    today: Option<NaiveDate>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score and rank every task, and report dependency cycles
    Analyze {
        #[command(flatten)]
        input: InputArgs,

        /// Re-order the ranking: smart, fastest, impact, deadline
        #[arg(long)]
        strategy: Option<SortStrategy>,

        /// Limit number of tasks printed
        #[arg(long)]
        limit: Option<usize>,

        /// Print the full analysis as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Explain the top-ranked tasks
    Suggest {
        #[command(flatten)]
        input: InputArgs,

        /// Number of suggestions
        #[arg(long, default_value_t = DEFAULT_SUGGESTIONS)]
        limit: usize,

        /// Print suggestions as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Scoring configuration (~/.taskrank/config.toml)
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config file if none exists
    Init,
    /// Print the effective config
    Show,
    /// Print the config file path
    Path,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.log_level)?;

    match cli.command {
        Command::Analyze {
            input,
            strategy,
            limit,
            json,
        } => {
            let cfg = config::load_config()?;
            let strategy = strategy.unwrap_or(cfg.general.default_strategy);
            let mut analysis = run_analysis(&input, &cfg)?;
            strategy.apply(&mut analysis.sorted);
            if let Some(n) = limit {
                analysis.sorted.truncate(n);
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&analysis)?);
            } else {
                print_analysis(&analysis, strategy);
            }
        }

        Command::Suggest { input, limit, json } => {
            let cfg = config::load_config()?;
            let tasks = input::load_tasks(input.input.as_deref(), input.format)?;
            let today = resolve_today(input.today, &cfg)?;
            let suggestions = Analyzer::new(cfg.scoring).suggest(&tasks, Some(today), limit);

            if json {
                println!("{}", serde_json::to_string_pretty(&suggestions)?);
            } else {
                print_suggestions(&suggestions);
            }
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => config::show_config()?,
            ConfigCommand::Path => println!("{}", config::config_path()?.display()),
        },
    }

    Ok(())
}

fn resolve_today(flag: Option<NaiveDate>, cfg: &Config) -> Result<NaiveDate> {
    match flag {
        Some(d) => Ok(d),
        None => today_in(&cfg.general.timezone)
            .with_context(|| format!("config [general].timezone = {:?}", cfg.general.timezone)),
    }
}

fn run_analysis(input: &InputArgs, cfg: &Config) -> Result<Analysis> {
    let tasks = input::load_tasks(input.input.as_deref(), input.format)?;
    let today = resolve_today(input.today, cfg)?;
    Ok(Analyzer::new(cfg.scoring).analyze(&tasks, Some(today)))
}

fn task_line(t: &ScoredTask) -> String {
    format!(
        "[{:<6}] {:>7.2} | {} | {}",
        PriorityBand::from_score(t.score).label(),
        t.score,
        t.id,
        t.title.as_deref().unwrap_or("(untitled)")
    )
}

fn cycle_line(c: &Cycle) -> String {
    c.ids()
        .iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}

fn print_cycles(cycles: &[Cycle]) {
    if cycles.is_empty() {
        return;
    }
    println!("\nDependency cycles detected:");
    for c in cycles {
        println!("  {}", cycle_line(c));
    }
}

fn print_analysis(analysis: &Analysis, strategy: SortStrategy) {
    println!("# {} tasks (strategy: {})\n", analysis.sorted.len(), strategy);
    for t in &analysis.sorted {
        println!("{}", task_line(t));
    }
    print_cycles(&analysis.cycles);
}

fn print_suggestions(s: &Suggestions) {
    println!("# Top {} tasks\n", s.top.len());
    for (i, sug) in s.top.iter().enumerate() {
        println!("{}. {}", i + 1, task_line(&sug.task));
        println!("   {}", sug.explanation);
    }
    print_cycles(&s.cycles);
}
