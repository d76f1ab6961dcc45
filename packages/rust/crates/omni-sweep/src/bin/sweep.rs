#![allow(missing_docs)]

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use omni_sweep::{
    ContextLevel, CountFilter, CountRequest, Query, QueryKind, ReplaceRequest, Report,
    ReportRenderer, SearchRequest, SweepConfig, Sweeper, load_layered_settings,
};

#[derive(Parser, Debug)]
#[command(
    name = "sweep",
    about = "Find, replace and count text across a directory tree",
    arg_required_else_help = true
)]
struct Cli {
    /// Root directory to walk.
    #[arg(
        long,
        short = 'r',
        value_name = "DIR",
        default_value = ".",
        global = true
    )]
    root: PathBuf,

    /// Regex a file path must match to be scanned.
    #[arg(long = "files", short = 'f', value_name = "REGEX", default_value = ".", global = true)]
    path_pattern: String,

    /// Explicit settings file (YAML), applied over user and project settings.
    #[arg(long = "config", short = 'c', value_name = "FILE", global = true)]
    config_file: Option<PathBuf>,

    /// Extra directory ignore pattern (repeatable).
    #[arg(long = "ignore", value_name = "REGEX", global = true)]
    ignore: Vec<String>,

    /// Drop the configured ignore patterns before adding `--ignore` ones.
    #[arg(long, default_value_t = false, global = true)]
    no_default_ignores: bool,

    /// Case-fold the path pattern and ignore patterns.
    #[arg(long, default_value_t = false, global = true)]
    ignore_case_paths: bool,

    /// Characters of context before each match.
    #[arg(long, value_name = "N", global = true)]
    before: Option<usize>,

    /// Characters of context after each match.
    #[arg(long, value_name = "N", global = true)]
    after: Option<usize>,

    /// Stop at the first unreadable file.
    #[arg(long, default_value_t = false, global = true)]
    fail_fast: bool,

    /// Output format.
    #[arg(long, short = 'o', value_enum, default_value_t = OutputFormat::Text, global = true)]
    output: OutputFormat,

    /// Debug logging on stderr.
    #[arg(long, short = 'v', default_value_t = false, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search for a literal string or regex.
    Search {
        query: String,
        #[arg(long, default_value_t = false)]
        regex: bool,
        #[arg(long, short = 'i', default_value_t = false)]
        ignore_case: bool,
        #[arg(long, value_enum, default_value_t = ContextArg::Full)]
        context: ContextArg,
    },
    /// Replace a literal string or regex (preview unless --write).
    Replace {
        query: String,
        replacement: String,
        #[arg(long, default_value_t = false)]
        regex: bool,
        #[arg(long, short = 'i', default_value_t = false)]
        ignore_case: bool,
        /// Overwrite matching files.
        #[arg(long, default_value_t = false)]
        write: bool,
        /// Mirror the case of each match in its replacement (literal only).
        #[arg(long, default_value_t = false)]
        preserve_case: bool,
        /// Keep a timestamped copy of each file before overwriting it.
        #[arg(long, default_value_t = false)]
        backup: bool,
    },
    /// List files whose match count satisfies `<OPERATOR> <THRESHOLD>`.
    Count {
        query: String,
        /// One of <, <=, =, !=, >=, > (or ≤, ≠, ≥).
        operator: String,
        threshold: String,
        #[arg(long, default_value_t = false)]
        regex: bool,
        #[arg(long, short = 'i', default_value_t = false)]
        ignore_case: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Index,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ContextArg {
    Full,
    MatchOnly,
    None,
}

impl From<ContextArg> for ContextLevel {
    fn from(arg: ContextArg) -> Self {
        match arg {
            ContextArg::Full => Self::Full,
            ContextArg::MatchOnly => Self::MatchOnly,
            ContextArg::None => Self::None,
        }
    }
}

fn build_query(pattern: &str, regex: bool, ignore_case: bool) -> Query {
    Query {
        pattern: pattern.to_string(),
        kind: if regex {
            QueryKind::Regex
        } else {
            QueryKind::Literal
        },
        case_fold: ignore_case,
    }
}

fn resolve_config(cli: &Cli) -> SweepConfig {
    let mut config = load_layered_settings(&cli.root, cli.config_file.as_deref()).resolve();
    if cli.no_default_ignores {
        config.ignore_patterns.clear();
    }
    config.ignore_patterns.extend(cli.ignore.iter().cloned());
    if cli.ignore_case_paths {
        config.case_fold_paths = true;
    }
    if let Some(before) = cli.before {
        config.context_before = before;
    }
    if let Some(after) = cli.after {
        config.context_after = after;
    }
    if cli.fail_fast {
        config.fail_fast = true;
    }
    config
}

fn run(cli: &Cli, sweeper: &Sweeper) -> Result<Report> {
    let report = match &cli.command {
        Command::Search {
            query,
            regex,
            ignore_case,
            context,
        } => sweeper.search(&SearchRequest {
            query: build_query(query, *regex, *ignore_case),
            root: cli.root.clone(),
            path_pattern: cli.path_pattern.clone(),
            context: (*context).into(),
        })?,
        Command::Replace {
            query,
            replacement,
            regex,
            ignore_case,
            write,
            preserve_case,
            backup,
        } => sweeper.replace(&ReplaceRequest {
            query: build_query(query, *regex, *ignore_case),
            replacement: replacement.clone(),
            root: cli.root.clone(),
            path_pattern: cli.path_pattern.clone(),
            write: *write,
            preserve_case: *preserve_case,
            backup: *backup,
        })?,
        Command::Count {
            query,
            operator,
            threshold,
            regex,
            ignore_case,
        } => sweeper.count(&CountRequest {
            query: build_query(query, *regex, *ignore_case),
            filter: CountFilter::parse_parts(operator, threshold)?,
            root: cli.root.clone(),
            path_pattern: cli.path_pattern.clone(),
        })?,
    };
    Ok(report)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG overrides; --verbose => debug; else info
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if cli.verbose {
            "omni_sweep=debug,omni_io=debug"
        } else {
            "omni_sweep=info"
        })
    });
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let sweeper = Sweeper::new(resolve_config(&cli));
    let report = run(&cli, &sweeper)?;

    match cli.output {
        OutputFormat::Text => print!("{}", ReportRenderer::render_text(&report)),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&report).context("failed to serialize report")?
        ),
        OutputFormat::Index => println!(
            "{}",
            serde_json::to_string_pretty(&ReportRenderer::navigation_index(&report))
                .context("failed to serialize navigation index")?
        ),
    }
    Ok(())
}
