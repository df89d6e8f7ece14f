// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{debug, error, info, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;

use kairyou::engine::{Kairyou, PreprocessOptions};
use kairyou::file_utils::FileManager;
use kairyou::indexer::{IndexOptions, Indexer};
use kairyou::ner::gazetteer::GazetteerNer;
use kairyou::ner::{NerBackend, NerSource};
use kairyou::rule_schema::{self, RuleTable, TableInput};

/// CLI wrapper for log levels to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LevelFilter {
    fn from(level: CliLogLevel) -> Self {
        match level {
            CliLogLevel::Error => LevelFilter::Error,
            CliLogLevel::Warn => LevelFilter::Warn,
            CliLogLevel::Info => LevelFilter::Info,
            CliLogLevel::Debug => LevelFilter::Debug,
            CliLogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Preprocess Japanese text using a replacement table
    Preprocess(PreprocessArgs),

    /// Surface personal names not yet catalogued in the table or corpus
    Index(IndexArgs),

    /// Generate shell completions for kairyou
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct PreprocessArgs {
    /// Input text file to preprocess
    #[arg(value_name = "INPUT_FILE")]
    input: PathBuf,

    /// Replacement table: path to a JSON file or inline JSON
    #[arg(short, long)]
    replacements: String,

    /// Write the processed text here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Insert closing periods (。) before 」 where missing
    #[arg(long)]
    add_closing_period: bool,

    /// Extra person names for the recognizer, one per line
    #[arg(long)]
    ner_lexicon: Option<PathBuf>,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

#[derive(Parser, Debug)]
struct IndexArgs {
    /// Text to index: path to a text file, or the text itself
    #[arg(value_name = "INPUT")]
    input: String,

    /// Knowledge base: directory of .txt files, a text file, or raw text
    #[arg(short, long)]
    knowledge_base: String,

    /// Replacement table: path to a JSON file or inline JSON
    #[arg(short, long)]
    replacements: String,

    /// Entity strings to ignore entirely (repeatable)
    #[arg(short, long)]
    blacklist: Vec<String>,

    /// Print flagged names as one JSON object per line
    #[arg(long)]
    json: bool,

    /// Extra person names for the recognizer, one per line
    #[arg(long)]
    ner_lexicon: Option<PathBuf>,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// Kairyou - Japanese text preprocessor for translation
#[derive(Parser, Debug)]
#[command(name = "kairyou")]
#[command(version)]
#[command(about = "Preprocess Japanese text ahead of translation")]
#[command(long_about = "Kairyou substitutes Japanese tokens with English equivalents according \
to a replacement table, and indexes texts for personal names not yet catalogued.

EXAMPLES:
    kairyou preprocess chapter1.txt -r rules.json
    kairyou preprocess chapter1.txt -r rules.json -o chapter1.en.txt --add-closing-period
    kairyou index chapter2.txt -k corpus/ -r rules.json -b ボス")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Preprocess(args) => {
            init_logging(args.log_level)?;
            run_preprocess(args)
        }
        Commands::Index(args) => {
            init_logging(args.log_level)?;
            run_index(args)
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "kairyou", &mut std::io::stdout());
            Ok(())
        }
    }
}

fn init_logging(level: Option<CliLogLevel>) -> Result<(), SetLoggerError> {
    let level = level.map_or(LevelFilter::Info, LevelFilter::from);
    CustomLogger::init(level)
}

fn run_preprocess(args: PreprocessArgs) -> Result<()> {
    let text = FileManager::read_to_string(&args.input)?;
    let table = rule_schema::resolve_table(TableInput::from(args.replacements.as_str()))?;
    let ner = build_ner_source(&table, args.ner_lexicon.as_deref())?;

    let mut engine = Kairyou::new(ner);
    let options = PreprocessOptions {
        add_closing_period: args.add_closing_period,
        ..PreprocessOptions::default()
    };
    let outcome = engine.preprocess(
        &text,
        serde_json::Value::Object(table),
        &options,
    )?;

    match args.output {
        Some(path) => {
            std::fs::write(&path, &outcome.text)
                .with_context(|| format!("Failed to write to file: {:?}", path))?;
            info!("Processed text written to {:?}", path);
        }
        None => println!("{}", outcome.text),
    }

    info!("{}", outcome.preprocessing_log);
    if !outcome.error_log.is_empty() {
        error!("{}", outcome.error_log);
    }

    Ok(())
}

fn run_index(args: IndexArgs) -> Result<()> {
    let table = rule_schema::resolve_table(TableInput::from(args.replacements.as_str()))?;
    let ner = build_ner_source(&table, args.ner_lexicon.as_deref())?;

    let mut indexer = Indexer::new(ner);
    let options = IndexOptions {
        blacklist: args.blacklist,
        ..IndexOptions::default()
    };
    let (new_names, indexing_log) = indexer.index(
        &args.input,
        &args.knowledge_base,
        serde_json::Value::Object(table),
        &options,
    )?;

    for entry in &new_names {
        if args.json {
            println!("{}", serde_json::to_string(entry)?);
        } else {
            println!("{}\t{}", entry.name, entry.occurrence);
        }
    }
    info!("{}", indexing_log);

    Ok(())
}

/// Seeds a gazetteer recognizer from the table's own name entries, plus an
/// optional extra lexicon file; wrapped in a factory so a discarded backend
/// can be rebuilt on demand
fn build_ner_source(table: &RuleTable, lexicon: Option<&std::path::Path>) -> Result<NerSource> {
    let mut gazetteer = GazetteerNer::from_rule_table(table);

    if let Some(path) = lexicon {
        let content = FileManager::read_to_string(path)?;
        gazetteer.extend(
            content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string),
        );
    }

    debug!("gazetteer seeded with {} names", gazetteer.len());

    Ok(NerSource::new(Box::new(move || {
        Ok(Box::new(gazetteer.clone()) as Box<dyn NerBackend>)
    })))
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger { level });
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let color = Self::color_for_level(record.level());
            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {}\x1B[0m", color, now, record.args());
        }
    }

    fn flush(&self) {}
}
