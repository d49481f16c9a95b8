// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;

use scriptorium::app_config::{self, Config};
use scriptorium::app_controller::{Controller, TranslateRequest};
use scriptorium::server::Server;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

/// A glossary to load at startup: `NAME=PATH`, or `PATH` to name it after the file
#[derive(Debug, Clone)]
struct GlossarySource {
    name: Option<String>,
    path: PathBuf,
}

fn parse_glossary_source(value: &str) -> Result<GlossarySource, String> {
    match value.split_once('=') {
        Some((name, path)) if !name.is_empty() && !path.is_empty() => Ok(GlossarySource {
            name: Some(name.to_string()),
            path: PathBuf::from(path),
        }),
        Some(_) => Err(format!("expected NAME=PATH, got '{}'", value)),
        None => Ok(GlossarySource { name: None, path: PathBuf::from(value) }),
    }
}

/// Glossaries loaded before a command runs
#[derive(clap::Args, Debug, Clone, Default)]
struct GlossaryArgs {
    /// Glossary document to load, as NAME=PATH or PATH (repeatable)
    #[arg(short, long = "glossary", value_name = "NAME=PATH", value_parser = parse_glossary_source)]
    glossaries: Vec<GlossarySource>,

    /// Directory whose documents are all loaded, one glossary per file
    #[arg(long, value_name = "DIR")]
    glossary_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve line-delimited JSON requests on stdin/stdout
    Serve {
        #[command(flatten)]
        glossaries: GlossaryArgs,
    },

    /// Match glossary terminology against a text
    Translate {
        /// Text to check
        #[arg(value_name = "TEXT")]
        text: String,

        /// Domain hint recorded in the result notes
        #[arg(long)]
        context: Option<String>,

        /// Glossary to match, in precedence order (default: every loaded glossary)
        #[arg(short, long = "use", value_name = "NAME")]
        use_glossaries: Vec<String>,

        #[command(flatten)]
        glossaries: GlossaryArgs,
    },

    /// Search a term across every loaded glossary
    Search {
        /// Term to look for in originals and translations
        #[arg(value_name = "TERM")]
        term: String,

        /// Only entries whose context contains this
        #[arg(long)]
        context_filter: Option<String>,

        #[command(flatten)]
        glossaries: GlossaryArgs,
    },

    /// Print the text extracted from a document
    Extract {
        /// Document or scanned image
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Load glossaries and list their names and sizes
    Glossaries {
        #[command(flatten)]
        glossaries: GlossaryArgs,
    },

    /// Generate shell completions for scriptorium
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Scriptorium - terminology assistant for translators of early-modern texts
#[derive(Parser, Debug)]
#[command(name = "scriptorium")]
#[command(version)]
#[command(about = "Glossary matching and OCR cleanup for early-modern translation work")]
#[command(long_about = "Scriptorium extracts text from glossary documents and scanned facsimiles,
keeps named glossaries of historical terms, and reports which terms occur in a text.

EXAMPLES:
    scriptorium translate -g bible=terms.txt \"The LORD is my shepherd\"
    scriptorium search you --glossary-dir glossaries/
    scriptorium extract folio-12.png
    scriptorium serve -g legal=legal.docx
    scriptorium completions bash > scriptorium.bash

CONFIGURATION:
    Configuration is stored in conf.json by default. If the file does not
    exist, a default one is created. External converters (pdftotext, pandoc,
    tesseract) and the OCR language are set there.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json", global = true)]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation, writes to stderr only
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color and label for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("1;31", "ERROR"),
            Level::Warn => ("1;33", "WARN "),
            Level::Info => ("1;32", "INFO "),
            Level::Debug => ("1;36", "DEBUG"),
            Level::Trace => ("1;35", "TRACE"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (color, label) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "\x1B[{}m{} {} {}\x1B[0m", color, now, label, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // The level is lowered or raised once the config is known
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "scriptorium", &mut std::io::stdout());
        return Ok(());
    }

    let config = load_config(&cli)?;
    let controller = Controller::with_config(config);

    match cli.command {
        Commands::Serve { glossaries } => {
            load_startup_glossaries(&controller, &glossaries).await?;
            Server::new(controller).run_stdio().await?;
        }
        Commands::Translate { text, context, use_glossaries, glossaries } => {
            load_startup_glossaries(&controller, &glossaries).await?;
            run_translate(&controller, text, context, use_glossaries)?;
        }
        Commands::Search { term, context_filter, glossaries } => {
            load_startup_glossaries(&controller, &glossaries).await?;
            let matches = controller.search_terminology(&term, context_filter.as_deref());
            if matches.is_empty() {
                info!("No glossary entry matches '{}'", term);
            }
            println!("{}", serde_json::to_string_pretty(&matches)?);
        }
        Commands::Extract { file } => {
            let extracted = controller
                .extract_text(&file)
                .await
                .with_context(|| format!("Failed to extract text from {}", file.display()))?;
            println!("{}", extracted.text);
        }
        Commands::Glossaries { glossaries } => {
            load_startup_glossaries(&controller, &glossaries).await?;
            println!("{}", serde_json::to_string_pretty(&controller.glossaries())?);
        }
        Commands::Completions { .. } => {}
    }

    Ok(())
}

fn load_config(cli: &CommandLineOptions) -> Result<Config> {
    if let Some(level) = &cli.log_level {
        let level: app_config::LogLevel = level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let (mut config, created) = Config::load_or_create(&cli.config_path)?;
    if created {
        warn!("Config file not found at '{}', created default config.", cli.config_path);
    }

    // Command line wins over the config file
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone().into();
    }

    config.validate().context("Configuration validation failed")?;
    log::set_max_level(config.log_level.to_level_filter());

    Ok(config)
}

async fn load_startup_glossaries(controller: &Controller, args: &GlossaryArgs) -> Result<()> {
    if let Some(dir) = &args.glossary_dir {
        let report = controller.load_glossary_dir(dir).await?;
        for (path, reason) in &report.failed {
            warn!("Could not load {}: {}", path.display(), reason);
        }
    }

    for source in &args.glossaries {
        let name = source
            .name
            .clone()
            .unwrap_or_else(|| scriptorium::file_utils::FileManager::glossary_name_for(&source.path));
        controller
            .load_glossary(&source.path, Some(&name))
            .await
            .map_err(|e| anyhow!("Failed to load glossary '{}': {}", name, e))?;
    }

    Ok(())
}

fn run_translate(
    controller: &Controller,
    text: String,
    context: Option<String>,
    use_glossaries: Vec<String>,
) -> Result<()> {
    let use_glossaries = if use_glossaries.is_empty() {
        controller.store().list().into_iter().map(|(name, _)| name).collect()
    } else {
        use_glossaries
    };

    let request = TranslateRequest { text, context, use_glossaries };

    let progress_bar = ProgressBar::new(100);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    progress_bar.set_style(style);
    progress_bar.set_message("Matching terminology");

    let result = controller.translate_text(&request, &progress_bar);
    progress_bar.finish_and_clear();

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
