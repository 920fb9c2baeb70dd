// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::{Path, PathBuf};

use tscat::app_config::{self, Config};
use tscat::app_controller::Controller;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
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

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show translation progress for a catalog or every catalog in a directory
    Stats {
        /// Catalog file or directory
        #[arg(value_name = "PATH")]
        path: PathBuf,

        /// Print statistics as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check catalogs for structural and content issues
    Validate {
        /// Catalog file or directory
        #[arg(value_name = "PATH")]
        path: PathBuf,

        /// Fail on warnings too
        #[arg(long)]
        strict: bool,
    },

    /// Look up a single string the way an application would
    Lookup {
        /// Catalog file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Context (usually the UI class name)
        #[arg(short, long)]
        context: String,

        /// Source text
        #[arg(short, long)]
        source: String,

        /// Disambiguation comment
        #[arg(long)]
        comment: Option<String>,

        /// Count for numerus messages
        #[arg(short = 'n', long = "count", allow_negative_numbers = true)]
        n: Option<i64>,
    },

    /// Export a catalog as JSON
    Export {
        /// Catalog file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output file (defaults to the input name with a .json extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Force overwrite of existing output files
        #[arg(short, long)]
        force_overwrite: bool,
    },

    /// Rewrite a catalog in canonical TS form
    Normalize {
        /// Catalog file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output file (defaults to rewriting the input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Force overwrite of existing output files
        #[arg(short, long)]
        force_overwrite: bool,
    },

    /// List languages available in the configured catalog directory
    Languages,

    /// Generate shell completions for tscat
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// tscat - Qt Linguist TS catalog toolkit
///
/// Inspect, validate, export and query Qt Linguist translation catalogs.
#[derive(Parser, Debug)]
#[command(name = "tscat")]
#[command(version)]
#[command(about = "Qt Linguist TS catalog toolkit")]
#[command(long_about = "tscat reads Qt Linguist .ts catalogs and answers the questions a release needs.

EXAMPLES:
    tscat stats languages/                       # Progress for every catalog
    tscat validate --strict languages/fr.ts      # Fail on any issue
    tscat lookup fr.ts -c GMainWindow -s '&File' # Translate one string
    tscat lookup ru.ts -c GameList -s '%n game(s)' -n 5
    tscat export fr.ts -o fr.json                # JSON export
    tscat normalize -f fr.ts                     # Rewrite in canonical form
    tscat completions bash > tscat.bash          # Generate bash completions

CONFIGURATION:
    Configuration is read from conf.json in the working directory, then from
    the user configuration directory. If neither exists, a default conf.json
    is created in the working directory.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short = 'C', long, global = true)]
    config_path: Option<PathBuf>,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
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

    // @returns: ANSI colour and tag for a level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("\x1B[1;31m", "ERROR"),
            Level::Warn => ("\x1B[1;33m", "WARN "),
            Level::Info => ("\x1B[1;32m", "INFO "),
            Level::Debug => ("\x1B[1;36m", "DEBUG"),
            Level::Trace => ("\x1B[1;35m", "TRACE"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level.min(log::max_level())
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (colour, tag) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {} {}\x1B[0m", colour, now, tag, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // Initialize the logger at the most verbose level; the effective level
    // is applied through log::set_max_level once the config is known
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "tscat", &mut std::io::stdout());
        return Ok(());
    }

    if let Some(level) = cli.log_level {
        log::set_max_level(app_config::LogLevel::from(level).to_level_filter());
    }

    let config = load_config(cli.config_path.as_deref(), cli.log_level)?;
    if cli.log_level.is_none() {
        log::set_max_level(config.log_level.to_level_filter());
    }

    let controller = Controller::with_config(config)?;
    run_command(&controller, cli.command)
}

/// Load or create configuration, applying the command line log level
fn load_config(explicit: Option<&Path>, log_level: Option<CliLogLevel>) -> Result<Config> {
    let config_path = Config::locate(explicit);

    let mut config = if config_path.exists() {
        Config::from_file(&config_path)?
    } else {
        warn!("Config file not found at {:?}, creating default config.", config_path);
        let config = Config::default();
        config.save(&config_path)?;
        config
    };

    if let Some(level) = log_level {
        config.log_level = level.into();
    }

    Ok(config)
}

fn run_command(controller: &Controller, command: Commands) -> Result<()> {
    match command {
        Commands::Stats { path, json } => {
            let results = controller.stats(&path)?;
            let mut failures = 0usize;
            let mut collected = Vec::with_capacity(results.len());

            for (file, outcome) in &results {
                match outcome {
                    Ok(stats) => collected.push((file, stats)),
                    Err(e) => {
                        eprintln!("{}: {:#}", file.display(), e);
                        failures += 1;
                    }
                }
            }

            if json {
                let stats: Vec<_> = collected.iter().map(|(_, stats)| *stats).collect();
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                for (file, stats) in &collected {
                    println!("{}\n{}\n", file.display(), stats);
                }
            }

            if failures > 0 {
                return Err(anyhow!("{} of {} catalogs could not be read", failures, results.len()));
            }
        }
        Commands::Validate { path, strict } => {
            let reports = controller.validate(&path)?;
            let mut errors = 0usize;
            let mut warnings = 0usize;

            for (file, outcome) in &reports {
                match outcome {
                    Ok(report) => {
                        for issue in &report.issues {
                            println!("{}: {}", file.display(), issue);
                        }
                        errors += report.errors().count();
                        warnings += report.warnings().count();
                    }
                    Err(e) => {
                        println!("{}: error: {:#}", file.display(), e);
                        errors += 1;
                    }
                }
            }

            info!("{} catalogs checked: {} errors, {} warnings", reports.len(), errors, warnings);
            if errors > 0 || (strict && warnings > 0) {
                return Err(anyhow!("Validation failed: {} errors, {} warnings", errors, warnings));
            }
        }
        Commands::Lookup { file, context, source, comment, n } => {
            let outcome = controller.lookup(&file, &context, &source, comment.as_deref(), n)?;
            println!("{}", outcome.text);
        }
        Commands::Export { file, output, force_overwrite } => {
            let written = controller.export_json(&file, output, force_overwrite)?;
            info!("Success: {:?}", written);
        }
        Commands::Normalize { file, output, force_overwrite } => {
            let written = controller.normalize(&file, output, force_overwrite)?;
            info!("Success: {:?}", written);
        }
        Commands::Languages => {
            let languages = controller.languages();
            if languages.is_empty() {
                warn!("No catalogs found in {:?}", controller.config().catalogs.dir);
            }
            for language in languages {
                let name = tscat::get_language_name(&language).unwrap_or_else(|_| "unknown".to_string());
                println!("{}\t{}", language, name);
            }
        }
        Commands::Completions { .. } => {}
    }

    Ok(())
}
