// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

use crate::app_config::{Config, Formality, ProviderKind};
use crate::file_utils::FileManager;
use crate::glossary::GlossaryStore;
use crate::resolver::TranslationResolver;

mod app_config;
mod errors;
mod extraction;
mod file_utils;
mod glossary;
mod history;
mod providers;
mod resolver;

/// CLI wrapper for ProviderKind to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliProviderKind {
    Gemini,
    OpenRouter,
}

impl From<CliProviderKind> for ProviderKind {
    fn from(cli_provider: CliProviderKind) -> Self {
        match cli_provider {
            CliProviderKind::Gemini => ProviderKind::Gemini,
            CliProviderKind::OpenRouter => ProviderKind::OpenRouter,
        }
    }
}

/// CLI wrapper for Formality to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliFormality {
    Formal,
    Neutral,
    Informal,
}

impl From<CliFormality> for Formality {
    fn from(cli_formality: CliFormality) -> Self {
        match cli_formality {
            CliFormality::Formal => Formality::Formal,
            CliFormality::Neutral => Formality::Neutral,
            CliFormality::Informal => Formality::Informal,
        }
    }
}

/// CLI wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LevelFilter {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
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
    /// Translate English text to Runyakitara (default command)
    Translate(TranslateArgs),

    /// Manage the phrase glossary consulted before any provider call
    Glossary {
        #[command(subcommand)]
        action: GlossaryAction,
    },

    /// View or update the stored configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions for omuvunuzi
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand, Debug)]
enum GlossaryAction {
    /// Add or replace a phrase translation
    Add {
        /// English phrase
        english: String,
        /// Runyakitara translation
        runyakitara: String,
    },

    /// Remove a phrase
    Remove {
        /// English phrase
        english: String,
    },

    /// List all known phrases
    List,
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Update configuration values and save the file
    Set {
        /// API key for the active provider
        #[arg(long)]
        api_key: Option<String>,

        /// Model identifier
        #[arg(long)]
        model: Option<String>,

        /// Translation provider
        #[arg(long, value_enum)]
        provider: Option<CliProviderKind>,

        /// Default formality for translations
        #[arg(long, value_enum)]
        formality: Option<CliFormality>,

        /// Service endpoint URL override
        #[arg(long)]
        endpoint: Option<String>,
    },

    /// Print the stored configuration (API key masked)
    Show,
}

#[derive(Parser, Debug)]
struct TranslateArgs {
    /// English text to translate
    #[arg(value_name = "TEXT")]
    text: Option<String>,

    /// Read the English text from a file instead
    /// (e.g. the output of a transcription tool)
    #[arg(short, long, value_name = "FILE", conflicts_with = "text")]
    input: Option<PathBuf>,

    /// Formality of the translation
    #[arg(short = 'F', long, value_enum)]
    formality: Option<CliFormality>,

    /// Translation provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliProviderKind>,

    /// Model name to use for translation
    #[arg(short, long)]
    model: Option<String>,

    /// Write the result to a file as a labeled source/translation pair
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long)]
    config_path: Option<PathBuf>,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// Omuvunuzi - English to Runyakitara translator
///
/// Resolves text from a user-maintained glossary first and falls back to
/// an AI provider (Gemini or OpenRouter) for everything else.
#[derive(Parser, Debug)]
#[command(name = "omuvunuzi")]
#[command(version)]
#[command(about = "AI-assisted English to Runyakitara translation")]
#[command(long_about = "Omuvunuzi translates English text to Runyakitara. Known phrases are
answered from a local glossary; everything else is sent to the configured
AI provider and the translation is extracted from the model's response.

EXAMPLES:
    omuvunuzi \"thank you\"                       # Translate a phrase
    omuvunuzi -F informal \"good evening\"        # Informal tone
    omuvunuzi -i transcript.txt -o result.txt   # File in, labeled pair out
    omuvunuzi glossary add \"hello\" \"oraire gye\" # Teach a phrase
    omuvunuzi config set --api-key sk-or-...    # Store the API key
    omuvunuzi completions bash                  # Generate bash completions

CONFIGURATION:
    Configuration and the glossary live under the user config directory
    by default. A default config file is created on first run.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    translate: TranslateArgs,
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

    // @returns: ANSI color code for log level
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
            let _ = writeln!(
                stderr,
                "{}{} {:5} {}\x1B[0m",
                color,
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default;
    // the level is updated after CLI parsing and config loading
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "omuvunuzi", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Glossary { action }) => run_glossary(action),
        Some(Commands::Config { action }) => run_config(action),
        Some(Commands::Translate(args)) => run_translate(args).await,
        None => run_translate(cli.translate).await,
    }
}

async fn run_translate(options: TranslateArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        log::set_max_level(cmd_log_level.clone().into());
    }

    let config_path = options
        .config_path
        .clone()
        .unwrap_or_else(Config::default_path);
    let mut config = Config::load_or_default(&config_path);

    // Override config with CLI options if provided
    if let Some(provider) = options.provider {
        config.provider = provider.into();
    }
    if let Some(model) = &options.model {
        config.model = model.clone();
    }

    // Apply the config log level unless the command line already set one
    if options.log_level.is_none() {
        let level = match config.log_level {
            app_config::LogLevel::Error => LevelFilter::Error,
            app_config::LogLevel::Warn => LevelFilter::Warn,
            app_config::LogLevel::Info => LevelFilter::Info,
            app_config::LogLevel::Debug => LevelFilter::Debug,
            app_config::LogLevel::Trace => LevelFilter::Trace,
        };
        log::set_max_level(level);
    }

    config.validate().context("Configuration validation failed")?;

    let source_text = match (&options.text, &options.input) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => FileManager::read_to_string(path)?,
        (None, None) => {
            return Err(anyhow!("Nothing to translate: pass TEXT or --input FILE"));
        }
    };

    let formality = options
        .formality
        .map(Formality::from)
        .unwrap_or(config.formality);

    let resolver = TranslationResolver::new(&config)?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(format!("Translating with {}...", resolver.provider_name()));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = resolver.resolve(&source_text, formality).await;
    spinner.finish_and_clear();

    let resolution = result.context("Translation failed")?;

    if let crate::resolver::ResolutionOrigin::Provider { degraded: true } = resolution.origin {
        warn!("Could not isolate a clean translation; showing the full response");
    }

    println!("{}", resolution.text);

    if let Some(output_path) = &options.output {
        resolver.save_translation(output_path, source_text.trim(), &resolution.text)?;
    }

    Ok(())
}

fn run_glossary(action: GlossaryAction) -> Result<()> {
    let config = Config::load_or_default(Config::default_path());
    let glossary = GlossaryStore::load(config.glossary_path());

    match action {
        GlossaryAction::Add { english, runyakitara } => {
            glossary.add(&english, &runyakitara)?;
            info!("Added '{}' -> '{}'", english.trim().to_lowercase(), runyakitara.trim());
        }
        GlossaryAction::Remove { english } => {
            if glossary.remove(&english)? {
                info!("Removed '{}'", english.trim().to_lowercase());
            } else {
                warn!("No glossary entry for '{}'", english.trim().to_lowercase());
            }
        }
        GlossaryAction::List => {
            if glossary.is_empty() {
                println!("(glossary is empty)");
            }
            for (english, runyakitara) in glossary.entries() {
                println!("{} -> {}", english, runyakitara);
            }
        }
    }

    Ok(())
}

fn run_config(action: ConfigAction) -> Result<()> {
    let config_path = Config::default_path();
    let mut config = Config::load_or_default(&config_path);

    match action {
        ConfigAction::Set {
            api_key,
            model,
            provider,
            formality,
            endpoint,
        } => {
            if let Some(api_key) = api_key {
                config.api_key = api_key;
            }
            if let Some(model) = model {
                config.model = model;
            }
            if let Some(provider) = provider {
                config.provider = provider.into();
            }
            if let Some(formality) = formality {
                config.formality = formality.into();
            }
            if let Some(endpoint) = endpoint {
                config.endpoint = endpoint;
            }

            config.save(&config_path)?;
            info!("Configuration saved to {:?}", config_path);
        }
        ConfigAction::Show => {
            println!("provider:  {}", config.provider);
            println!("model:     {}", config.get_model());
            println!("endpoint:  {}", config.get_endpoint());
            println!("formality: {}", config.formality);
            println!("api key:   {}", mask_key(&config.api_key));
            println!("glossary:  {}", config.glossary_path().display());
            println!("history:   {} entries", config.history_size);
        }
    }

    Ok(())
}

/// Mask an API key for display, keeping just enough to recognize it
fn mask_key(key: &str) -> String {
    if key.is_empty() {
        "(not set)".to_string()
    } else if key.len() <= 8 {
        "********".to_string()
    } else {
        format!("{}...{}", &key[..4], &key[key.len() - 4..])
    }
}
