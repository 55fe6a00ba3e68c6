pub mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use motoquote_core::config::{AppConfig, ConfigOverrides, LoadOptions};

#[derive(Debug, Parser)]
#[command(
    name = "motoquote",
    about = "MotoQuote motor insurance quote CLI",
    long_about = "Walk through the four-step motor insurance quote wizard, then export the \
                  priced quote as a document or draft the summary email.",
    after_help = "Examples:\n  motoquote quote\n  motoquote export --output-dir ./quotes\n  motoquote email\n  motoquote config"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Path to a motoquote.toml config file")]
    config: Option<PathBuf>,
    #[arg(long, global = true, help = "Directory holding saved wizard progress")]
    data_dir: Option<PathBuf>,
    #[arg(long, global = true, help = "Log level (trace|debug|info|warn|error)")]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Walk through the quote wizard, resuming any saved progress")]
    Quote,
    #[command(about = "Export the finished quote as a PDF document (HTML without wkhtmltopdf)")]
    Export {
        #[arg(long, help = "Directory to write the quote document into")]
        output_dir: Option<PathBuf>,
    },
    #[command(about = "Compose the quote summary email and print its mailto link")]
    Email,
    #[command(about = "Discard saved wizard progress and start over from step 1")]
    Reset,
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let output_dir = match &cli.command {
        Command::Export { output_dir } => output_dir.clone(),
        _ => None,
    };
    let load_options = LoadOptions {
        config_path: cli.config.clone(),
        require_file: cli.config.is_some(),
        overrides: ConfigOverrides {
            data_dir: cli.data_dir.clone(),
            output_dir,
            log_level: cli.log_level.clone(),
        },
    };

    let config = match AppConfig::load(load_options.clone()) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("configuration issue: {error}");
            return ExitCode::from(2);
        }
    };
    init_logging(&config);

    let result = match cli.command {
        Command::Quote => commands::quote::run(&config),
        Command::Export { .. } => commands::export::run(&config),
        Command::Email => commands::email::run(&config),
        Command::Reset => commands::reset::run(&config),
        Command::Config => commands::CommandResult {
            exit_code: 0,
            output: commands::config::run(&config, &load_options),
        },
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}

fn init_logging(config: &AppConfig) {
    use motoquote_core::config::LogFormat::*;
    use tracing::Level;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);

    match config.logging.format {
        Compact => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).compact().init();
        }
        Pretty => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).pretty().init();
        }
        Json => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).json().init();
        }
    }
}
