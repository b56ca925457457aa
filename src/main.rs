use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::runtime::Runtime;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use brandkit::BrandError;
use brandkit::cli::OutputFormat;
use brandkit::cli::commands;

#[derive(Parser)]
#[command(name = "brandkit")]
#[command(
    version,
    about = "Generate a brand kit (colors, typography, voice, tokens) from a website"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, global = true)]
    verbose: bool,

    #[arg(long, short, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract brand assets from a page and derive a full brand kit
    Build {
        #[arg(help = "Page URL (https:// is assumed when omitted)")]
        url: String,
        #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        #[arg(short, long, help = "Write JSON/YAML output to a file")]
        output: Option<PathBuf>,
        #[arg(long = "no-ai", help = "Never call the LLM or screenshot providers")]
        no_ai: bool,
        #[arg(long, help = "SQLite file for job/step tracking")]
        db: Option<PathBuf>,
    },

    /// Build a color palette from hex colors
    Palette {
        #[arg(required = true, help = "Colors, most important first")]
        colors: Vec<String>,
        #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Show color harmonies of one color
    Harmonies {
        color: String,
        #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// WCAG contrast ratio of two colors
    Contrast {
        foreground: String,
        background: String,
        #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Generate a modular type scale
    TypeScale {
        #[arg(long, default_value_t = 16.0, help = "Base size in px")]
        base: f64,
        #[arg(long, default_value = "major-third", help = "Ratio, e.g. perfect-fourth, golden-ratio")]
        ratio: String,
        #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration (merged from all sources)
    Show {
        #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Show configuration file paths
    Path,
    /// Write a default configuration file
    Init {
        #[arg(long, short, help = "Initialize global config")]
        global: bool,
        #[arg(long, help = "Overwrite existing config")]
        force: bool,
    },
}

/// Set up panic handler for graceful error reporting
fn setup_panic_handler() {
    let default_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info| {
        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };

        eprintln!("\n\x1b[1;31m━━━ PANIC ━━━\x1b[0m");
        eprintln!("\x1b[31mbrandkit encountered an unexpected error:\x1b[0m");
        eprintln!("  {}", message);

        if let Some(location) = panic_info.location() {
            eprintln!(
                "\x1b[90mLocation: {}:{}:{}\x1b[0m",
                location.file(),
                location.line(),
                location.column()
            );
        }
        eprintln!();

        // Call default hook for backtrace (if RUST_BACKTRACE=1)
        default_hook(panic_info);
    }));
}

fn main() -> ExitCode {
    setup_panic_handler();

    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError:\x1b[0m {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Page fetch failures get the single user-facing sentence; everything
/// else keeps its own message
fn user_facing(err: BrandError) -> anyhow::Error {
    match err {
        BrandError::Fetch { .. } | BrandError::InvalidUrl { .. } | BrandError::Timeout { .. } => {
            anyhow::anyhow!("could not analyze this site: {}", err)
        }
        other => other.into(),
    }
}

fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Build {
            url,
            format,
            output,
            no_ai,
            db,
        } => {
            let rt = Runtime::new()?;
            rt.block_on(commands::build::run(commands::build::BuildOptions {
                url,
                format,
                output,
                no_ai,
                db,
            }))
            .map_err(user_facing)?;
        }
        Commands::Palette { colors, format } => {
            commands::palette::run(&colors, format)?;
        }
        Commands::Harmonies { color, format } => {
            commands::harmonies::run(&color, format)?;
        }
        Commands::Contrast {
            foreground,
            background,
            format,
        } => {
            commands::contrast::run(&foreground, &background, format)?;
        }
        Commands::TypeScale {
            base,
            ratio,
            format,
        } => {
            commands::type_scale::run(base, &ratio, format)?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Show { format } => commands::config::show(format)?,
            ConfigAction::Path => commands::config::path()?,
            ConfigAction::Init { global, force } => commands::config::init(global, force)?,
        },
    }

    Ok(())
}
