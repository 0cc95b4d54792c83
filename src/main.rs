use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use colored::Colorize;
use std::io;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod commands;
mod config;
mod trainer;

/// ASCII art banner for the application
const BANNER: &str = r#"
  _____
 |  ___| __ __ _ _______  ___
 | |_ | '__/ _` |_  / _ \/ _ \
 |  _|| | | (_| |/ /  __/ (_) |
 |_|  |_|  \__,_/___\___|\___/
"#;

/// Print the application banner
fn print_banner() {
    println!("{}", BANNER.cyan().bold());
}

/// Print a styled status line
fn print_status(label: &str, value: &str, icon: &str) {
    println!(
        "  {} {} {}",
        icon,
        format!("{}:", label).dimmed(),
        value.cyan()
    );
}

#[derive(Parser)]
#[command(name = "frazeo")]
#[command(about = "Terminal trainer for Russian phraseological units")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a training run
    Play {
        /// Category key to train (see `categories`); "general" means all
        #[arg(short, long)]
        category: Option<String>,
        /// Maximum number of phrases to load
        #[arg(short, long)]
        limit: Option<u32>,
    },
    /// List available categories
    Categories,
    /// Configure settings (API address, defaults)
    Config,
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "frazeo=warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Play { category, limit }) => {
            commands::play::run(category, limit).await?;
        }
        Some(Commands::Categories) => {
            commands::categories::list().await?;
        }
        Some(Commands::Config) => {
            commands::config::run().await?;
        }
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(shell, &mut cmd, name, &mut io::stdout());
        }
        None => {
            // No subcommand - show interactive menu
            run_interactive().await?;
        }
    }

    Ok(())
}

async fn run_interactive() -> Result<()> {
    use inquire::Select;

    print_banner();

    println!(
        "  {} {}\n",
        "Version:".dimmed(),
        env!("CARGO_PKG_VERSION").cyan()
    );

    println!("{}", "─".repeat(50).dimmed());

    let config = config::Config::load().unwrap_or_default();
    print_status("API", &config.api_url(), "🌐");
    print_status(
        "Category",
        config.default_category.as_deref().unwrap_or("(ask)"),
        "📚",
    );

    println!("{}\n", "─".repeat(50).dimmed());

    let options = vec![
        "🎯  Start training",
        "📚  Browse categories",
        "⚙️   Configure settings",
        "🚪  Exit",
    ];

    let selection = Select::new("What would you like to do?", options)
        .with_help_message("Use arrow keys to navigate, Enter to select")
        .prompt()?;

    println!();

    match selection {
        s if s.contains("Start training") => commands::play::run(None, None).await?,
        s if s.contains("Browse categories") => commands::categories::list().await?,
        s if s.contains("Configure") => commands::config::run().await?,
        s if s.contains("Exit") => {
            println!("{}", "👋 До встречи! Happy learning!".cyan());
        }
        _ => unreachable!(),
    }

    Ok(())
}
