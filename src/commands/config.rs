use anyhow::Result;
use colored::Colorize;
use inquire::{Select, Text};

use crate::api::client::{DEFAULT_API_URL, DEFAULT_LIMIT, DEFAULT_TIMEOUT_SECS};
use crate::commands::categories;
use crate::config::{API_URL_ENV, Config, env_api_url};

pub async fn run() -> Result<()> {
    println!();
    println!(
        "    {}",
        "╭──────────────────────────────────────────────────────╮".bright_black()
    );
    println!(
        "    {}            {}            {}",
        "│".bright_black(),
        "⚙️  SETTINGS ⚙️".bold().white(),
        "│".bright_black()
    );
    println!(
        "    {}",
        "╰──────────────────────────────────────────────────────╯".bright_black()
    );
    println!();

    let mut config = Config::load()?;

    let options = vec![
        "🌐  Set API address     │ Where phrases are loaded from",
        "📚  Default category    │ Category used by 'play'",
        "🔢  Phrase limit        │ How many phrases to request",
        "⏱️   Request timeout     │ Seconds before giving up",
        "📋  View settings       │ See current configuration",
        "←   Back",
    ];

    loop {
        let selection =
            Select::new("What would you like to configure?", options.clone()).prompt();

        let selection = match selection {
            Ok(s) => s,
            Err(inquire::InquireError::OperationCanceled)
            | Err(inquire::InquireError::OperationInterrupted) => break,
            Err(e) => return Err(e.into()),
        };

        let result = match selection {
            s if s.contains("API address") => set_api_url(&mut config),
            s if s.contains("Default category") => set_default_category(&mut config).await,
            s if s.contains("Phrase limit") => set_limit(&mut config),
            s if s.contains("Request timeout") => set_timeout(&mut config),
            s if s.contains("View settings") => {
                view_config(&config);
                Ok(())
            }
            s if s.contains("Back") => break,
            _ => Ok(()),
        };

        if let Err(e) = result {
            eprintln!("{} {}", "Error:".red(), e);
        }

        println!();
    }

    Ok(())
}

fn set_api_url(config: &mut Config) -> Result<()> {
    let url = Text::new("Phrase API address:")
        .with_default(config.api_base_url.as_deref().unwrap_or(DEFAULT_API_URL))
        .with_help_message("e.g. https://example.com/api")
        .prompt()?;

    let url = url.trim();
    if url.is_empty() {
        println!("{}", "Cancelled.".dimmed());
        return Ok(());
    }

    url::Url::parse(url).map_err(|e| anyhow::anyhow!("Invalid address '{}': {}", url, e))?;

    config.api_base_url = Some(url.to_string());
    config.save()?;

    println!("{} API address set to {}", "✓".green(), url.yellow());
    Ok(())
}

async fn set_default_category(config: &mut Config) -> Result<()> {
    let client = config.client()?;
    let category = categories::prompt_category(&client).await?;

    config.default_category = category.clone();
    config.save()?;

    match category {
        Some(c) => println!("{} Default category set to {}", "✓".green(), c.yellow()),
        None => println!("{} 'play' will ask for a category each time", "✓".green()),
    }
    Ok(())
}

fn set_limit(config: &mut Config) -> Result<()> {
    let value = Text::new("Maximum phrases to load:")
        .with_default(&config.limit().to_string())
        .prompt()?;

    let limit: u32 = value
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("'{}' is not a positive number", value.trim()))?;
    if limit == 0 {
        anyhow::bail!("Limit must be at least 1");
    }

    config.phrase_limit = Some(limit);
    config.save()?;

    println!("{} Phrase limit set to {}", "✓".green(), limit);
    Ok(())
}

fn set_timeout(config: &mut Config) -> Result<()> {
    let value = Text::new("Request timeout in seconds:")
        .with_default(&config.timeout().as_secs().to_string())
        .prompt()?;

    let secs: u64 = value
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("'{}' is not a positive number", value.trim()))?;
    if secs == 0 {
        anyhow::bail!("Timeout must be at least 1 second");
    }

    config.request_timeout_secs = Some(secs);
    config.save()?;

    println!("{} Request timeout set to {}s", "✓".green(), secs);
    Ok(())
}

fn view_config(config: &Config) {
    println!("\n{}", "Current Configuration:".bold());
    println!("{}", "─".repeat(30).dimmed());

    let source = if env_api_url().is_some() {
        format!("(from {})", API_URL_ENV).yellow().to_string()
    } else if config.api_base_url.as_deref().is_some_and(|u| !u.trim().is_empty()) {
        String::new()
    } else {
        "(default)".dimmed().to_string()
    };
    println!("  API address: {} {}", config.api_url().cyan(), source);

    println!(
        "  Default category: {}",
        config
            .default_category
            .as_deref()
            .unwrap_or("ask every time")
    );
    println!(
        "  Phrase limit: {}{}",
        config.limit(),
        if config.phrase_limit.is_none() {
            format!(" (default {})", DEFAULT_LIMIT).dimmed().to_string()
        } else {
            String::new()
        }
    );
    println!(
        "  Request timeout: {}s{}",
        config.timeout().as_secs(),
        if config.request_timeout_secs.is_none() {
            format!(" (default {})", DEFAULT_TIMEOUT_SECS)
                .dimmed()
                .to_string()
        } else {
            String::new()
        }
    );

    if let Ok(path) = Config::config_path() {
        println!("  Config file: {}", path.display().to_string().dimmed());
    }
}
