use anyhow::Result;
use colored::Colorize;
use inquire::{InquireError, Select};
use tracing::warn;

use crate::api::PhraseClient;
use crate::config::Config;
use crate::trainer::CategoryMeta;

/// List the categories the phrase API knows about
pub async fn list() -> Result<()> {
    let config = Config::load()?;
    let client = config.client()?;

    let mut categories = match client.fetch_categories().await {
        Ok(c) => c,
        Err(e) => {
            println!("{} {}", "Error:".red().bold(), e);
            println!("  {} {}", "API:".dimmed(), client.base_url().cyan());
            return Ok(());
        }
    };

    if categories.is_empty() {
        println!("{}", "No categories found.".dimmed());
        return Ok(());
    }

    sort_categories(&mut categories);
    let total: u64 = categories.iter().map(|c| c.count).sum();

    println!("\n{}", "Categories".bold().cyan());
    println!("{}", "─".repeat(50).dimmed());

    for cat in &categories {
        println!(
            "  {:<32} {:>6}  {}",
            cat.display_name(),
            cat.count.to_string().cyan(),
            cat.name.dimmed()
        );
    }

    println!("{}", "─".repeat(50).dimmed());
    println!(
        "  {:<32} {:>6}",
        "Total".bold(),
        total.to_string().green()
    );
    println!(
        "\n  Start training with {}",
        "frazeo play --category <key>".cyan()
    );

    Ok(())
}

/// Ask which category to train. `None` means every phrase.
///
/// If the category list cannot be fetched the learner simply trains on
/// everything; the phrase request itself will report any real outage.
pub async fn prompt_category(client: &PhraseClient) -> Result<Option<String>> {
    let mut categories = match client.fetch_categories().await {
        Ok(c) => c,
        Err(e) => {
            warn!(error = %e, "could not fetch categories");
            return Ok(None);
        }
    };

    if categories.is_empty() {
        return Ok(None);
    }

    sort_categories(&mut categories);

    let mut options = vec!["🌐  All categories".to_string()];
    options.extend(
        categories
            .iter()
            .map(|c| format!("📚  {} ({})", c.display_name(), c.count)),
    );

    let choice = match Select::new("Choose a category:", options)
        .with_page_size(12)
        .raw_prompt()
    {
        Ok(choice) => choice,
        Err(InquireError::OperationCanceled) | Err(InquireError::OperationInterrupted) => {
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };

    Ok(category_at(&categories, choice.index))
}

/// Biggest categories first, then by key
fn sort_categories(categories: &mut [CategoryMeta]) {
    categories.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
}

/// Map a menu index back to a category key; index 0 is "all categories"
fn category_at(categories: &[CategoryMeta], index: usize) -> Option<String> {
    index
        .checked_sub(1)
        .and_then(|i| categories.get(i))
        .map(|c| c.name.clone())
}
