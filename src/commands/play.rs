use anyhow::Result;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use inquire::{InquireError, Select};
use rand::Rng;

use crate::api::{self, PhraseClient};
use crate::commands::categories;
use crate::config::{API_URL_ENV, Config};
use crate::trainer::summary::{self, Summary};
use crate::trainer::{AnswerOutcome, Corpus, LoadError, Question, Session, Step, submit_answer};

/// How a run through the corpus ended
enum RunEnd {
    Finished(Summary),
    Quit(Summary),
}

/// What the learner picked on the completion screen
enum AfterRun {
    PlayAgain,
    OtherCategory,
    Exit,
}

pub async fn run(category: Option<String>, limit: Option<u32>) -> Result<()> {
    let config = Config::load()?;
    let client = config.client()?;
    let limit = limit.unwrap_or_else(|| config.limit());

    let mut category = match category.or_else(|| config.default_category.clone()) {
        Some(c) => Some(c),
        None => categories::prompt_category(&client).await?,
    };

    loop {
        let spinner = create_spinner("Loading phrases...");
        let loaded = api::load_corpus(&client, category.as_deref(), limit).await;
        spinner.finish_and_clear();

        let corpus = corpus_or_report(loaded, &client)?;

        print_banner(corpus.category(), corpus.len());

        let mut session = Session::new(corpus);
        let mut rng = rand::rng();

        loop {
            match play_run(&mut session, &mut rng)? {
                RunEnd::Quit(summary) => {
                    println!("\n{}", "Training ended early.".dimmed());
                    print_summary(&summary, session.corpus().category());
                    return Ok(());
                }
                RunEnd::Finished(summary) => {
                    print_summary(&summary, session.corpus().category());
                    match prompt_after_run()? {
                        AfterRun::PlayAgain => session.reset(),
                        AfterRun::OtherCategory => break,
                        AfterRun::Exit => return Ok(()),
                    }
                }
            }
        }

        category = categories::prompt_category(&client).await?;
    }
}

/// Ask questions until the corpus is exhausted or the learner quits
fn play_run<R: Rng + ?Sized>(session: &mut Session, rng: &mut R) -> Result<RunEnd> {
    let mut step = session.advance(rng)?;

    loop {
        let question = match step {
            Step::Question(q) => q,
            Step::Complete(summary) => return Ok(RunEnd::Finished(summary)),
        };

        let Some(selected) = ask(&question)? else {
            return Ok(RunEnd::Quit(summary::summarize(session)));
        };

        let outcome = submit_answer(&selected, session)?;
        print_feedback(&outcome);
        print_progress(session);
        println!("{}", "─".repeat(50).dimmed());

        if outcome.run_complete {
            step = session.advance(rng)?;
            continue;
        }

        let next = Select::new(
            "Continue?",
            vec!["➡️   Next question", "🔄  Start over", "🚪  Finish"],
        )
        .prompt();

        step = match next {
            Ok(s) if s.contains("Start over") => Step::Question(session.restart(rng)?),
            Ok(s) if s.contains("Finish") => {
                return Ok(RunEnd::Quit(summary::summarize(session)));
            }
            Ok(_) => session.advance(rng)?,
            Err(InquireError::OperationCanceled) | Err(InquireError::OperationInterrupted) => {
                return Ok(RunEnd::Quit(summary::summarize(session)));
            }
            Err(e) => return Err(e.into()),
        };
    }
}

/// Show one question; `None` means the learner backed out
fn ask(question: &Question) -> Result<Option<String>> {
    println!(
        "\n{} [{}/{}]",
        "Phrase".bold().cyan(),
        question.number,
        question.total
    );
    println!("  {}", question.phrase.bold().yellow());
    println!();

    match Select::new("What does it mean?", question.options.clone())
        .with_help_message("Use arrow keys to choose, Enter to answer, Esc to stop")
        .prompt()
    {
        Ok(selected) => Ok(Some(selected)),
        Err(InquireError::OperationCanceled) | Err(InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn print_feedback(outcome: &AnswerOutcome) {
    if outcome.is_correct {
        println!("  {} {}", "✅".green(), "Correct! 🎉".green().bold());
    } else {
        println!("  {} {}", "❌".red(), "Wrong 😔".red().bold());
        println!(
            "  {} {}",
            "Correct answer:".dimmed(),
            outcome.correct_answer.green()
        );
    }

    if let Some(etymology) = &outcome.etymology {
        println!();
        println!("  {} {}", "📖 Origin:".bold(), etymology);
    }
    println!();
}

fn print_progress(session: &Session) {
    let accuracy = summary::accuracy(session.correct_count(), session.total_answered());
    let remaining = session.remaining_count();
    let progress = format!("{} / {}", session.total_answered(), session.corpus().len());

    // Highlight the last few questions
    let progress = if remaining > 0 && remaining <= 3 {
        progress.yellow().bold().to_string()
    } else {
        progress.cyan().to_string()
    };

    println!(
        "  {} {}  {} {}  {} {}",
        "Correct:".dimmed(),
        session.correct_count().to_string().green(),
        "Answered:".dimmed(),
        progress,
        "Accuracy:".dimmed(),
        format!("{}%", accuracy).cyan()
    );
}

fn print_banner(category: Option<&str>, count: usize) {
    let scope = category.unwrap_or("all categories");
    println!();
    println!(
        "    {}",
        "╭──────────────────────────────────────────────────────╮".magenta()
    );
    println!(
        "    {}          {}          {}",
        "│".magenta(),
        "🎯 PHRASEOLOGY TRAINER 🎯".bold().white(),
        "│".magenta()
    );
    println!(
        "    {}",
        "╰──────────────────────────────────────────────────────╯".magenta()
    );
    println!(
        "  {} {}  {} {}",
        "Category:".dimmed(),
        scope.cyan(),
        "Phrases:".dimmed(),
        count.to_string().cyan()
    );
}

fn print_summary(summary: &Summary, category: Option<&str>) {
    println!();
    println!(
        "    {}",
        "╭──────────────────────────────────────────────────────╮".green()
    );
    println!(
        "    {}  {} {}",
        "│".green(),
        summary.tier.emoji(),
        "TRAINING RESULTS".bold().white(),
    );
    println!("    {}  {}", "│".green(), summary.tier.label().italic());
    println!(
        "    {}  Correct answers: {}",
        "│".green(),
        summary.correct.to_string().cyan()
    );
    println!(
        "    {}  Questions: {}",
        "│".green(),
        summary.total.to_string().cyan()
    );
    println!(
        "    {}  Accuracy: {}",
        "│".green(),
        format!("{}%", summary.accuracy).cyan()
    );
    println!(
        "    {}  Phrases studied: {}",
        "│".green(),
        summary.studied.to_string().cyan()
    );
    println!(
        "    {}",
        "╰──────────────────────────────────────────────────────╯".green()
    );

    if summary.total == summary.studied {
        println!(
            "  🎓 You have gone through every phrase in {}.",
            category.unwrap_or("all categories").bold()
        );
    }
    if summary.recommends_review() {
        println!("  📖 Going over the material again will help it stick.");
    } else {
        println!("  ✨ Great command of Russian phraseology!");
    }
    println!();
}

fn prompt_after_run() -> Result<AfterRun> {
    let options = vec![
        "🔄  Play again",
        "📚  Choose another category",
        "🚪  Exit",
    ];

    match Select::new("What next?", options).prompt() {
        Ok(s) if s.contains("Play again") => Ok(AfterRun::PlayAgain),
        Ok(s) if s.contains("another category") => Ok(AfterRun::OtherCategory),
        Ok(_) => Ok(AfterRun::Exit),
        Err(InquireError::OperationCanceled) | Err(InquireError::OperationInterrupted) => {
            Ok(AfterRun::Exit)
        }
        Err(e) => Err(e.into()),
    }
}

/// Load failures are terminal: show the panel, then fail the command
fn corpus_or_report(loaded: Result<Corpus, LoadError>, client: &PhraseClient) -> Result<Corpus> {
    loaded.map_err(|e| {
        print_load_error(&e, client);
        anyhow::Error::new(e).context("Could not load phrases")
    })
}

fn print_load_error(error: &LoadError, client: &PhraseClient) {
    println!();
    println!("{}", "❌ Loading failed".red().bold());

    match error {
        LoadError::EmptyCategory { category } => {
            println!(
                "  Category {} has no phrases ready for training yet.",
                category.yellow()
            );
            println!(
                "  Run {} to see what is available.",
                "frazeo categories".cyan()
            );
        }
        _ => {
            println!("  Could not load the phrase database.");
            println!("  {} {}", "Details:".dimmed(), error);
            println!(
                "  {} {} (set it with {} or {})",
                "API:".dimmed(),
                client.base_url().cyan(),
                "frazeo config".cyan(),
                API_URL_ENV.cyan()
            );
        }
    }
    println!("\n{}", "Run the command again once the problem is fixed.".dimmed());
}

/// Create a spinner for indeterminate progress
fn create_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn client() -> PhraseClient {
        PhraseClient::new("http://localhost:5000/api", Duration::from_secs(1)).unwrap()
    }

    #[test]
    fn test_load_failure_fails_the_command() {
        let err = corpus_or_report(Err(LoadError::EmptyCorpus), &client()).unwrap_err();
        assert!(err.downcast_ref::<LoadError>().is_some());
    }

    #[test]
    fn test_loaded_corpus_passes_through() {
        let phrases = vec![crate::trainer::Phrase::new(
            "бить баклуши",
            &["бездельничать, заниматься пустяками"],
        )];
        let corpus = Corpus::from_raw(phrases, None).unwrap();
        let corpus = corpus_or_report(Ok(corpus), &client()).unwrap();
        assert_eq!(corpus.len(), 1);
    }
}
