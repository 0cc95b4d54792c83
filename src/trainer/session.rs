use std::collections::HashSet;

use rand::Rng;
use tracing::debug;

use super::corpus::Corpus;
use super::error::TrainerError;
use super::generator::{self, Question};
use super::phrase::Phrase;
use super::summary::{self, Summary};

/// Where a quiz run currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizState {
    /// Nothing asked yet (fresh or just reset)
    Idle,
    /// A question is on screen and waiting for an answer
    InQuestion,
    /// An answer was judged; waiting for "next"
    Feedback,
    /// Every phrase has been asked and answered
    Complete,
}

/// What the "next" action produced
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Question(Question),
    Complete(Summary),
}

/// The question currently on screen
#[derive(Debug, Clone)]
pub(super) struct ActiveQuestion {
    pub(super) phrase_index: usize,
    pub(super) correct_answer: String,
}

/// Mutable state of one learner's run over a fixed corpus.
///
/// The corpus is never modified; variety comes only from the set of phrase
/// keys that were already asked.
#[derive(Debug, Clone)]
pub struct Session {
    corpus: Corpus,
    used: HashSet<String>,
    correct_count: usize,
    total_answered: usize,
    current: Option<ActiveQuestion>,
    state: QuizState,
}

impl Session {
    pub fn new(corpus: Corpus) -> Self {
        Self {
            corpus,
            used: HashSet::new(),
            correct_count: 0,
            total_answered: 0,
            current: None,
            state: QuizState::Idle,
        }
    }

    /// Forget all progress but keep the corpus
    pub fn reset(&mut self) {
        debug!(
            answered = self.total_answered,
            correct = self.correct_count,
            "session reset"
        );
        self.used.clear();
        self.correct_count = 0;
        self.total_answered = 0;
        self.current = None;
        self.state = QuizState::Idle;
    }

    pub fn remaining_count(&self) -> usize {
        self.corpus.len().saturating_sub(self.used.len())
    }

    pub fn is_complete(&self) -> bool {
        self.remaining_count() == 0
    }

    /// The "next" action: ask another phrase, or finish the run when none are left.
    ///
    /// # Errors
    ///
    /// Returns `TrainerError::AwaitingAnswer` while a question is unanswered.
    pub fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Step, TrainerError> {
        if self.state == QuizState::InQuestion {
            return Err(TrainerError::AwaitingAnswer);
        }
        if self.is_complete() {
            self.finish();
            return Ok(Step::Complete(summary::summarize(self)));
        }
        generator::next_question(self, rng).map(Step::Question)
    }

    /// Reset and immediately ask the first question of a new run
    pub fn restart<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Question, TrainerError> {
        self.reset();
        generator::next_question(self, rng)
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn state(&self) -> QuizState {
        self.state
    }

    pub fn correct_count(&self) -> usize {
        self.correct_count
    }

    pub fn total_answered(&self) -> usize {
        self.total_answered
    }

    pub fn is_used(&self, phrase_text: &str) -> bool {
        self.used.contains(phrase_text)
    }

    pub fn used_count(&self) -> usize {
        self.used.len()
    }

    /// The phrase being asked, if any
    pub fn current_phrase(&self) -> Option<&Phrase> {
        self.current
            .as_ref()
            .and_then(|q| self.corpus.phrases().get(q.phrase_index))
    }

    /// The option that counts as correct for the current phrase
    pub fn current_correct_answer(&self) -> Option<&str> {
        self.current.as_ref().map(|q| q.correct_answer.as_str())
    }

    pub(super) fn mark_used(&mut self, phrase_index: usize) {
        if let Some(phrase) = self.corpus.phrases().get(phrase_index) {
            self.used.insert(phrase.text.clone());
        }
    }

    pub(super) fn begin_question(&mut self, question: ActiveQuestion) {
        self.current = Some(question);
        self.state = QuizState::InQuestion;
    }

    pub(super) fn record_answer(&mut self, is_correct: bool) {
        self.total_answered += 1;
        if is_correct {
            self.correct_count += 1;
        }
        self.state = if self.is_complete() {
            QuizState::Complete
        } else {
            QuizState::Feedback
        };
    }

    pub(super) fn finish(&mut self) {
        self.state = QuizState::Complete;
    }
}
