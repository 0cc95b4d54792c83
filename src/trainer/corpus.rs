use std::collections::HashSet;

use tracing::{debug, info};

use super::error::LoadError;
use super::phrase::Phrase;

/// Category key meaning "every phrase"
pub const GENERAL_CATEGORY: &str = "general";

/// The validated quiz material for one trainer instance.
///
/// `scoped` is the question set. `pool` holds every valid phrase that was
/// loaded (always a superset of `scoped`) and only serves as a wider source of
/// distractors. Neither list changes after construction.
#[derive(Debug, Clone)]
pub struct Corpus {
    scoped: Vec<Phrase>,
    pool: Vec<Phrase>,
    category: Option<String>,
}

impl Corpus {
    /// Filter raw records and scope them to `category`.
    ///
    /// Fails when nothing usable is left in scope; a run cannot start without
    /// at least one question.
    pub fn from_raw(raw: Vec<Phrase>, category: Option<&str>) -> Result<Self, LoadError> {
        let raw_count = raw.len();
        let category = normalize_category(category);
        let pool = filter_phrases(raw);

        let scoped: Vec<Phrase> = match &category {
            Some(cat) => pool
                .iter()
                .filter(|p| p.category.as_deref() == Some(cat.as_str()))
                .cloned()
                .collect(),
            None => pool.clone(),
        };

        info!(
            raw = raw_count,
            valid = pool.len(),
            scoped = scoped.len(),
            category = category.as_deref().unwrap_or(GENERAL_CATEGORY),
            "corpus loaded"
        );

        if scoped.is_empty() {
            return Err(match category {
                Some(category) => LoadError::EmptyCategory { category },
                None => LoadError::EmptyCorpus,
            });
        }

        Ok(Self {
            scoped,
            pool,
            category,
        })
    }

    /// Add phrases from outside the scope to the distractor pool
    pub fn widen_pool(&mut self, extra: Vec<Phrase>) {
        let mut seen: HashSet<String> = self.pool.iter().map(|p| p.text.clone()).collect();
        let before = self.pool.len();
        for phrase in filter_phrases(extra) {
            if seen.insert(phrase.text.clone()) {
                self.pool.push(phrase);
            }
        }
        debug!(added = self.pool.len() - before, "distractor pool widened");
    }

    /// Phrases that will be asked during a run
    pub fn phrases(&self) -> &[Phrase] {
        &self.scoped
    }

    /// Every valid phrase available as a distractor source
    pub fn pool(&self) -> &[Phrase] {
        &self.pool
    }

    pub fn len(&self) -> usize {
        self.scoped.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.scoped.is_empty()
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }
}

/// `None`, blank and `general` all mean "no category filter"
pub fn normalize_category(category: Option<&str>) -> Option<String> {
    category
        .map(str::trim)
        .filter(|c| !c.is_empty() && *c != GENERAL_CATEGORY)
        .map(str::to_string)
}

/// Keep only phrases that can be asked: at least one qualifying meaning.
/// Later duplicates of a phrase text are dropped.
pub fn filter_phrases(raw: Vec<Phrase>) -> Vec<Phrase> {
    let mut seen = HashSet::new();
    raw.into_iter()
        .filter(|p| !p.meanings.is_empty() && p.has_qualifying_meaning())
        .filter(|p| seen.insert(p.text.clone()))
        .collect()
}
