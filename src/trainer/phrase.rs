use serde::{Deserialize, Deserializer, Serialize};

/// Placeholder the dictionary uses for entries nobody has written a meaning for yet
pub const CLARIFICATION_SENTINEL: &str = "Значение требует уточнения";

/// Shown as the correct answer when a phrase unexpectedly has no usable meaning
pub const FALLBACK_MEANING: &str = "Значение недоступно";

/// Meanings this short (after trimming) are treated as stubs
pub const MIN_MEANING_CHARS: usize = 10;

/// A phraseological unit as returned by the phrase API.
///
/// `text` is the natural key: two records with the same text are the same phrase
/// as far as a quiz run is concerned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Phrase {
    #[serde(rename = "phrase")]
    pub text: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub meanings: Vec<String>,
    #[serde(default)]
    pub etymology: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

impl Phrase {
    #[allow(dead_code)]
    pub fn new(text: impl Into<String>, meanings: &[&str]) -> Self {
        Self {
            text: text.into(),
            meanings: meanings.iter().map(|m| m.to_string()).collect(),
            etymology: None,
            category: None,
        }
    }

    #[allow(dead_code)]
    pub fn with_etymology(mut self, etymology: impl Into<String>) -> Self {
        self.etymology = Some(etymology.into());
        self
    }

    #[allow(dead_code)]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Meanings usable as quiz answers, in their original order
    pub fn qualifying_meanings(&self) -> impl Iterator<Item = &str> {
        self.meanings
            .iter()
            .map(String::as_str)
            .filter(|m| is_qualifying_meaning(m))
    }

    pub fn has_qualifying_meaning(&self) -> bool {
        self.qualifying_meanings().next().is_some()
    }

    /// Etymology note, if it has any visible content
    pub fn etymology_note(&self) -> Option<&str> {
        self.etymology
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// A meaning qualifies when its trimmed text is longer than
/// [`MIN_MEANING_CHARS`] characters and is not the clarification sentinel.
pub fn is_qualifying_meaning(meaning: &str) -> bool {
    let trimmed = meaning.trim();
    trimmed.chars().count() > MIN_MEANING_CHARS && trimmed != CLARIFICATION_SENTINEL
}

/// Category entry from the `/categories` endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryMeta {
    pub name: String,
    #[serde(default)]
    pub count: u64,
}

impl CategoryMeta {
    /// Human-readable name derived from the category key ("body_parts" -> "Body Parts")
    pub fn display_name(&self) -> String {
        self.name
            .split('_')
            .filter(|w| !w.is_empty())
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}
