use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, info, warn};
use url::Url;

use crate::trainer::corpus::normalize_category;
use crate::trainer::generator::DISTRACTOR_COUNT;
use crate::trainer::{CategoryMeta, Corpus, LoadError, Phrase};

pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_LIMIT: u32 = 1000;
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Read-only client for the phrase API
#[derive(Debug, Clone)]
pub struct PhraseClient {
    client: reqwest::Client,
    base_url: String,
}

/// Body of `GET /phrases`
#[derive(Debug, Deserialize)]
pub struct PhrasesResponse {
    #[serde(default)]
    pub phrases: Vec<Phrase>,
    #[serde(default)]
    pub total: Option<u64>,
}

/// Body of `GET /categories`
#[derive(Debug, Deserialize)]
struct CategoriesResponse {
    #[serde(default)]
    categories: Vec<CategoryMeta>,
}

impl PhraseClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, LoadError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET {base}/phrases`, optionally scoped to a category
    pub async fn fetch_phrases(
        &self,
        category: Option<&str>,
        limit: u32,
    ) -> Result<PhrasesResponse, LoadError> {
        let url = phrases_url(&self.base_url, category, limit)?;
        let body = self.get(url).await?;
        let response: PhrasesResponse = serde_json::from_str(&body)?;
        debug!(
            count = response.phrases.len(),
            total = ?response.total,
            "phrases fetched"
        );
        Ok(response)
    }

    /// `GET {base}/categories`
    pub async fn fetch_categories(&self) -> Result<Vec<CategoryMeta>, LoadError> {
        let url = endpoint(&self.base_url, "categories")?;
        let body = self.get(url).await?;
        let response: CategoriesResponse = serde_json::from_str(&body)?;
        Ok(response.categories)
    }

    async fn get(&self, url: Url) -> Result<String, LoadError> {
        debug!(%url, "GET");
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(LoadError::HttpStatus { status, body });
        }

        Ok(response.text().await?)
    }
}

/// Fetch and validate the quiz material for `category`.
///
/// When the category holds too few phrases to supply distractors, the unscoped
/// list is fetched as well and used only as a distractor pool. That second
/// request is best-effort.
pub async fn load_corpus(
    client: &PhraseClient,
    category: Option<&str>,
    limit: u32,
) -> Result<Corpus, LoadError> {
    let category = normalize_category(category);
    let response = client.fetch_phrases(category.as_deref(), limit).await?;
    let mut corpus = Corpus::from_raw(response.phrases, category.as_deref())?;

    if needs_wider_pool(category.as_deref(), &corpus) {
        match client.fetch_phrases(None, limit).await {
            Ok(wider) => corpus.widen_pool(wider.phrases),
            Err(e) => warn!(error = %e, "could not widen distractor pool"),
        }
    }

    info!(
        phrases = corpus.len(),
        pool = corpus.pool().len(),
        "trainer ready"
    );
    Ok(corpus)
}

/// A scoped corpus whose pool cannot supply enough distractors on its own
fn needs_wider_pool(category: Option<&str>, corpus: &Corpus) -> bool {
    category.is_some() && corpus.pool().len() <= DISTRACTOR_COUNT
}

fn endpoint(base_url: &str, path: &str) -> Result<Url, LoadError> {
    let joined = format!("{}/{}", base_url.trim_end_matches('/'), path);
    Url::parse(&joined).map_err(|source| LoadError::InvalidUrl {
        url: joined,
        source,
    })
}

fn phrases_url(base_url: &str, category: Option<&str>, limit: u32) -> Result<Url, LoadError> {
    let mut url = endpoint(base_url, "phrases")?;
    {
        let mut query = url.query_pairs_mut();
        if let Some(category) = normalize_category(category) {
            query.append_pair("category", &category);
        }
        query.append_pair("limit", &limit.to_string());
    }
    Ok(url)
}
