//! Error types for loading quiz material and driving a quiz run.

use thiserror::Error;

/// Anything that stops a corpus from being loaded. None of these are retried.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoadError {
    #[error("invalid phrase API address '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("phrase API request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("phrase API returned {status}: {body}")]
    HttpStatus {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("phrase API returned a malformed response: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("no usable phrases in category '{category}'")]
    EmptyCategory { category: String },
    #[error("no usable phrases were returned")]
    EmptyCorpus,
}

/// Misuse of the quiz state machine.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum TrainerError {
    #[error("every phrase in this run has already been asked")]
    Exhausted,
    #[error("no question is waiting for an answer")]
    NoActiveQuestion,
    #[error("the current question has not been answered yet")]
    AwaitingAnswer,
}
