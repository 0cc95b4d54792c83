pub mod client;

pub use client::{PhraseClient, load_corpus};
