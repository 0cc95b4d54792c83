//! Quiz core: corpus validation, run state, question building, scoring.
//!
//! Nothing in here does I/O. Every random choice goes through a caller-supplied
//! `rand::Rng`, so a seeded generator replays a run exactly.

pub mod corpus;
pub mod error;
pub mod evaluator;
pub mod generator;
pub mod phrase;
pub mod session;
pub mod summary;

pub use corpus::Corpus;
pub use error::LoadError;
pub use evaluator::{AnswerOutcome, submit_answer};
pub use generator::Question;
pub use phrase::{CategoryMeta, Phrase};
pub use session::{Session, Step};
