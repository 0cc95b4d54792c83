use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};
use tracing::{debug, warn};

use super::corpus::Corpus;
use super::error::TrainerError;
use super::phrase::{FALLBACK_MEANING, Phrase};
use super::session::{ActiveQuestion, QuizState, Session};

/// Wrong answers offered next to the correct one
pub const DISTRACTOR_COUNT: usize = 2;

/// Used only when the corpus cannot supply enough distinct distractors
pub const GENERIC_MEANINGS: &[&str] = &[
    "выражение радости или удовлетворения",
    "обозначение быстрого движения или действия",
    "описание сложной или запутанной ситуации",
    "характеристика ненадежного человека",
    "обозначение большого количества чего-либо",
    "выражение недовольства или возмущения",
    "описание красивого внешнего вида",
    "характеристика умного человека",
    "обозначение трудной работы",
    "выражение согласия или одобрения",
];

/// A question ready to be shown
#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    pub phrase: String,
    /// Shuffled; exactly one entry is the correct answer
    pub options: Vec<String>,
    /// 1-based position of this question within the run
    pub number: usize,
    pub total: usize,
}

/// The correct meaning plus the shuffled options built around it
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerSet {
    pub correct: String,
    pub options: Vec<String>,
}

/// Pick an unseen phrase, mark it used and build its options.
///
/// # Errors
///
/// `TrainerError::Exhausted` when every phrase was already asked (the caller
/// should show the summary instead), `TrainerError::AwaitingAnswer` when the
/// current question has not been answered.
pub fn next_question<R: Rng + ?Sized>(
    session: &mut Session,
    rng: &mut R,
) -> Result<Question, TrainerError> {
    if session.state() == QuizState::InQuestion {
        return Err(TrainerError::AwaitingAnswer);
    }
    if session.is_complete() {
        session.finish();
        return Err(TrainerError::Exhausted);
    }

    let available: Vec<usize> = session
        .corpus()
        .phrases()
        .iter()
        .enumerate()
        .filter(|(_, p)| !session.is_used(&p.text))
        .map(|(i, _)| i)
        .collect();

    let phrase_index = *available.choose(rng).ok_or(TrainerError::Exhausted)?;
    session.mark_used(phrase_index);

    let phrase = &session.corpus().phrases()[phrase_index];
    let answers = build_options(phrase, session.corpus(), rng);
    let question = Question {
        phrase: phrase.text.clone(),
        options: answers.options,
        number: session.used_count(),
        total: session.corpus().len(),
    };

    debug!(
        phrase = %question.phrase,
        number = question.number,
        total = question.total,
        "question selected"
    );

    session.begin_question(ActiveQuestion {
        phrase_index,
        correct_answer: answers.correct,
    });

    Ok(question)
}

/// Build one correct answer and [`DISTRACTOR_COUNT`] distractors for `phrase`,
/// shuffled together.
pub fn build_options<R: Rng + ?Sized>(phrase: &Phrase, corpus: &Corpus, rng: &mut R) -> AnswerSet {
    let correct = match pick_meaning(phrase, rng) {
        Some(meaning) => meaning.to_string(),
        None => {
            warn!(
                phrase = %phrase.text,
                "phrase has no qualifying meaning, using placeholder answer"
            );
            FALLBACK_MEANING.to_string()
        }
    };

    let distractors = pick_distractors(phrase, &correct, corpus, rng);

    let mut options = Vec::with_capacity(DISTRACTOR_COUNT + 1);
    options.push(correct.clone());
    options.extend(distractors);
    options.shuffle(rng);

    AnswerSet { correct, options }
}

/// A random qualifying meaning of `phrase`
pub fn pick_meaning<'a, R: Rng + ?Sized>(phrase: &'a Phrase, rng: &mut R) -> Option<&'a str> {
    let meanings: Vec<&str> = phrase.qualifying_meanings().collect();
    meanings.choose(rng).copied()
}

fn pick_distractors<R: Rng + ?Sized>(
    phrase: &Phrase,
    correct: &str,
    corpus: &Corpus,
    rng: &mut R,
) -> Vec<String> {
    let mut candidates: Vec<&Phrase> = corpus
        .phrases()
        .iter()
        .filter(|p| p.text != phrase.text)
        .collect();

    if candidates.len() < DISTRACTOR_COUNT {
        candidates = corpus
            .pool()
            .iter()
            .filter(|p| p.text != phrase.text)
            .collect();
    }

    let mut distractors: Vec<String> = Vec::with_capacity(DISTRACTOR_COUNT);

    // Every drawn candidate is removed, so this ends once the pool is spent
    while distractors.len() < DISTRACTOR_COUNT && !candidates.is_empty() {
        let idx = rng.random_range(0..candidates.len());
        let candidate = candidates.swap_remove(idx);

        if let Some(meaning) = pick_meaning(candidate, rng)
            && meaning != correct
            && !distractors.iter().any(|d| d == meaning)
        {
            distractors.push(meaning.to_string());
        }
    }

    if distractors.len() < DISTRACTOR_COUNT {
        debug!(
            phrase = %phrase.text,
            found = distractors.len(),
            "not enough distractors in corpus, using generic meanings"
        );

        let mut fillers: Vec<&str> = GENERIC_MEANINGS.to_vec();
        fillers.shuffle(rng);

        for filler in fillers {
            if distractors.len() == DISTRACTOR_COUNT {
                break;
            }
            if filler != correct && !distractors.iter().any(|d| d == filler) {
                distractors.push(filler.to_string());
            }
        }
    }

    distractors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trainer::phrase::CLARIFICATION_SENTINEL;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    fn animals() -> Vec<Phrase> {
        vec![
            Phrase::new(
                "как с гуся вода",
                &["всё нипочём, никак не действует", "безразлично относится к упрёкам"],
            )
            .with_category("animals"),
            Phrase::new("делать из мухи слона", &["сильно преувеличивать что-либо"])
                .with_category("animals"),
            Phrase::new("медвежья услуга", &["неумелая помощь, приносящая вред"])
                .with_category("animals"),
            Phrase::new("крокодиловы слёзы", &["притворное, лицемерное сочувствие"])
                .with_category("animals"),
        ]
    }

    fn first_question(session: &mut Session, rng: &mut StdRng) -> Question {
        next_question(session, rng).unwrap()
    }

    fn answer(session: &mut Session) {
        let correct = session.current_correct_answer().unwrap().to_string();
        crate::trainer::evaluator::submit_answer(&correct, session).unwrap();
    }

    #[test]
    fn test_no_repetition_and_exact_termination() {
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let corpus = Corpus::from_raw(animals(), None).unwrap();
            let mut session = Session::new(corpus);
            let mut seen = HashSet::new();

            for _ in 0..4 {
                let q = first_question(&mut session, &mut rng);
                assert!(seen.insert(q.phrase.clone()), "phrase repeated: {}", q.phrase);
                answer(&mut session);
            }

            assert!(session.is_complete());
            assert_eq!(
                next_question(&mut session, &mut rng).unwrap_err(),
                TrainerError::Exhausted
            );
        }
    }

    #[test]
    fn test_option_integrity() {
        for seed in 0..100 {
            let mut rng = StdRng::seed_from_u64(seed);
            let corpus = Corpus::from_raw(animals(), None).unwrap();
            let mut session = Session::new(corpus);
            let q = first_question(&mut session, &mut rng);

            assert_eq!(q.options.len(), 3);
            let distinct: HashSet<&String> = q.options.iter().collect();
            assert_eq!(distinct.len(), 3);

            let correct = session.current_correct_answer().unwrap();
            assert_eq!(q.options.iter().filter(|o| *o == correct).count(), 1);

            let phrase = session.current_phrase().unwrap();
            assert!(phrase.qualifying_meanings().any(|m| m == correct));
        }
    }

    #[test]
    fn test_correct_answer_position_varies() {
        let mut positions = HashSet::new();
        for seed in 0..60 {
            let mut rng = StdRng::seed_from_u64(seed);
            let corpus = Corpus::from_raw(animals(), None).unwrap();
            let mut session = Session::new(corpus);
            let q = first_question(&mut session, &mut rng);
            let correct = session.current_correct_answer().unwrap();
            positions.insert(q.options.iter().position(|o| o == correct).unwrap());
        }
        assert_eq!(positions.len(), 3);
    }

    #[test]
    fn test_single_phrase_uses_generic_fillers() {
        let mut rng = StdRng::seed_from_u64(42);
        let corpus = Corpus::from_raw(
            vec![Phrase::new("бить баклуши", &["бездельничать, праздно проводить время"])],
            None,
        )
        .unwrap();
        let mut session = Session::new(corpus);
        let q = first_question(&mut session, &mut rng);

        assert_eq!(q.options.len(), 3);
        let fillers = q
            .options
            .iter()
            .filter(|o| GENERIC_MEANINGS.contains(&o.as_str()))
            .count();
        assert_eq!(fillers, 2);
        assert!(q
            .options
            .contains(&"бездельничать, праздно проводить время".to_string()));
    }

    #[test]
    fn test_small_category_widens_to_pool() {
        let mut raw = animals();
        raw.push(
            Phrase::new("золотые руки", &["об умелом, мастеровитом человеке"])
                .with_category("body_parts"),
        );
        let pool_meanings: HashSet<String> = raw
            .iter()
            .filter(|p| p.text != "золотые руки")
            .flat_map(|p| p.meanings.clone())
            .collect();

        for seed in 0..30 {
            let mut rng = StdRng::seed_from_u64(seed);
            let corpus = Corpus::from_raw(raw.clone(), Some("body_parts")).unwrap();
            let mut session = Session::new(corpus);
            let q = first_question(&mut session, &mut rng);
            let correct = session.current_correct_answer().unwrap().to_string();

            for option in q.options.iter().filter(|o| **o != correct) {
                assert!(pool_meanings.contains(option), "unexpected distractor {option}");
            }
        }
    }

    #[test]
    fn test_filtered_meanings_never_offered() {
        let mut raw = animals();
        raw.push(Phrase::new("пустышка", &[CLARIFICATION_SENTINEL]));
        raw.push(Phrase::new("коротыш", &["  мало  "]));

        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let corpus = Corpus::from_raw(raw.clone(), None).unwrap();
            let mut session = Session::new(corpus);
            while !session.is_complete() {
                let q = first_question(&mut session, &mut rng);
                assert_ne!(q.phrase, "пустышка");
                assert_ne!(q.phrase, "коротыш");
                assert!(!q.options.iter().any(|o| o == CLARIFICATION_SENTINEL));
                assert!(!q.options.iter().any(|o| o.trim() == "мало"));
                answer(&mut session);
            }
        }
    }

    #[test]
    fn test_phrase_without_meaning_gets_placeholder() {
        let mut rng = StdRng::seed_from_u64(5);
        let corpus = Corpus::from_raw(animals(), None).unwrap();
        let broken = Phrase::new("сломанная запись", &[CLARIFICATION_SENTINEL]);

        let answers = build_options(&broken, &corpus, &mut rng);
        assert_eq!(answers.correct, FALLBACK_MEANING);
        assert_eq!(answers.options.len(), 3);
        assert!(answers.options.contains(&FALLBACK_MEANING.to_string()));
    }

    #[test]
    fn test_duplicate_meanings_across_phrases_stay_distinct() {
        let shared = "одно и то же длинное значение";
        let raw = vec![
            Phrase::new("первая", &[shared]),
            Phrase::new("вторая", &[shared]),
            Phrase::new("третья", &[shared]),
        ];
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let corpus = Corpus::from_raw(raw.clone(), None).unwrap();
            let mut session = Session::new(corpus);
            let q = first_question(&mut session, &mut rng);
            let distinct: HashSet<&String> = q.options.iter().collect();
            assert_eq!(distinct.len(), 3);
            assert_eq!(q.options.iter().filter(|o| *o == shared).count(), 1);
        }
    }

    #[test]
    fn test_same_seed_same_question() {
        let build = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            let corpus = Corpus::from_raw(animals(), None).unwrap();
            let mut session = Session::new(corpus);
            first_question(&mut session, &mut rng)
        };
        assert_eq!(build(77), build(77));
    }
}
