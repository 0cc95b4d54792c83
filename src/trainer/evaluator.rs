use tracing::debug;

use super::error::TrainerError;
use super::session::{QuizState, Session};

/// Result of judging one answer
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerOutcome {
    pub is_correct: bool,
    pub correct_answer: String,
    pub etymology: Option<String>,
    /// True when this was the last phrase of the run
    pub run_complete: bool,
}

/// Judge `selected` against the current question by exact string match and
/// update the score.
///
/// # Errors
///
/// `TrainerError::NoActiveQuestion` if no question is waiting for an answer.
pub fn submit_answer(selected: &str, session: &mut Session) -> Result<AnswerOutcome, TrainerError> {
    if session.state() != QuizState::InQuestion {
        return Err(TrainerError::NoActiveQuestion);
    }

    let correct_answer = session
        .current_correct_answer()
        .ok_or(TrainerError::NoActiveQuestion)?
        .to_string();
    let etymology = session
        .current_phrase()
        .and_then(|p| p.etymology_note())
        .map(str::to_string);

    let is_correct = selected == correct_answer;
    session.record_answer(is_correct);

    debug!(
        is_correct,
        correct = session.correct_count(),
        answered = session.total_answered(),
        "answer recorded"
    );

    Ok(AnswerOutcome {
        is_correct,
        correct_answer,
        etymology,
        run_complete: session.is_complete(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trainer::corpus::Corpus;
    use crate::trainer::generator::next_question;
    use crate::trainer::phrase::Phrase;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn session() -> Session {
        let phrases = vec![
            Phrase::new("медвежья услуга", &["неумелая помощь, приносящая вред"])
                .with_etymology("из басни Крылова «Пустынник и Медведь»"),
            Phrase::new("крокодиловы слёзы", &["притворное, лицемерное сочувствие"]),
            Phrase::new("делать из мухи слона", &["сильно преувеличивать что-либо"]),
        ];
        Session::new(Corpus::from_raw(phrases, None).unwrap())
    }

    #[test]
    fn test_answer_without_question_is_rejected() {
        let mut session = session();
        assert_eq!(
            submit_answer("что угодно", &mut session).unwrap_err(),
            TrainerError::NoActiveQuestion
        );
        assert_eq!(session.total_answered(), 0);
    }

    #[test]
    fn test_correct_and_wrong_answers_are_counted() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut session = session();

        let q = next_question(&mut session, &mut rng).unwrap();
        let correct = session.current_correct_answer().unwrap().to_string();
        let outcome = submit_answer(&correct, &mut session).unwrap();
        assert!(outcome.is_correct);
        assert_eq!(outcome.correct_answer, correct);
        assert!(!outcome.run_complete);
        assert!(q.options.contains(&correct));

        next_question(&mut session, &mut rng).unwrap();
        let outcome = submit_answer("совсем не то", &mut session).unwrap();
        assert!(!outcome.is_correct);
        assert_eq!(session.correct_count(), 1);
        assert_eq!(session.total_answered(), 2);
    }

    #[test]
    fn test_double_submit_is_rejected() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut session = session();
        next_question(&mut session, &mut rng).unwrap();
        submit_answer("x", &mut session).unwrap();
        assert_eq!(
            submit_answer("x", &mut session).unwrap_err(),
            TrainerError::NoActiveQuestion
        );
        assert_eq!(session.total_answered(), 1);
    }

    #[test]
    fn test_outcome_carries_etymology() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut session = session();
        let mut found = false;
        while !session.is_complete() {
            let q = next_question(&mut session, &mut rng).unwrap();
            let outcome = submit_answer("x", &mut session).unwrap();
            if q.phrase == "медвежья услуга" {
                assert_eq!(
                    outcome.etymology.as_deref(),
                    Some("из басни Крылова «Пустынник и Медведь»")
                );
                found = true;
            } else {
                assert!(outcome.etymology.is_none());
            }
        }
        assert!(found);
    }

    #[test]
    fn test_score_is_monotonic() {
        let mut rng = StdRng::seed_from_u64(21);
        let mut session = session();
        let (mut last_correct, mut last_total) = (0, 0);
        let mut flip = false;
        while !session.is_complete() {
            next_question(&mut session, &mut rng).unwrap();
            let pick = if flip {
                session.current_correct_answer().unwrap().to_string()
            } else {
                "неверно".to_string()
            };
            flip = !flip;
            submit_answer(&pick, &mut session).unwrap();

            assert!(session.correct_count() >= last_correct);
            assert!(session.total_answered() > last_total);
            assert!(session.correct_count() <= session.total_answered());
            last_correct = session.correct_count();
            last_total = session.total_answered();
        }
        assert_eq!(session.total_answered(), 3);
    }
}
