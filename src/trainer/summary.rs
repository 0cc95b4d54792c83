use super::session::Session;

/// Performance bucket shown on the completion screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Excellent,
    VeryGood,
    Good,
    NeedsImprovement,
    KeepTrying,
}

impl Tier {
    /// Thresholds are checked from the top down
    pub fn from_accuracy(accuracy: u32) -> Self {
        match accuracy {
            90.. => Tier::Excellent,
            75.. => Tier::VeryGood,
            60.. => Tier::Good,
            40.. => Tier::NeedsImprovement,
            _ => Tier::KeepTrying,
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Tier::Excellent => "🏆",
            Tier::VeryGood => "🎉",
            Tier::Good => "👍",
            Tier::NeedsImprovement => "📚",
            Tier::KeepTrying => "💪",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tier::Excellent => "Excellent result!",
            Tier::VeryGood => "Very good!",
            Tier::Good => "Good work!",
            Tier::NeedsImprovement => "There is more to learn!",
            Tier::KeepTrying => "Don't give up, keep studying!",
        }
    }
}

/// Final statistics for a run
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub correct: usize,
    pub total: usize,
    /// Rounded percentage, 0 when nothing was answered
    pub accuracy: u32,
    /// Number of phrases in the run's corpus
    pub studied: usize,
    pub tier: Tier,
}

impl Summary {
    pub fn new(correct: usize, total: usize, studied: usize) -> Self {
        let accuracy = accuracy(correct, total);
        Self {
            correct,
            total,
            accuracy,
            studied,
            tier: Tier::from_accuracy(accuracy),
        }
    }

    /// Below "very good" the learner is nudged to go over the material again
    pub fn recommends_review(&self) -> bool {
        self.accuracy < 75
    }
}

pub fn accuracy(correct: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (correct as f64 / total as f64 * 100.0).round() as u32
}

pub fn summarize(session: &Session) -> Summary {
    Summary::new(
        session.correct_count(),
        session.total_answered(),
        session.corpus().len(),
    )
}
