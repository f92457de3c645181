use serde::{Deserialize, Serialize};

/// CEFR proficiency scale. Doubles as the word-difficulty tag on tokens and
/// as the learner's target reading level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CefrLevel {
    A1,
    A2,
    B1,
    B2,
    C1,
    C2,
}

impl CefrLevel {
    pub fn all() -> &'static [CefrLevel] {
        &[
            CefrLevel::A1,
            CefrLevel::A2,
            CefrLevel::B1,
            CefrLevel::B2,
            CefrLevel::C1,
            CefrLevel::C2,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CefrLevel::A1 => "A1",
            CefrLevel::A2 => "A2",
            CefrLevel::B1 => "B1",
            CefrLevel::B2 => "B2",
            CefrLevel::C1 => "C1",
            CefrLevel::C2 => "C2",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A1" => Some(CefrLevel::A1),
            "A2" => Some(CefrLevel::A2),
            "B1" => Some(CefrLevel::B1),
            "B2" => Some(CefrLevel::B2),
            "C1" => Some(CefrLevel::C1),
            "C2" => Some(CefrLevel::C2),
            _ => None,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// The next easier level, or None at A1.
    pub fn lower(self) -> Option<Self> {
        match self {
            CefrLevel::A1 => None,
            CefrLevel::A2 => Some(CefrLevel::A1),
            CefrLevel::B1 => Some(CefrLevel::A2),
            CefrLevel::B2 => Some(CefrLevel::B1),
            CefrLevel::C1 => Some(CefrLevel::B2),
            CefrLevel::C2 => Some(CefrLevel::C1),
        }
    }
}

impl std::fmt::Display for CefrLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lookups of at-or-below-level words needed before the target level drops.
pub const STRUGGLE_THRESHOLD: u8 = 3;

/// Tracks the learner's target level and lowers it after repeated lookups of
/// words that should already be comfortable. Mutated only through
/// `record_lookup`; a fresh session starts a fresh controller.
#[derive(Clone, Debug)]
pub struct LevelController {
    current: CefrLevel,
    struggle_count: u8,
}

impl LevelController {
    pub fn new(level: CefrLevel) -> Self {
        Self {
            current: level,
            struggle_count: 0,
        }
    }

    pub fn current(&self) -> CefrLevel {
        self.current
    }

    pub fn struggle_count(&self) -> u8 {
        self.struggle_count
    }

    /// Record that the learner looked up a word tagged `word_level`.
    /// Returns the new target level when this lookup triggers a downgrade.
    ///
    /// A lookup above the current level is an expected lookup and leaves the
    /// counter untouched (it does not reset it). At A1 the counter saturates:
    /// no further downgrade, no reset.
    pub fn record_lookup(&mut self, word_level: CefrLevel) -> Option<CefrLevel> {
        if word_level.index() > self.current.index() {
            return None;
        }

        self.struggle_count = self.struggle_count.saturating_add(1);
        if self.struggle_count >= STRUGGLE_THRESHOLD {
            if let Some(lower) = self.current.lower() {
                self.current = lower;
                self.struggle_count = 0;
                return Some(lower);
            }
        }
        None
    }
}
