use crate::engine::profile::LearnerProfile;
use crate::engine::token::Token;

/// Display category for a word token. Drives the emphasis gradient: hard
/// words dominate, and the easy-word ladder fades with falling importance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    HardImportant,
    Hard,
    Important,
    Fade2,
    Fade1,
    Low,
}

/// Classify a token against the learner's profile.
///
/// Returns None for tokens without a CEFR tag — those are structural
/// (line breaks, stray punctuation) and get no emphasis category.
///
/// Priority order, first match wins:
/// 1. difficult and not learned: importance > 2 is HardImportant, else Hard;
/// 2. importance >= 3: Important (easy but load-bearing);
/// 3. the fade ladder: 2 -> Fade2, 1 -> Fade1, 0 -> Low.
///
/// Marking a word learned suppresses the difficulty signal entirely, dropping
/// the word back onto the easy ladder.
pub fn classify(token: &Token, profile: &LearnerProfile) -> Option<Category> {
    token.cefr?;

    if token.is_difficult && !profile.is_learned(&token.text) {
        return Some(if token.importance > 2 {
            Category::HardImportant
        } else {
            Category::Hard
        });
    }

    if token.importance >= 3 {
        return Some(Category::Important);
    }

    Some(match token.importance {
        2 => Category::Fade2,
        1 => Category::Fade1,
        _ => Category::Low,
    })
}
