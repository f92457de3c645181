use icu_normalizer::ComposingNormalizer;

/// Punctuation stripped from word edges before profile lookups.
const SURROUNDING_PUNCT: &[char] = &['.', ',', ':', ';', '?', '!', '"', '(', ')'];

/// Canonical identity key for a word: NFC-composed, surrounding punctuation
/// stripped, lowercased. Two tokens with the same surface word but different
/// casing or trailing punctuation map to the same profile entry.
pub fn normalize_word(word: &str) -> String {
    let composed = ComposingNormalizer::new_nfc().normalize(word);
    composed
        .trim_matches(|c| SURROUNDING_PUNCT.contains(&c))
        .to_lowercase()
}
