use serde::{Deserialize, Deserializer, Serialize};

use crate::engine::level::CefrLevel;

/// One unit of analyzed text as produced by the analyzer service.
///
/// Word tokens carry a CEFR tag; structural tokens (the literal `"\n"`
/// line-break marker, stray punctuation) come over the wire with an empty or
/// missing `cefr` and a sentinel importance, so every non-core field is
/// defaulted on deserialization.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub cefr: Option<CefrLevel>,
    #[serde(default)]
    pub importance: i8,
    #[serde(default, rename = "isDifficult")]
    pub is_difficult: bool,
}

impl Token {
    /// Line-break marker emitted between analyzed paragraphs.
    pub fn is_line_break(&self) -> bool {
        self.text == "\n"
    }

    /// Whether this token is a classifiable word (has a CEFR tag).
    pub fn is_word(&self) -> bool {
        self.cefr.is_some()
    }
}

/// The analyzer sends `"cefr": ""` on structural tokens; treat the empty
/// string (or an unrecognized level) as absent rather than failing the
/// whole token stream.
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<CefrLevel>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(CefrLevel::parse))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_a_word_token() {
        let token: Token = serde_json::from_str(
            r#"{"text": "ambitious", "importance": 3, "cefr": "B2", "isDifficult": true}"#,
        )
        .unwrap();
        assert_eq!(token.text, "ambitious");
        assert_eq!(token.cefr, Some(CefrLevel::B2));
        assert_eq!(token.importance, 3);
        assert!(token.is_difficult);
        assert!(token.is_word());
    }

    #[test]
    fn deserializes_a_line_break_marker() {
        // Structural tokens omit isDifficult and use importance -1 / cefr "".
        let token: Token =
            serde_json::from_str(r#"{"text": "\n", "importance": -1, "cefr": ""}"#).unwrap();
        assert!(token.is_line_break());
        assert!(!token.is_word());
        assert!(!token.is_difficult);
    }

    #[test]
    fn missing_optional_fields_default() {
        let token: Token = serde_json::from_str(r#"{"text": "hm"}"#).unwrap();
        assert_eq!(token.cefr, None);
        assert_eq!(token.importance, 0);
        assert!(!token.is_difficult);
    }

    #[test]
    fn unknown_level_string_is_treated_as_absent() {
        let token: Token =
            serde_json::from_str(r#"{"text": "x", "cefr": "Z9", "importance": 1}"#).unwrap();
        assert_eq!(token.cefr, None);
    }
}
