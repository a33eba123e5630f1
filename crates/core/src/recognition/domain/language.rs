use crate::shared::constants::SUPPORTED_LANGUAGE_TAGS;

use super::recognition_config::ConfigError;

/// A language selection: a BCP-47 tag from the supported set, or automatic
/// detection (whisper only).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LanguageTag {
    Auto,
    Tag(&'static str),
}

impl LanguageTag {
    /// Parse a user-supplied tag. Anything outside the supported set is
    /// rejected rather than forwarded to an engine.
    pub fn parse(s: &str) -> Result<LanguageTag, ConfigError> {
        if s.eq_ignore_ascii_case("auto") {
            return Ok(LanguageTag::Auto);
        }
        SUPPORTED_LANGUAGE_TAGS
            .iter()
            .copied()
            .find(|tag| tag.eq_ignore_ascii_case(s))
            .map(LanguageTag::Tag)
            .ok_or_else(|| ConfigError::UnknownLanguageTag(s.to_string()))
    }

    /// The BCP-47 tag sent to cloud engines; `Auto` has none.
    pub fn code(&self) -> Option<&'static str> {
        match self {
            LanguageTag::Auto => None,
            LanguageTag::Tag(tag) => Some(tag),
        }
    }

    /// Whisper's language parameter: the primary subtag, or `auto` for
    /// detection mode.
    pub fn whisper_code(&self) -> &'static str {
        match self {
            LanguageTag::Auto => "auto",
            LanguageTag::Tag(tag) => tag.split('-').next().unwrap_or(tag),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("en-US")]
    #[case("fr-FR")]
    #[case("ar-DZ")]
    #[case("es-ES")]
    fn test_parse_supported_tags(#[case] tag: &str) {
        assert_eq!(LanguageTag::parse(tag).unwrap().code(), Some(tag));
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(LanguageTag::parse("EN-us").unwrap().code(), Some("en-US"));
    }

    #[test]
    fn test_parse_auto() {
        assert_eq!(LanguageTag::parse("auto").unwrap(), LanguageTag::Auto);
        assert_eq!(LanguageTag::parse("Auto").unwrap(), LanguageTag::Auto);
    }

    #[test]
    fn test_parse_rejects_unknown_tag() {
        let err = LanguageTag::parse("xx-XX").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownLanguageTag(tag) if tag == "xx-XX"));
    }

    #[test]
    fn test_whisper_code_uses_primary_subtag() {
        assert_eq!(LanguageTag::parse("fr-FR").unwrap().whisper_code(), "fr");
        assert_eq!(LanguageTag::Auto.whisper_code(), "auto");
    }
}
