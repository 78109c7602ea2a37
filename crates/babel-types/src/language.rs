use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::TagError;

/// Well-formed BCP 47 language tag, stored in canonical case.
///
/// Two tags compare equal when they differ only in letter case, so `EN`
/// and `en` are the same key while `en` and `en-US` are not.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LanguageTag(String);

impl LanguageTag {
    pub fn parse(input: &str) -> Result<Self, TagError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(TagError::Empty);
        }

        let tag = language_tags::LanguageTag::parse(trimmed).map_err(|e| TagError::Malformed {
            tag: trimmed.to_string(),
            reason: e.to_string(),
        })?;

        // The parser already applies BCP 47 case conventions
        Ok(Self(tag.into_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Primary language subtag ("de" for "de-AT")
    pub fn primary_language(&self) -> &str {
        self.0.split('-').next().unwrap_or(&self.0)
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for LanguageTag {
    type Err = TagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for LanguageTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for LanguageTag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive_equality() {
        let upper = LanguageTag::parse("EN").unwrap();
        let lower = LanguageTag::parse("en").unwrap();
        assert_eq!(upper, lower);
        assert_eq!(upper.as_str(), "en");
    }

    #[test]
    fn test_region_is_distinct() {
        let en = LanguageTag::parse("en").unwrap();
        let en_us = LanguageTag::parse("en-us").unwrap();
        assert_ne!(en, en_us);
        assert_eq!(en_us.as_str(), "en-US");
        assert_eq!(en_us.primary_language(), "en");
    }

    #[test]
    fn test_script_and_private_use_casing() {
        let tag = LanguageTag::parse("ZH-hant-tw").unwrap();
        assert_eq!(tag.as_str(), "zh-Hant-TW");

        let private = LanguageTag::parse("de-X-AB-Test").unwrap();
        assert_eq!(private.as_str(), "de-x-ab-test");
    }

    #[test]
    fn test_grandfathered_and_numeric_regions() {
        assert_eq!(LanguageTag::parse("es-419").unwrap().as_str(), "es-419");
        assert_eq!(LanguageTag::parse("SR-latn-rs").unwrap().as_str(), "sr-Latn-RS");
        assert_eq!(
            LanguageTag::parse("I-KLINGON").unwrap(),
            LanguageTag::parse("i-klingon").unwrap()
        );
    }

    #[test]
    fn test_rejects_malformed() {
        assert_eq!(LanguageTag::parse("  "), Err(TagError::Empty));
        assert!(matches!(
            LanguageTag::parse("en_US!"),
            Err(TagError::Malformed { .. })
        ));
    }
}
