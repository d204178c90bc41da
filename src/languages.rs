//! Static language registry backing the input-language selector.
//!
//! The registry is fixed at compile time and never mutated; its order is the
//! display order of the selector. The `system` sentinel is not a language:
//! it switches capture from the microphone to the system audio output device.

use serde::Serialize;

/// One selectable input language.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Language {
    pub code: &'static str,
    pub name: &'static str,
}

/// Selector value meaning "capture system audio instead of the microphone".
pub const SYSTEM_AUDIO: &str = "system";

pub static LANGUAGES: &[Language] = &[
    Language { code: "en", name: "English" },
    Language { code: "es", name: "Spanish" },
    Language { code: "fr", name: "French" },
    Language { code: "de", name: "German" },
    Language { code: "it", name: "Italian" },
    Language { code: "pt", name: "Portuguese" },
    Language { code: "nl", name: "Dutch" },
    Language { code: "sv", name: "Swedish" },
    Language { code: "no", name: "Norwegian" },
    Language { code: "da", name: "Danish" },
    Language { code: "fi", name: "Finnish" },
    Language { code: "pl", name: "Polish" },
    Language { code: "cs", name: "Czech" },
    Language { code: "sk", name: "Slovak" },
    Language { code: "hu", name: "Hungarian" },
    Language { code: "ro", name: "Romanian" },
    Language { code: "bg", name: "Bulgarian" },
    Language { code: "el", name: "Greek" },
    Language { code: "ru", name: "Russian" },
    Language { code: "uk", name: "Ukrainian" },
    Language { code: "tr", name: "Turkish" },
    Language { code: "ar", name: "Arabic" },
    Language { code: "he", name: "Hebrew" },
    Language { code: "fa", name: "Persian" },
    Language { code: "hi", name: "Hindi" },
    Language { code: "bn", name: "Bengali" },
    Language { code: "ta", name: "Tamil" },
    Language { code: "th", name: "Thai" },
    Language { code: "vi", name: "Vietnamese" },
    Language { code: "id", name: "Indonesian" },
    Language { code: "ms", name: "Malay" },
    Language { code: "zh", name: "Chinese" },
    Language { code: "ja", name: "Japanese" },
    Language { code: "ko", name: "Korean" },
    Language { code: "sw", name: "Swahili" },
];

/// Look up a registry entry by code.
pub fn find(code: &str) -> Option<&'static Language> {
    LANGUAGES.iter().find(|lang| lang.code == code)
}

/// Parsed form of the selector value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LanguageSelection {
    /// Capture the system audio output device; no language hint is attached.
    SystemAudio,
    /// Capture the microphone and hint the given language to the transcriber.
    Code(String),
}

impl LanguageSelection {
    pub fn parse(value: &str) -> Self {
        if value == SYSTEM_AUDIO {
            Self::SystemAudio
        } else {
            Self::Code(value.to_string())
        }
    }

    /// Language code to pass to the transfer client, if any.
    pub fn language_hint(&self) -> Option<&str> {
        match self {
            Self::SystemAudio => None,
            Self::Code(code) => Some(code),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_starts_with_english() {
        assert_eq!(LANGUAGES[0].code, "en");
        assert_eq!(LANGUAGES[0].name, "English");
    }

    #[test]
    fn test_find_known_code() {
        let lang = find("fr").expect("fr should be registered");
        assert_eq!(lang.name, "French");
    }

    #[test]
    fn test_find_unknown_code() {
        assert!(find("tlh").is_none());
    }

    #[test]
    fn test_system_sentinel_is_not_a_language() {
        assert!(find(SYSTEM_AUDIO).is_none());
    }

    #[test]
    fn test_parse_language_code() {
        let selection = LanguageSelection::parse("de");
        assert_eq!(selection, LanguageSelection::Code("de".to_string()));
        assert_eq!(selection.language_hint(), Some("de"));
    }

    #[test]
    fn test_parse_system_sentinel() {
        let selection = LanguageSelection::parse("system");
        assert_eq!(selection, LanguageSelection::SystemAudio);
        assert_eq!(selection.language_hint(), None);
    }
}
