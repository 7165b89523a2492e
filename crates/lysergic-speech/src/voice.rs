//! Voice discovery types and preference-based selection.

use serde::{Deserialize, Serialize};

/// A synthesis voice offered by the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceInfo {
    /// Display name, e.g. `"Samantha"` or `"Google UK English Female"`.
    pub name: String,
    /// BCP 47 language tag, e.g. `"en-US"`.
    pub lang: String,
    /// Whether the platform marks this as its default voice.
    #[serde(default)]
    pub default: bool,
}

impl VoiceInfo {
    pub fn new(name: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lang: lang.into(),
            default: false,
        }
    }

    #[must_use]
    pub const fn as_default(mut self) -> Self {
        self.default = true;
        self
    }
}

/// Which voice the player should pick when several are available.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoicePreferences {
    /// Exact voice name to use when present.
    pub name: Option<String>,
    /// Preferred language tag.
    pub lang: String,
    /// Substrings looked for in voice names within the preferred language.
    pub gender_hints: Vec<String>,
    /// Language prefix accepted when nothing in `lang` is available.
    pub fallback_lang: String,
}

impl Default for VoicePreferences {
    fn default() -> Self {
        Self {
            name: None,
            lang: "en-US".to_string(),
            gender_hints: vec!["female".to_string()],
            fallback_lang: "en".to_string(),
        }
    }
}

/// Pick a voice by trying each preference in order.
///
/// 1. exact name
/// 2. preferred language with a gender hint in the name
/// 3. preferred language marked default
/// 4. preferred language
/// 5. fallback language prefix
///
/// Returns `None` when nothing matches, leaving the driver default in place.
pub fn select_voice<'a>(voices: &'a [VoiceInfo], prefs: &VoicePreferences) -> Option<&'a VoiceInfo> {
    let in_lang = |v: &VoiceInfo| lang_eq(&v.lang, &prefs.lang);
    let hinted = |v: &VoiceInfo| {
        let name = v.name.to_lowercase();
        prefs
            .gender_hints
            .iter()
            .any(|hint| !hint.is_empty() && name.contains(&hint.to_lowercase()))
    };

    if let Some(wanted) = prefs.name.as_deref() {
        if let Some(voice) = voices.iter().find(|v| v.name == wanted) {
            return Some(voice);
        }
    }

    voices
        .iter()
        .find(|v| in_lang(v) && hinted(v))
        .or_else(|| voices.iter().find(|v| in_lang(v) && v.default))
        .or_else(|| voices.iter().find(|v| in_lang(v)))
        .or_else(|| {
            voices
                .iter()
                .find(|v| lang_has_prefix(&v.lang, &prefs.fallback_lang))
        })
}

/// Normalise a language tag: lowercase with `-` separators.
fn normalise_lang(lang: &str) -> String {
    lang.trim().replace('_', "-").to_lowercase()
}

fn lang_eq(a: &str, b: &str) -> bool {
    normalise_lang(a) == normalise_lang(b)
}

fn lang_has_prefix(lang: &str, prefix: &str) -> bool {
    let prefix = normalise_lang(prefix);
    !prefix.is_empty() && normalise_lang(lang).starts_with(&prefix)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn voices() -> Vec<VoiceInfo> {
        vec![
            VoiceInfo::new("Thomas", "fr-FR").as_default(),
            VoiceInfo::new("Daniel", "en-GB"),
            VoiceInfo::new("Alex", "en-US"),
            VoiceInfo::new("Fred", "en_US").as_default(),
            VoiceInfo::new("Google US English Female", "en-US"),
        ]
    }

    #[test]
    fn test_exact_name_wins() {
        let prefs = VoicePreferences {
            name: Some("Daniel".to_string()),
            ..VoicePreferences::default()
        };
        assert_eq!(select_voice(&voices(), &prefs).unwrap().name, "Daniel");
    }

    #[test]
    fn test_gender_hint_before_default() {
        let list = voices();
        let picked = select_voice(&list, &VoicePreferences::default()).unwrap();
        assert_eq!(picked.name, "Google US English Female");
    }

    #[test]
    fn test_default_then_language_only() {
        let mut list = voices();
        list.pop();
        // Underscore tags compare equal to hyphenated ones.
        assert_eq!(select_voice(&list, &VoicePreferences::default()).unwrap().name, "Fred");

        list.pop();
        assert_eq!(select_voice(&list, &VoicePreferences::default()).unwrap().name, "Alex");
    }

    #[test]
    fn test_fallback_language_prefix() {
        let list = vec![
            VoiceInfo::new("Thomas", "fr-FR").as_default(),
            VoiceInfo::new("Daniel", "en-GB"),
        ];
        assert_eq!(select_voice(&list, &VoicePreferences::default()).unwrap().name, "Daniel");
    }

    #[test]
    fn test_no_match_leaves_voice_unset() {
        let list = vec![VoiceInfo::new("Thomas", "fr-FR").as_default()];
        assert!(select_voice(&list, &VoicePreferences::default()).is_none());
        assert!(select_voice(&[], &VoicePreferences::default()).is_none());
    }
}
