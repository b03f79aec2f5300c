// SPDX-FileCopyrightText: 2026 Bazari Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pure localization lookup for the Bazari bot.
//!
//! Three locales (Persian, Russian, English) over a closed key set. Persian
//! is the default: unknown locale codes resolve to it, mirroring the
//! fallback rule of the deployed bot. The lookup itself is stateless; locale
//! *resolution* (draft override > stored preference > default) belongs to
//! the engine.
//!
//! Parameterized messages keep a `{}` placeholder and are formatted at the
//! call site.

pub mod catalog;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

pub use catalog::Key;

/// Supported locales. The persisted code (`fa`, `ru`, `en`) is bit-exact.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    Fa,
    Ru,
    En,
}

impl Locale {
    /// The hard-coded default locale.
    pub const DEFAULT: Locale = Locale::Fa;

    /// Parses a stored or submitted locale code, falling back to the default.
    pub fn from_code(code: &str) -> Locale {
        code.parse().unwrap_or(Locale::DEFAULT)
    }

    pub fn code(self) -> &'static str {
        match self {
            Locale::Fa => "fa",
            Locale::Ru => "ru",
            Locale::En => "en",
        }
    }
}

/// Canonical default description, stored verbatim when the user supplies
/// none. Persisted ads depend on this exact string; do not change it.
pub const NO_DESCRIPTION_SENTINEL: &str = "توضیحات ندارد";

/// Phrases in any supported locale that mean "no description".
const NO_DESCRIPTION_PHRASES: [&str; 3] = ["بدون توضیح", "no description", "без описания"];

/// True when the (trimmed) input should be replaced by the sentinel:
/// empty, or one of the recognized "no description" phrases.
pub fn is_no_description(input: &str) -> bool {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return true;
    }
    let lowered = trimmed.to_lowercase();
    NO_DESCRIPTION_PHRASES
        .iter()
        .any(|phrase| lowered == *phrase)
}

/// Looks up the localized text for a key.
pub fn text(key: Key, locale: Locale) -> &'static str {
    let (fa, ru, en) = catalog::entry(key);
    match locale {
        Locale::Fa => fa,
        Locale::Ru => ru,
        Locale::En => en,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_locale_codes_fall_back_to_persian() {
        assert_eq!(Locale::from_code("fa"), Locale::Fa);
        assert_eq!(Locale::from_code("ru"), Locale::Ru);
        assert_eq!(Locale::from_code("en"), Locale::En);
        assert_eq!(Locale::from_code("de"), Locale::Fa);
        assert_eq!(Locale::from_code(""), Locale::Fa);
    }

    #[test]
    fn locale_codes_are_bit_exact() {
        assert_eq!(Locale::Fa.code(), "fa");
        assert_eq!(Locale::Ru.code(), "ru");
        assert_eq!(Locale::En.code(), "en");
        assert_eq!(Locale::DEFAULT, Locale::Fa);
    }

    #[test]
    fn no_description_detection() {
        assert!(is_no_description(""));
        assert!(is_no_description("   "));
        assert!(is_no_description("no description"));
        assert!(is_no_description("No Description"));
        assert!(is_no_description("بدون توضیح"));
        assert!(is_no_description("без описания"));
        assert!(!is_no_description("rare golden gift"));
        assert!(!is_no_description(NO_DESCRIPTION_SENTINEL));
    }

    #[test]
    fn every_key_has_all_three_locales() {
        use strum::IntoEnumIterator;

        for key in Key::iter() {
            for locale in [Locale::Fa, Locale::Ru, Locale::En] {
                assert!(
                    !text(key, locale).is_empty(),
                    "empty translation for {key:?}/{locale}"
                );
            }
        }
    }

    #[test]
    fn menu_labels_differ_per_locale() {
        assert_ne!(
            text(Key::NewAdButton, Locale::Fa),
            text(Key::NewAdButton, Locale::En)
        );
        assert_ne!(
            text(Key::WelcomeMessage, Locale::Ru),
            text(Key::WelcomeMessage, Locale::En)
        );
    }
}
