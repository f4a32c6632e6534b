use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Content language of the site.
///
/// Arabic is the primary language: every bilingual field stores its Arabic
/// value in the primary slot and an optional English override beside it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Ar,
    En,
}

impl Language {
    pub const PRIMARY: Language = Language::Ar;

    pub fn is_primary(self) -> bool {
        self == Self::PRIMARY
    }

    pub fn is_rtl(self) -> bool {
        matches!(self, Language::Ar)
    }

    pub fn other(self) -> Language {
        match self {
            Language::Ar => Language::En,
            Language::En => Language::Ar,
        }
    }

    /// Suffix used by bilingual content keys (`titleAr`, `titleEn`).
    pub fn key_suffix(self) -> &'static str {
        match self {
            Language::Ar => "Ar",
            Language::En => "En",
        }
    }
}

/// A borrowed bilingual value: the primary text and its optional override.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Localized<'a> {
    pub primary: &'a str,
    pub secondary: Option<&'a str>,
}

impl<'a> Localized<'a> {
    pub fn new(primary: &'a str, secondary: Option<&'a str>) -> Self {
        Self { primary, secondary }
    }

    /// Resolve for `language`, never yielding a blank override.
    pub fn get(&self, language: Language) -> &'a str {
        resolve(self.primary, self.secondary, language)
    }
}

/// Pick the text to show for `language`.
///
/// The primary language always reads the primary field. Any other language
/// reads the secondary field when it is present and non-empty, and falls back
/// to the primary field otherwise.
pub fn resolve<'a>(primary: &'a str, secondary: Option<&'a str>, language: Language) -> &'a str {
    if language.is_primary() {
        return primary;
    }
    match secondary {
        Some(text) if !text.is_empty() => text,
        _ => primary,
    }
}
