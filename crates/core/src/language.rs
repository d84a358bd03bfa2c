use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Languages offered in the source and target selectors.
///
/// Serialised as the English display name, which is also what the
/// translation service expects in `input_language` / `output_language`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Language {
    English,
    Malay,
    Chinese,
    Spanish,
    French,
    German,
    Italian,
    Japanese,
    Korean,
    Arabic,
    Hindi,
    Portuguese,
    Russian,
    Thai,
    Vietnamese,
    Indonesian,
}

impl Language {
    /// Selector order.
    pub const ALL: [Language; 16] = [
        Language::English,
        Language::Malay,
        Language::Chinese,
        Language::Spanish,
        Language::French,
        Language::German,
        Language::Italian,
        Language::Japanese,
        Language::Korean,
        Language::Arabic,
        Language::Hindi,
        Language::Portuguese,
        Language::Russian,
        Language::Thai,
        Language::Vietnamese,
        Language::Indonesian,
    ];

    pub const DEFAULT_SOURCE: Language = Language::English;
    pub const DEFAULT_TARGET: Language = Language::Malay;

    pub fn name(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Malay => "Malay",
            Language::Chinese => "Chinese",
            Language::Spanish => "Spanish",
            Language::French => "French",
            Language::German => "German",
            Language::Italian => "Italian",
            Language::Japanese => "Japanese",
            Language::Korean => "Korean",
            Language::Arabic => "Arabic",
            Language::Hindi => "Hindi",
            Language::Portuguese => "Portuguese",
            Language::Russian => "Russian",
            Language::Thai => "Thai",
            Language::Vietnamese => "Vietnamese",
            Language::Indonesian => "Indonesian",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unsupported language `{0}`")]
pub struct UnknownLanguage(pub String);

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Language::ALL
            .into_iter()
            .find(|lang| lang.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownLanguage(wanted.to_owned()))
    }
}
