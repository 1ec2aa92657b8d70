use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::IdError;

/// Display language of the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ta,
}

impl Language {
    /// Two-letter code used for persistence (`en` / `ta`).
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ta => "ta",
        }
    }

    /// BCP-47 tag handed to the speech engine.
    #[must_use]
    pub fn speech_tag(self) -> &'static str {
        match self {
            Language::En => "en-US",
            Language::Ta => "ta-IN",
        }
    }

    /// Parses a stored two-letter code. Anything else yields `None`.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "en" => Some(Language::En),
            "ta" => Some(Language::Ta),
            _ => None,
        }
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Language::En => Language::Ta,
            Language::Ta => Language::En,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s.trim()).ok_or_else(|| IdError::Parse {
            kind: "Language",
            raw: s.to_string(),
        })
    }
}

/// A string available in both English and Tamil.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BilingualText {
    pub en: String,
    pub ta: String,
}

impl BilingualText {
    #[must_use]
    pub fn new(en: impl Into<String>, ta: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            ta: ta.into(),
        }
    }

    #[must_use]
    pub fn get(&self, language: Language) -> &str {
        match language {
            Language::En => &self.en,
            Language::Ta => &self.ta,
        }
    }
}
