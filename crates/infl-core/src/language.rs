//! Target language/region profile used to filter discovered channels.

use serde::{Deserialize, Serialize};

/// An inclusive Unicode block, e.g. Tamil `U+0B80..=U+0BFF`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptBlock {
    pub start: char,
    pub end: char,
}

impl ScriptBlock {
    #[must_use]
    pub fn contains(&self, c: char) -> bool {
        (self.start..=self.end).contains(&c)
    }
}

/// Everything the content filter and the search requests need to know about
/// the language being targeted.
///
/// Missing fields in the categories file fall back to the Tamil profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageProfile {
    /// Human-readable label stored on every record (`"Tamil"`).
    pub name: String,
    /// ISO 639-1 code passed as `relevanceLanguage` (`"ta"`).
    pub code: String,
    /// Latin and native-script keywords, matched case-insensitively.
    pub keywords: Vec<String>,
    pub script_block: ScriptBlock,
    /// ISO 3166-1 alpha-2 region the language is concentrated in.
    pub country_code: String,
    /// City/state names that mark a channel from `country_code` as in-region.
    pub regional_keywords: Vec<String>,
}

impl LanguageProfile {
    #[must_use]
    pub fn tamil() -> Self {
        Self {
            name: "Tamil".to_string(),
            code: "ta".to_string(),
            keywords: vec![
                "tamil".to_string(),
                "தமிழ்".to_string(),
                "தமிழ".to_string(),
            ],
            script_block: ScriptBlock {
                start: '\u{0B80}',
                end: '\u{0BFF}',
            },
            country_code: "IN".to_string(),
            regional_keywords: vec!["chennai".to_string(), "tamil nadu".to_string()],
        }
    }
}

impl Default for LanguageProfile {
    fn default() -> Self {
        Self::tamil()
    }
}
