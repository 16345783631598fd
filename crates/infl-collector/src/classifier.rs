//! Target-language heuristic for discovered channels.

use infl_core::LanguageProfile;

/// Decides whether a channel's metadata looks like content in the profile's
/// language.
#[derive(Debug, Clone)]
pub struct ContentClassifier {
    profile: LanguageProfile,
    keywords: Vec<String>,
    regional_keywords: Vec<String>,
}

impl ContentClassifier {
    #[must_use]
    pub fn new(profile: LanguageProfile) -> Self {
        let keywords = profile.keywords.iter().map(|k| k.to_lowercase()).collect();
        let regional_keywords = profile
            .regional_keywords
            .iter()
            .map(|k| k.to_lowercase())
            .collect();
        Self {
            profile,
            keywords,
            regional_keywords,
        }
    }

    #[must_use]
    pub fn profile(&self) -> &LanguageProfile {
        &self.profile
    }

    /// In order: a keyword in the title or description, any character from
    /// the profile's script block, or the profile's country plus a regional
    /// keyword in the description.
    #[must_use]
    pub fn matches(&self, title: &str, description: &str, country: Option<&str>) -> bool {
        let title = title.to_lowercase();
        let description = description.to_lowercase();

        if self
            .keywords
            .iter()
            .any(|k| title.contains(k.as_str()) || description.contains(k.as_str()))
        {
            return true;
        }

        let block = self.profile.script_block;
        if title.chars().chain(description.chars()).any(|c| block.contains(c)) {
            return true;
        }

        country == Some(self.profile.country_code.as_str())
            && self
                .regional_keywords
                .iter()
                .any(|k| description.contains(k.as_str()))
    }
}

impl Default for ContentClassifier {
    fn default() -> Self {
        Self::new(LanguageProfile::default())
    }
}
