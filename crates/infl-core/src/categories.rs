use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::language::LanguageProfile;
use crate::ConfigError;

/// Contents of `config/categories.yaml`: the search categories for a
/// collection run and the language profile they target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoriesFile {
    #[serde(default)]
    pub language: LanguageProfile,
    pub categories: Vec<String>,
}

impl CategoriesFile {
    /// Restricts the configured categories to `only` (matched case-insensitively),
    /// keeping configuration order. An empty `only` keeps everything.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] if a requested category is not configured.
    pub fn select(&self, only: &[String]) -> Result<Vec<String>, ConfigError> {
        if only.is_empty() {
            return Ok(self.categories.clone());
        }

        for wanted in only {
            if !self
                .categories
                .iter()
                .any(|c| c.eq_ignore_ascii_case(wanted))
            {
                return Err(ConfigError::Validation(format!(
                    "category '{wanted}' is not listed in the categories file"
                )));
            }
        }

        Ok(self
            .categories
            .iter()
            .filter(|c| only.iter().any(|w| w.eq_ignore_ascii_case(c)))
            .cloned()
            .collect())
    }
}

/// Load and validate the categories configuration from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_categories(path: &Path) -> Result<CategoriesFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CategoriesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let mut file: CategoriesFile = serde_yaml::from_str(&content)?;
    for category in &mut file.categories {
        *category = category.trim().to_string();
    }

    validate_categories(&file)?;

    Ok(file)
}

fn validate_categories(file: &CategoriesFile) -> Result<(), ConfigError> {
    if file.categories.is_empty() {
        return Err(ConfigError::Validation(
            "at least one category must be configured".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for category in &file.categories {
        if category.is_empty() {
            return Err(ConfigError::Validation(
                "category names must be non-empty".to_string(),
            ));
        }
        if !seen.insert(category.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate category: '{category}'"
            )));
        }
    }

    let profile = &file.language;
    if profile.name.trim().is_empty() || profile.code.trim().is_empty() {
        return Err(ConfigError::Validation(
            "language name and code must be non-empty".to_string(),
        ));
    }
    if profile.script_block.start > profile.script_block.end {
        return Err(ConfigError::Validation(format!(
            "language script block is inverted: U+{:04X} > U+{:04X}",
            u32::from(profile.script_block.start),
            u32::from(profile.script_block.end)
        )));
    }

    Ok(())
}

#[cfg(test)]
#[path = "categories_test.rs"]
mod tests;
