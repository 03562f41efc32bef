use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::ConfigError;

/// A named group of search terms, e.g. `"fruits"`.
#[derive(Debug, Clone, Deserialize)]
pub struct TermCategory {
    pub name: String,
    pub terms: Vec<String>,
}

/// Search terms for a batch run, grouped by category.
#[derive(Debug, Clone, Deserialize)]
pub struct TermList {
    pub categories: Vec<TermCategory>,
}

impl TermList {
    /// All terms in file order, trimmed.
    #[must_use]
    pub fn terms(&self) -> Vec<String> {
        self.categories
            .iter()
            .flat_map(|c| c.terms.iter())
            .map(|t| t.trim().to_string())
            .collect()
    }
}

/// Load and validate a term list from a YAML file.
///
/// ```yaml
/// categories:
///   - name: dairy
///     terms: [leite, queijo]
/// ```
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_terms(path: &Path) -> Result<TermList, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::TermsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_terms(&content)
}

pub(crate) fn parse_terms(content: &str) -> Result<TermList, ConfigError> {
    let list: TermList = serde_yaml::from_str(content).map_err(ConfigError::TermsFileParse)?;
    validate_terms(&list)?;
    Ok(list)
}

fn validate_terms(list: &TermList) -> Result<(), ConfigError> {
    let mut seen_categories = HashSet::new();
    let mut seen_terms = HashSet::new();
    let mut total = 0usize;

    for category in &list.categories {
        if category.name.trim().is_empty() {
            return Err(ConfigError::InvalidTermList(
                "category name must be non-empty".to_string(),
            ));
        }
        if !seen_categories.insert(category.name.trim().to_lowercase()) {
            return Err(ConfigError::InvalidTermList(format!(
                "duplicate category: '{}'",
                category.name
            )));
        }
        if let Some(pos) = category.terms.iter().position(|t| t.trim().is_empty()) {
            return Err(ConfigError::InvalidTermList(format!(
                "category '{}' has an empty term at position {}",
                category.name,
                pos + 1
            )));
        }
        for term in &category.terms {
            if !seen_terms.insert(term.trim().to_lowercase()) {
                return Err(ConfigError::InvalidTermList(format!(
                    "duplicate term '{}' in category '{}'",
                    term.trim(),
                    category.name
                )));
            }
        }
        total += category.terms.len();
    }

    if total == 0 {
        return Err(ConfigError::InvalidTermList(
            "term list contains no terms".to_string(),
        ));
    }

    Ok(())
}
