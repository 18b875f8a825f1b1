use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::products::ProductRepository;
use crate::ConfigError;

/// Image strip length on a landing-page category card.
pub const CARD_IMAGE_LIMIT: usize = 10;

/// A landing-page category card: a display label mapped onto the catalog
/// category it searches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShowcaseCard {
    pub label: String,
    pub category: String,
    pub cover: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShowcaseGroup {
    pub title: String,
    pub cards: Vec<ShowcaseCard>,
}

#[derive(Debug, Deserialize)]
pub struct ShowcaseFile {
    pub groups: Vec<ShowcaseGroup>,
}

/// A card resolved against the loaded catalog.
#[derive(Debug, Clone)]
pub struct ResolvedCard<'a> {
    pub label: &'a str,
    pub category: &'a str,
    pub product_count: usize,
    pub images: Vec<&'a str>,
}

impl ShowcaseCard {
    #[must_use]
    pub fn resolve<'a>(&'a self, repository: &'a ProductRepository) -> ResolvedCard<'a> {
        ResolvedCard {
            label: &self.label,
            category: &self.category,
            product_count: repository
                .iter()
                .filter(|p| p.category == self.category)
                .count(),
            images: repository.images_for_category(&self.category, &self.cover, CARD_IMAGE_LIMIT),
        }
    }
}

/// Load and validate the showcase layout from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_showcase(path: &Path) -> Result<ShowcaseFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ShowcaseFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let showcase: ShowcaseFile =
        serde_yaml::from_str(&content).map_err(ConfigError::ShowcaseFileParse)?;

    validate_showcase(&showcase)?;

    Ok(showcase)
}

fn validate_showcase(showcase: &ShowcaseFile) -> Result<(), ConfigError> {
    let mut seen_labels = HashSet::new();

    for group in &showcase.groups {
        if group.title.trim().is_empty() {
            return Err(ConfigError::Validation(
                "group title must be non-empty".to_string(),
            ));
        }

        if group.cards.is_empty() {
            return Err(ConfigError::Validation(format!(
                "group '{}' has no cards",
                group.title
            )));
        }

        for card in &group.cards {
            if card.label.trim().is_empty() || card.category.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "card in group '{}' needs both a label and a category",
                    group.title
                )));
            }

            if !seen_labels.insert(card.label.to_lowercase()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate card label: '{}'",
                    card.label
                )));
            }
        }
    }

    Ok(())
}
