use crate::error::{ChunkerError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Option mapping accepted by the strategy selector
pub type StrategyOptions = Map<String, Value>;

/// Section label used for text that precedes the first header
pub const DEFAULT_SECTION: &str = "Introduction";

/// Common behaviour of the per-strategy configuration structs
pub trait StrategyConfig: Serialize + DeserializeOwned + Default {
    /// Check option values; called once when the strategy is built
    fn validate(&self) -> Result<()>;

    /// Parse an option mapping, filling unspecified options with defaults.
    /// Unknown keys are ignored.
    fn from_options(options: &StrategyOptions) -> Result<Self> {
        let config: Self = serde_json::from_value(Value::Object(options.clone()))
            .map_err(|e| ChunkerError::validation(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Default options rendered as a mapping
    fn default_options() -> StrategyOptions {
        match serde_json::to_value(Self::default()) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }
}

/// Fixed-size sliding window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterConfig {
    /// Window length in characters
    pub chunk_size: usize,

    /// Characters shared by consecutive windows
    pub chunk_overlap: usize,
}

impl Default for CharacterConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            chunk_overlap: 200,
        }
    }
}

impl StrategyConfig for CharacterConfig {
    fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(ChunkerError::validation("chunk_size must be > 0"));
        }
        Ok(())
    }
}

/// Blank-line paragraph grouping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParagraphConfig {
    /// Paragraphs are merged while the combined length stays below this
    pub min_chunk_size: usize,
}

impl Default for ParagraphConfig {
    fn default() -> Self {
        Self {
            min_chunk_size: 100,
        }
    }
}

impl StrategyConfig for ParagraphConfig {
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

/// Sentence windows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SentenceConfig {
    pub sentences_per_chunk: usize,

    /// Sentences shared by consecutive windows
    pub overlap: usize,
}

impl Default for SentenceConfig {
    fn default() -> Self {
        Self {
            sentences_per_chunk: 5,
            overlap: 1,
        }
    }
}

impl StrategyConfig for SentenceConfig {
    fn validate(&self) -> Result<()> {
        if self.sentences_per_chunk == 0 {
            return Err(ChunkerError::validation("sentences_per_chunk must be > 0"));
        }
        Ok(())
    }
}

/// Recursive separator fallback
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecursiveConfig {
    /// Upper bound for packed chunks, in characters
    pub chunk_size: usize,

    /// Budget for parts carried over into the next chunk, in characters
    pub chunk_overlap: usize,

    /// Separators tried in order; the empty string splits into characters
    pub separators: Vec<String>,
}

impl Default for RecursiveConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            chunk_overlap: 200,
            separators: vec![
                "\n\n".to_string(),
                "\n".to_string(),
                " ".to_string(),
                String::new(),
            ],
        }
    }
}

impl StrategyConfig for RecursiveConfig {
    fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(ChunkerError::validation("chunk_size must be > 0"));
        }

        if self.chunk_overlap > self.chunk_size {
            return Err(ChunkerError::validation(format!(
                "chunk_overlap ({}) cannot exceed chunk_size ({})",
                self.chunk_overlap, self.chunk_size
            )));
        }

        if self.separators.is_empty() {
            return Err(ChunkerError::validation("separators must not be empty"));
        }

        Ok(())
    }
}

/// Markdown header sections
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HierarchicalConfig {
    /// Deepest header level that starts a new chunk (1 for `#`, 2 for `##`, ...)
    pub split_level: usize,

    /// Section label for text before the first header
    pub default_section: String,
}

impl Default for HierarchicalConfig {
    fn default() -> Self {
        Self {
            split_level: 2,
            default_section: DEFAULT_SECTION.to_string(),
        }
    }
}

impl StrategyConfig for HierarchicalConfig {
    fn validate(&self) -> Result<()> {
        if !(1..=6).contains(&self.split_level) {
            return Err(ChunkerError::validation(format!(
                "split_level must be between 1 and 6, got {}",
                self.split_level
            )));
        }
        Ok(())
    }
}

/// Embedding similarity breaks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SemanticConfig {
    /// Cosine similarity at or above which adjacent sentences stay together
    pub threshold: f64,
}

impl Default for SemanticConfig {
    fn default() -> Self {
        Self { threshold: 0.8 }
    }
}

impl StrategyConfig for SemanticConfig {
    fn validate(&self) -> Result<()> {
        if !self.threshold.is_finite() {
            return Err(ChunkerError::validation("threshold must be a finite number"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn options(value: Value) -> StrategyOptions {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_default_configs_valid() {
        assert!(CharacterConfig::default().validate().is_ok());
        assert!(ParagraphConfig::default().validate().is_ok());
        assert!(SentenceConfig::default().validate().is_ok());
        assert!(RecursiveConfig::default().validate().is_ok());
        assert!(HierarchicalConfig::default().validate().is_ok());
        assert!(SemanticConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_options_fill_defaults() {
        let config = CharacterConfig::from_options(&options(json!({ "chunk_size": 50 }))).unwrap();
        assert_eq!(config.chunk_size, 50);
        assert_eq!(config.chunk_overlap, 200);
    }

    #[test]
    fn test_unknown_options_ignored() {
        let config =
            SentenceConfig::from_options(&options(json!({ "unused": true, "overlap": 0 }))).unwrap();
        assert_eq!(config.sentences_per_chunk, 5);
        assert_eq!(config.overlap, 0);
    }

    #[test]
    fn test_config_validation() {
        let zero = CharacterConfig::from_options(&options(json!({ "chunk_size": 0 })));
        assert!(matches!(zero, Err(ChunkerError::Validation(_))));

        let negative = CharacterConfig::from_options(&options(json!({ "chunk_size": -5 })));
        assert!(matches!(negative, Err(ChunkerError::Validation(_))));

        let wrong_type = SemanticConfig::from_options(&options(json!({ "threshold": "high" })));
        assert!(matches!(wrong_type, Err(ChunkerError::Validation(_))));

        let overlap = RecursiveConfig::from_options(&options(
            json!({ "chunk_size": 10, "chunk_overlap": 11 }),
        ));
        assert!(matches!(overlap, Err(ChunkerError::Validation(_))));

        let no_separators = RecursiveConfig::from_options(&options(json!({ "separators": [] })));
        assert!(matches!(no_separators, Err(ChunkerError::Validation(_))));

        let level = HierarchicalConfig::from_options(&options(json!({ "split_level": 0 })));
        assert!(matches!(level, Err(ChunkerError::Validation(_))));

        let sentences = SentenceConfig::from_options(&options(json!({ "sentences_per_chunk": 0 })));
        assert!(matches!(sentences, Err(ChunkerError::Validation(_))));
    }

    #[test]
    fn test_character_overlap_above_size_is_accepted() {
        let config = CharacterConfig::from_options(&options(
            json!({ "chunk_size": 10, "chunk_overlap": 30 }),
        ));
        assert!(config.is_ok());
    }

    #[test]
    fn test_default_options_render_every_field() {
        let recursive = RecursiveConfig::default_options();
        assert_eq!(recursive["chunk_size"], json!(1000));
        assert_eq!(recursive["chunk_overlap"], json!(200));
        assert_eq!(recursive["separators"], json!(["\n\n", "\n", " ", ""]));

        assert_eq!(SemanticConfig::default_options()["threshold"], json!(0.8));
        assert_eq!(ParagraphConfig::default_options()["min_chunk_size"], json!(100));
    }
}
