use crate::error::{NoteError, NoteResult};
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Bump when a default below changes in a way that alters segmentation output.
pub const CONFIG_VERSION: &str = "1";

// Default value functions for serde
fn default_true() -> bool {
    true
}

fn default_block_min_chars() -> usize {
    45 // shorter lines read as fields, not prose
}

fn default_max_label_tokens() -> usize {
    5 // longer colon prefixes are prose, not keys
}

fn default_max_items() -> usize {
    100_000
}

fn default_max_block_lines() -> usize {
    10_000
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsingConfig {
    #[serde(default)]
    pub segmentation: SegmentationConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
    /// Consult the statement classifier for every span. When false every
    /// span is marked not statement-like and the classifier is never called.
    #[serde(default = "default_true")]
    pub classify_spans: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentationConfig {
    /// Minimum length (in characters) of the first line of a prose block
    #[serde(default = "default_block_min_chars")]
    pub block_min_chars: usize,
    /// Maximum number of whitespace-separated tokens in a key or header label
    #[serde(default = "default_max_label_tokens")]
    pub max_label_tokens: usize,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            block_min_chars: default_block_min_chars(),
            max_label_tokens: default_max_label_tokens(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Items one note (or one section body) may produce before parsing aborts
    #[serde(default = "default_max_items")]
    pub max_items: usize,
    /// Lines one prose block may absorb; the block ends early when reached
    #[serde(default = "default_max_block_lines")]
    pub max_block_lines: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_items: default_max_items(),
            max_block_lines: default_max_block_lines(),
        }
    }
}

impl Default for ParsingConfig {
    fn default() -> Self {
        Self {
            segmentation: SegmentationConfig::default(),
            limits: LimitsConfig::default(),
            classify_spans: true,
        }
    }
}

impl ParsingConfig {
    /// Load config from a YAML file
    pub fn load_from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ParsingConfig = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load config with fallback to default
    pub fn load_with_fallback(path: Option<&str>) -> Self {
        match path {
            Some(p) => Self::load_from_file(p).unwrap_or_else(|e| {
                tracing::warn!(path = p, error = %e, "failed to load config, using defaults");
                Self::default()
            }),
            None => Self::default(),
        }
    }

    pub fn validate(&self) -> NoteResult<()> {
        if self.segmentation.block_min_chars == 0 {
            return Err(NoteError::InvalidConfig(
                "segmentation.block_min_chars must be at least 1".to_string(),
            ));
        }
        if self.segmentation.max_label_tokens == 0 {
            return Err(NoteError::InvalidConfig(
                "segmentation.max_label_tokens must be at least 1".to_string(),
            ));
        }
        if self.limits.max_items == 0 || self.limits.max_block_lines == 0 {
            return Err(NoteError::InvalidConfig(
                "limits must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Fingerprint of the settings a note was parsed with: the config version
    /// plus a SHA-256 of the JSON-serialized config.
    pub fn fingerprint(&self) -> Result<String> {
        let config_json = serde_json::to_string(self)
            .map_err(|e| anyhow!("Failed to serialize config for fingerprinting: {}", e))?;

        let mut hasher = Sha256::new();
        hasher.update(config_json.as_bytes());
        Ok(format!("v{}:{:x}", CONFIG_VERSION, hasher.finalize()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ParsingConfig::default();
        assert_eq!(config.segmentation.block_min_chars, 45);
        assert_eq!(config.segmentation.max_label_tokens, 5);
        assert!(config.classify_spans);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let yaml = "segmentation:\n  block_min_chars: 60\n";
        let config: ParsingConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.segmentation.block_min_chars, 60);
        assert_eq!(config.segmentation.max_label_tokens, 5);
        assert_eq!(config.limits.max_items, 100_000);
        assert!(config.classify_spans);
    }

    #[test]
    fn test_validate_rejects_zero_tokens() {
        let mut config = ParsingConfig::default();
        config.segmentation.max_label_tokens = 0;
        assert!(matches!(config.validate(), Err(NoteError::InvalidConfig(_))));
    }

    #[test]
    fn test_load_with_fallback_missing_file() {
        let config = ParsingConfig::load_with_fallback(Some("/nonexistent/clinote.yaml"));
        assert_eq!(config.segmentation.block_min_chars, 45);
    }

    #[test]
    fn test_load_from_file_roundtrip() {
        let path = std::env::temp_dir().join("clinote_config_test.yaml");
        std::fs::write(&path, "classify_spans: false\nlimits:\n  max_items: 10\n").unwrap();

        let config = ParsingConfig::load_from_file(path.to_str().unwrap()).unwrap();
        assert!(!config.classify_spans);
        assert_eq!(config.limits.max_items, 10);
        assert_eq!(config.limits.max_block_lines, 10_000);

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_fingerprint_tracks_every_field() {
        let base = ParsingConfig::default();
        let base_fp = base.fingerprint().unwrap();
        assert!(base_fp.starts_with(&format!("v{}:", CONFIG_VERSION)));
        assert_eq!(base_fp, ParsingConfig::default().fingerprint().unwrap());

        let tweaks: Vec<fn(&mut ParsingConfig)> = vec![
            |c| c.segmentation.block_min_chars += 1,
            |c| c.segmentation.max_label_tokens += 1,
            |c| c.limits.max_items += 1,
            |c| c.limits.max_block_lines += 1,
            |c| c.classify_spans = !c.classify_spans,
        ];
        for tweak in tweaks {
            let mut changed = ParsingConfig::default();
            tweak(&mut changed);
            assert_ne!(changed.fingerprint().unwrap(), base_fp);
        }
    }
}
