//! Hasher configuration
//!
//! Tuning knobs only. Nothing here changes the resulting root hash.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::BEP52_BLOCK_SIZE;

/// Largest accepted reader chunk
pub const MAX_READ_BUFFER_SIZE: usize = 16 * 1024 * 1024;

/// Largest accepted leaf preallocation (a 256 GiB stream)
pub const MAX_LEAF_CAPACITY: usize = 1 << 24;

/// Config error type
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid read buffer size: {0}")]
    InvalidReadBufferSize(usize),
    #[error("Leaf capacity {0} exceeds limit of {max}", max = MAX_LEAF_CAPACITY)]
    LeafCapacityTooLarge(usize),
    #[error("Failed to parse config: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Hasher configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bep52Config {
    /// Chunk size used when pulling from a reader
    #[serde(default = "default_read_buffer_size")]
    pub read_buffer_size: usize,
    /// Leaf hashes to preallocate (e.g. file size / 16 KiB when known)
    #[serde(default)]
    pub leaf_capacity: usize,
}

impl Default for Bep52Config {
    fn default() -> Self {
        Self {
            read_buffer_size: default_read_buffer_size(),
            leaf_capacity: 0,
        }
    }
}

fn default_read_buffer_size() -> usize {
    BEP52_BLOCK_SIZE * 4
}

impl Bep52Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_read_buffer_size(mut self, read_buffer_size: usize) -> Self {
        self.read_buffer_size = read_buffer_size;
        self
    }

    pub fn with_leaf_capacity(mut self, leaf_capacity: usize) -> Self {
        self.leaf_capacity = leaf_capacity;
        self
    }

    /// Size the leaf list for a stream of `size` bytes, up to [`MAX_LEAF_CAPACITY`]
    pub fn with_expected_size(self, size: u64) -> Self {
        let blocks = size.div_ceil(BEP52_BLOCK_SIZE as u64);
        let capacity = usize::try_from(blocks).unwrap_or(MAX_LEAF_CAPACITY);
        self.with_leaf_capacity(capacity.min(MAX_LEAF_CAPACITY))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.read_buffer_size == 0 || self.read_buffer_size > MAX_READ_BUFFER_SIZE {
            return Err(ConfigError::InvalidReadBufferSize(self.read_buffer_size));
        }
        if self.leaf_capacity > MAX_LEAF_CAPACITY {
            return Err(ConfigError::LeafCapacityTooLarge(self.leaf_capacity));
        }
        Ok(())
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Bep52Config::default();
        assert_eq!(config.read_buffer_size, BEP52_BLOCK_SIZE * 4);
        assert_eq!(config.leaf_capacity, 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_empty_config() {
        let config = Bep52Config::from_toml_str("").unwrap();
        assert_eq!(config, Bep52Config::default());
    }

    #[test]
    fn test_parse_partial_config() {
        let config = Bep52Config::from_toml_str("read_buffer_size = 1024").unwrap();
        assert_eq!(config.read_buffer_size, 1024);
        assert_eq!(config.leaf_capacity, 0);
    }

    #[test]
    fn test_zero_read_buffer_rejected() {
        let result = Bep52Config::from_toml_str("read_buffer_size = 0");
        assert!(matches!(result, Err(ConfigError::InvalidReadBufferSize(0))));
    }

    #[test]
    fn test_malformed_toml_rejected() {
        let result = Bep52Config::from_toml_str("read_buffer_size = \"big\"");
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn test_expected_size() {
        let config = Bep52Config::new().with_expected_size(BEP52_BLOCK_SIZE as u64 * 3 + 1);
        assert_eq!(config.leaf_capacity, 4);

        let config = Bep52Config::new().with_expected_size(0);
        assert_eq!(config.leaf_capacity, 0);

        let config = Bep52Config::new().with_expected_size(u64::MAX);
        assert_eq!(config.leaf_capacity, MAX_LEAF_CAPACITY);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_huge_read_buffer_rejected() {
        let result = Bep52Config::from_toml_str("read_buffer_size = 1000000000000000000");
        assert!(matches!(
            result,
            Err(ConfigError::InvalidReadBufferSize(1_000_000_000_000_000_000))
        ));

        let at_limit = format!("read_buffer_size = {}", MAX_READ_BUFFER_SIZE);
        assert!(Bep52Config::from_toml_str(&at_limit).is_ok());
    }

    #[test]
    fn test_huge_leaf_capacity_rejected() {
        let result = Bep52Config::from_toml_str("leaf_capacity = 1000000000000000000");
        assert!(matches!(
            result,
            Err(ConfigError::LeafCapacityTooLarge(1_000_000_000_000_000_000))
        ));

        let at_limit = format!("leaf_capacity = {}", MAX_LEAF_CAPACITY);
        assert!(Bep52Config::from_toml_str(&at_limit).is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bep52.toml");
        fs::write(&path, "read_buffer_size = 4096\nleaf_capacity = 8\n").unwrap();

        let config = Bep52Config::load(&path).unwrap();
        assert_eq!(config.read_buffer_size, 4096);
        assert_eq!(config.leaf_capacity, 8);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = Bep52Config::load(dir.path().join("missing.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
