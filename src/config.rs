//! Sprite configuration loaded from TOML.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::SpriteError;
use crate::physics::{Backend, BackendKind, DEFAULT_PTM_RATIO};

/// Backend and asset settings for physics sprites.
///
/// ```toml
/// backend = "scaled"
/// ptm_ratio = 32.0
/// atlas = "assets/frames.toml"
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SpriteConfig {
    pub backend: BackendKind,
    /// Pixels per meter for the scaled backend.
    pub ptm_ratio: f32,
    /// Optional sprite-frame atlas to preload.
    pub atlas: Option<PathBuf>,
}

impl Default for SpriteConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::Scaled,
            ptm_ratio: DEFAULT_PTM_RATIO,
            atlas: None,
        }
    }
}

impl SpriteConfig {
    /// Parses and validates a config document.
    pub fn from_toml(source: &str) -> Result<Self, SpriteError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values that would make the physics world unusable.
    pub fn validate(&self) -> Result<(), SpriteError> {
        if self.ptm_ratio.is_finite() && self.ptm_ratio > 0.0 {
            Ok(())
        } else {
            Err(SpriteError::InvalidPtmRatio(self.ptm_ratio))
        }
    }

    /// Reads a config file.
    pub fn load(path: &Path) -> Result<Self, SpriteError> {
        let source = std::fs::read_to_string(path).map_err(|source| SpriteError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&source)
    }

    /// Reads a config file, falling back to defaults if it is missing or invalid.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => {
                log::info!(
                    "Loaded sprite config from {}: {:?} backend",
                    path.display(),
                    config.backend
                );
                config
            }
            Err(e) => {
                log::warn!("No sprite config ({e}), using defaults");
                Self::default()
            }
        }
    }

    /// Backend described by this config.
    pub fn backend(&self) -> Backend {
        Backend::from_kind(self.backend, self.ptm_ratio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        let config = SpriteConfig::from_toml("").unwrap();
        assert_eq!(config, SpriteConfig::default());
        assert_eq!(config.backend(), Backend::scaled(DEFAULT_PTM_RATIO));
    }

    #[test]
    fn parses_all_fields() {
        let config = SpriteConfig::from_toml(
            r#"
backend = "pixel"
ptm_ratio = 64.0
atlas = "frames.toml"
"#,
        )
        .unwrap();
        assert_eq!(config.backend, BackendKind::Pixel);
        assert_eq!(config.ptm_ratio, 64.0);
        assert_eq!(config.atlas.as_deref(), Some(Path::new("frames.toml")));
        assert_eq!(config.backend(), Backend::pixel());
    }

    #[test]
    fn unknown_backend_is_an_error() {
        let err = SpriteConfig::from_toml("backend = \"chipmunk\"").unwrap_err();
        assert!(matches!(err, SpriteError::Config(_)));
    }

    #[test]
    fn non_positive_ratio_is_rejected() {
        for source in ["ptm_ratio = 0.0", "ptm_ratio = -8.0", "ptm_ratio = inf"] {
            let err = SpriteConfig::from_toml(source).unwrap_err();
            assert!(matches!(err, SpriteError::InvalidPtmRatio(_)), "{source}");
        }

        let mut config = SpriteConfig::default();
        assert!(config.validate().is_ok());
        config.ptm_ratio = 0.0;
        assert!(matches!(
            config.validate(),
            Err(SpriteError::InvalidPtmRatio(r)) if r == 0.0
        ));
    }

    #[test]
    fn missing_file_falls_back() {
        let config = SpriteConfig::load_or_default(Path::new("no/such/config.toml"));
        assert_eq!(config, SpriteConfig::default());
    }
}
