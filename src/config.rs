//! # Configuration Management Module
//!
//! Questo modulo gestisce tutta la configurazione dell'applicazione.
//!
//! ## Responsabilità:
//! - Definisce la struct `Config` con i parametri di ottimizzazione
//! - Fornisce validazione dei parametri di input
//! - Supporta caricamento/salvataggio configurazione da/verso file JSON
//! - Contiene la tabella statica delle categorie di asset con le
//!   dimensioni massime per categoria
//!
//! ## Parametri di configurazione:
//! - `source_dir`: Directory radice con le sottocartelle degli asset
//!   (default: "Assests", il nome storico usato dal sito)
//! - `output_dir`: Directory di output piatta (default: "public/assets")
//! - `jpeg_quality`: Qualità JPEG (1-100, default: 85)
//! - `webp_quality`: Qualità WebP (1-100, default: 85)
//! - `webp_method`: Sforzo di compressione WebP (0-6, default: 6)
//!
//! ## Categorie di asset:
//! Cinque categorie fisse, immutabili per tutta la vita del processo:
//! logo (400x400), doctor (800x1000), patient (600x800),
//! facility (1200x800), favicon (32x32).
//!
//! ## Esempio:
//! ```rust,ignore
//! let config = Config {
//!     jpeg_quality: 90,
//!     ..Default::default()
//! };
//! config.validate()?;
//! ```

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Source subdirectory holding logo and favicon masters.
pub const LOGO_SUBDIR: &str = "LogoAndFav";

/// Maximum bounding box for the site logo.
pub const LOGO_MAX_DIMENSIONS: (u32, u32) = (400, 400);

/// Maximum bounding box for the favicon PNG.
pub const FAVICON_MAX_DIMENSIONS: (u32, u32) = (32, 32);

/// Sizes embedded in the multi-resolution favicon.ico container.
pub const FAVICON_ICO_SIZES: [u32; 3] = [16, 32, 48];

/// One fixed photo category: where it is read from, how it is announced,
/// and the bounding box its outputs must fit.
#[derive(Debug, Clone, Copy)]
pub struct PhotoCategory {
    /// Human-readable label used in section headers
    pub label: &'static str,
    /// Source subdirectory name, also used as the output filename prefix
    pub source_subdir: &'static str,
    /// Maximum (width, height) for this category
    pub max_dimensions: (u32, u32),
}

/// The three photo categories, in processing order. The subdirectory names
/// are a fixed filesystem contract with the website repository, spelling
/// included.
pub const PHOTO_CATEGORIES: [PhotoCategory; 3] = [
    PhotoCategory {
        label: "Processing Doctor Photos",
        source_subdir: "DrdeepikaPics",
        max_dimensions: (800, 1000),
    },
    PhotoCategory {
        label: "Processing Patient Photos",
        source_subdir: "HappySatisfiedPatients",
        max_dimensions: (600, 800),
    },
    PhotoCategory {
        label: "Processing Facility Photos",
        source_subdir: "Operationtheator",
        max_dimensions: (1200, 800),
    },
];

/// Configuration for asset optimization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Root directory containing the asset subdirectories
    pub source_dir: PathBuf,
    /// Flat output directory for optimized assets
    pub output_dir: PathBuf,
    /// JPEG quality (1-100)
    pub jpeg_quality: u8,
    /// WebP quality (1-100)
    pub webp_quality: u8,
    /// WebP compression effort (0-6, higher = smaller and slower)
    pub webp_method: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("Assests"),
            output_dir: PathBuf::from("public/assets"),
            jpeg_quality: 85,
            webp_quality: 85,
            webp_method: 6,
        }
    }
}

impl Config {
    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.jpeg_quality == 0 || self.jpeg_quality > 100 {
            return Err(anyhow::anyhow!("JPEG quality must be between 1 and 100"));
        }

        if self.webp_quality == 0 || self.webp_quality > 100 {
            return Err(anyhow::anyhow!("WebP quality must be between 1 and 100"));
        }

        if self.webp_method > 6 {
            return Err(anyhow::anyhow!("WebP method must be between 0 and 6"));
        }

        if self.output_dir.as_os_str().is_empty() {
            return Err(anyhow::anyhow!("Output directory must not be empty"));
        }

        Ok(())
    }

    /// Load configuration from file
    pub async fn from_file(path: &PathBuf) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = tokio::fs::read_to_string(path).await?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub async fn save_to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, content).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.jpeg_quality = 0;
        assert!(config.validate().is_err());

        config.jpeg_quality = 85;
        config.webp_quality = 101;
        assert!(config.validate().is_err());

        config.webp_quality = 85;
        config.webp_method = 7;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.source_dir, PathBuf::from("Assests"));
        assert_eq!(config.output_dir, PathBuf::from("public/assets"));
        assert_eq!(config.jpeg_quality, 85);
        assert_eq!(config.webp_quality, 85);
        assert_eq!(config.webp_method, 6);
    }

    #[test]
    fn test_category_table() {
        assert_eq!(PHOTO_CATEGORIES.len(), 3);
        assert_eq!(PHOTO_CATEGORIES[0].source_subdir, "DrdeepikaPics");
        assert_eq!(PHOTO_CATEGORIES[0].max_dimensions, (800, 1000));
        assert_eq!(PHOTO_CATEGORIES[1].max_dimensions, (600, 800));
        assert_eq!(PHOTO_CATEGORIES[2].max_dimensions, (1200, 800));
        assert_eq!(LOGO_MAX_DIMENSIONS, (400, 400));
        assert_eq!(FAVICON_MAX_DIMENSIONS, (32, 32));
        assert_eq!(FAVICON_ICO_SIZES, [16, 32, 48]);
    }

    #[tokio::test]
    async fn test_config_save_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.json");

        let original_config = Config {
            source_dir: PathBuf::from("raw"),
            output_dir: PathBuf::from("dist/assets"),
            jpeg_quality: 90,
            webp_quality: 80,
            webp_method: 4,
        };

        // Save config
        original_config.save_to_file(&config_path).await.unwrap();

        // Load config
        let loaded_config = Config::from_file(&config_path).await.unwrap();

        assert_eq!(loaded_config.source_dir, PathBuf::from("raw"));
        assert_eq!(loaded_config.output_dir, PathBuf::from("dist/assets"));
        assert_eq!(loaded_config.jpeg_quality, 90);
        assert_eq!(loaded_config.webp_quality, 80);
        assert_eq!(loaded_config.webp_method, 4);
    }

    #[tokio::test]
    async fn test_config_missing_file_gives_default() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nope.json");

        let config = Config::from_file(&config_path).await.unwrap();
        assert_eq!(config.jpeg_quality, 85);
    }
}
