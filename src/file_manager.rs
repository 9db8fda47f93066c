//! # File Management Module
//!
//! Questo modulo gestisce le operazioni sui file e la discovery degli asset.
//!
//! ## Responsabilità:
//! - Discovery non ricorsiva dei file immagine in una sottocartella sorgente
//! - Filtro per estensione (allow-list, case-insensitive)
//! - Classificazione dei file della cartella logo ("logo" vs "fav")
//! - Formattazione human-readable delle dimensioni
//!
//! ## Formati sorgente supportati:
//! PNG, JPG, JPEG, HEIC, DNG. L'allow-list riflette il contratto con la
//! cartella degli asset del sito: HEIC e DNG vengono elencati anche se i
//! codec non sono disponibili, così un eventuale fallimento di decodifica
//! resta visibile invece di sparire in silenzio.
//!
//! ## Esempio:
//! ```rust,ignore
//! let files = FileManager::list_images(&dir)?;
//! for file in files {
//!     // process image
//! }
//! ```

use anyhow::Result;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Manages file operations and asset discovery
pub struct FileManager;

impl FileManager {
    /// List supported image files directly inside a source directory.
    ///
    /// A missing directory is not an error: it simply yields an empty list,
    /// so the corresponding stage becomes a no-op. Results are sorted for a
    /// deterministic processing order.
    pub fn list_images(dir: &Path) -> Result<Vec<PathBuf>> {
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut files: Vec<PathBuf> = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .filter(|p| Self::is_supported_source(p))
            .collect();

        files.sort();
        Ok(files)
    }

    /// Check if a file extension is on the source allow-list
    pub fn is_supported_source(path: &Path) -> bool {
        if let Some(ext) = path.extension() {
            let ext_lower = ext.to_string_lossy().to_lowercase();
            matches!(ext_lower.as_str(), "png" | "jpg" | "jpeg" | "heic" | "dng")
        } else {
            false
        }
    }

    /// Get human-readable file size
    pub fn format_size(size: u64) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
        let mut size = size as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        if unit_index == 0 {
            format!("{} {}", size as u64, UNITS[unit_index])
        } else {
            format!("{:.2} {}", size, UNITS[unit_index])
        }
    }
}

/// Role of a file found in the logo source directory, decided by filename
/// substring. "logo" wins over "fav" when both match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoRole {
    /// Site logo master, rendered as logo.png + logo.webp
    Logo,
    /// Favicon master, rendered as favicon.png + favicon.ico
    Favicon,
}

impl LogoRole {
    /// Classify a logo-directory entry by case-insensitive filename match.
    /// Files matching neither substring get `None` and are skipped.
    pub fn classify(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_string_lossy().to_lowercase();
        if name.contains("logo") {
            Some(Self::Logo)
        } else if name.contains("fav") {
            Some(Self::Favicon)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_list_images_missing_dir_is_empty() {
        let files = FileManager::list_images(Path::new("/definitely/not/here")).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_list_images_filters_extensions() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("A.HEIC"), b"x").unwrap();
        fs::write(temp_dir.path().join("b.txt"), b"x").unwrap();
        fs::write(temp_dir.path().join("c.PNG"), b"x").unwrap();
        fs::write(temp_dir.path().join("d.jpeg"), b"x").unwrap();
        fs::write(temp_dir.path().join("noext"), b"x").unwrap();
        fs::create_dir(temp_dir.path().join("nested")).unwrap();
        fs::write(temp_dir.path().join("nested").join("deep.png"), b"x").unwrap();

        let files = FileManager::list_images(temp_dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();

        // Non-recursive, allow-listed extensions only, sorted
        assert_eq!(names, vec!["A.HEIC", "c.PNG", "d.jpeg"]);
    }

    #[test]
    fn test_is_supported_source() {
        assert!(FileManager::is_supported_source(Path::new("x.png")));
        assert!(FileManager::is_supported_source(Path::new("x.JPG")));
        assert!(FileManager::is_supported_source(Path::new("x.dng")));
        assert!(!FileManager::is_supported_source(Path::new("x.gif")));
        assert!(!FileManager::is_supported_source(Path::new("x")));
    }

    #[test]
    fn test_logo_role_classify() {
        assert_eq!(
            LogoRole::classify(Path::new("Logo.png")),
            Some(LogoRole::Logo)
        );
        assert_eq!(
            LogoRole::classify(Path::new("MyFavicon.dng")),
            Some(LogoRole::Favicon)
        );
        // "logo" takes priority when both substrings are present
        assert_eq!(
            LogoRole::classify(Path::new("fav-logo.png")),
            Some(LogoRole::Logo)
        );
        assert_eq!(LogoRole::classify(Path::new("banner.png")), None);
    }

    #[test]
    fn test_format_size() {
        assert_eq!(FileManager::format_size(512), "512 B");
        assert_eq!(FileManager::format_size(2048), "2.00 KB");
        assert_eq!(FileManager::format_size(5 * 1024 * 1024), "5.00 MB");
    }
}
