//! # Asset Optimizer Main Orchestrator
//!
//! Orchestratore principale: sequenzia gli stage per categoria di asset e
//! contiene i fallimenti alla granularità del singolo file.
//!
//! ## Stage, in ordine:
//! 1. Creazione (idempotente) della directory di output
//! 2. Logo & favicon (`LogoAndFav`, split per substring del nome)
//! 3. Foto dottore (`DrdeepikaPics`)
//! 4. Foto pazienti (`HappySatisfiedPatients`)
//! 5. Foto struttura (`Operationtheator`)
//! 6. Banner conclusivo
//!
//! Ogni stage parte solo se la sua sottocartella sorgente esiste; un errore
//! su un file produce una riga `✗` e non ferma né lo stage né la run. Ogni
//! file viene tentato esattamente una volta: niente retry, niente rollback.
//! Output già esistenti vengono sovrascritti in silenzio.
//!
//! ## Naming degli output:
//! - Categorie foto: `{sottocartella}_{stem}.jpg` (sempre JPEG)
//! - Logo/favicon: nomi fissi `logo.png`, `logo.webp`, `favicon.png`,
//!   `favicon.ico`

use crate::{
    config::{
        Config, PhotoCategory, FAVICON_MAX_DIMENSIONS, LOGO_MAX_DIMENSIONS, LOGO_SUBDIR,
        PHOTO_CATEGORIES,
    },
    favicon,
    file_manager::{FileManager, LogoRole},
    image_processor::ImageProcessor,
    progress::ConsoleReporter,
};
use anyhow::Result;
use std::path::Path;
use tokio::fs;
use tracing::{debug, info};

/// Sequences the per-category stages over the fixed asset layout
pub struct AssetOptimizer {
    config: Config,
    processor: ImageProcessor,
    reporter: ConsoleReporter,
}

impl AssetOptimizer {
    /// Create a new optimizer after validating the configuration
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let processor = ImageProcessor::new(config.clone());
        Ok(Self {
            config,
            processor,
            reporter: ConsoleReporter::new(),
        })
    }

    /// Run all stages. Per-file failures are reported and contained; only
    /// configuration problems and output-directory creation are fatal.
    pub async fn run(&mut self) -> Result<()> {
        info!(
            "Starting asset optimization: {} -> {}",
            self.config.source_dir.display(),
            self.config.output_dir.display()
        );

        self.reporter.banner("Website Asset Optimization");

        fs::create_dir_all(&self.config.output_dir).await?;

        self.logo_stage().await?;
        for category in &PHOTO_CATEGORIES {
            self.photo_stage(category).await?;
        }

        println!();
        self.reporter.banner("✅ Asset optimization complete!");
        Ok(())
    }

    /// Logo & favicon stage: one fixed output name set per role.
    async fn logo_stage(&mut self) -> Result<()> {
        let dir = self.config.source_dir.join(LOGO_SUBDIR);
        if !dir.is_dir() {
            debug!("Skipping logo stage: {} not present", dir.display());
            return Ok(());
        }

        self.reporter.section("Processing Logo & Favicon");
        let files = FileManager::list_images(&dir)?;
        self.reporter.start_stage(files.len() as u64);

        for file in &files {
            match LogoRole::classify(file) {
                Some(LogoRole::Logo) => {
                    let primary = self.config.output_dir.join("logo.png");
                    self.transcode(file, &primary, Some(LOGO_MAX_DIMENSIONS)).await;
                    self.webp_sibling(file, &primary, Some(LOGO_MAX_DIMENSIONS)).await;
                }
                Some(LogoRole::Favicon) => {
                    let primary = self.config.output_dir.join("favicon.png");
                    self.transcode(file, &primary, Some(FAVICON_MAX_DIMENSIONS)).await;
                    match favicon::create_favicon(file, &self.config.output_dir).await {
                        Ok(path) => self
                            .reporter
                            .success(&format!("Created favicon: {}", path.display())),
                        Err(e) => self
                            .reporter
                            .failure(&format!("Error creating favicon: {e}")),
                    }
                }
                None => {
                    debug!("Skipping unrecognized logo file: {}", file.display());
                }
            }
            self.reporter.file_done();
        }

        self.reporter.finish_stage();
        Ok(())
    }

    /// One photo category stage: every file is forced to JPEG under the
    /// `{subdir}_{stem}.jpg` naming scheme.
    async fn photo_stage(&mut self, category: &PhotoCategory) -> Result<()> {
        let dir = self.config.source_dir.join(category.source_subdir);
        if !dir.is_dir() {
            debug!(
                "Skipping {}: {} not present",
                category.source_subdir,
                dir.display()
            );
            return Ok(());
        }

        self.reporter.section(category.label);
        let files = FileManager::list_images(&dir)?;
        info!("Found {} files in {}", files.len(), dir.display());
        self.reporter.start_stage(files.len() as u64);

        for file in &files {
            let stem = file
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            let output = self
                .config
                .output_dir
                .join(format!("{}_{}.jpg", category.source_subdir, stem));
            self.transcode(file, &output, Some(category.max_dimensions)).await;
            self.reporter.file_done();
        }

        self.reporter.finish_stage();
        Ok(())
    }

    /// Run one primary transcode and report its outcome.
    async fn transcode(&self, input: &Path, output: &Path, max_dimensions: Option<(u32, u32)>) {
        match self.processor.optimize(input, output, max_dimensions).await {
            Ok(()) => self.reporter.success(&format!(
                "Optimized: {} -> {}",
                file_name(input),
                file_name(output)
            )),
            Err(e) => self
                .reporter
                .failure(&format!("Error processing {}: {e}", file_name(input))),
        }
    }

    /// Run the WebP side-conversion and report its outcome, independently
    /// of the primary transcode.
    async fn webp_sibling(&self, input: &Path, primary: &Path, max_dimensions: Option<(u32, u32)>) {
        match self
            .processor
            .convert_to_webp(input, primary, max_dimensions)
            .await
        {
            Ok(path) => self.reporter.success(&format!(
                "Converted to WebP: {} -> {}",
                file_name(input),
                file_name(&path)
            )),
            Err(e) => self
                .reporter
                .failure(&format!("Error converting {}: {e}", file_name(input))),
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
