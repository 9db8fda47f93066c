//! # Site Asset Optimizer - Main Entry Point
//!
//! Questo è il punto di ingresso principale dell'applicazione.
//!
//! ## Responsabilità:
//! - Parsing degli argomenti della command line con `clap`
//! - Inizializzazione del sistema di logging con `tracing`
//! - Creazione della configurazione e avvio dell'optimizer
//!
//! ## Flusso di esecuzione:
//! 1. Parsa gli argomenti CLI (source dir, output dir, quality, verbose)
//! 2. Configura il logging (INFO o DEBUG a seconda del flag verbose)
//! 3. Crea un oggetto Config e avvia AssetOptimizer
//!
//! Invocato senza argomenti riproduce esattamente il comportamento storico
//! dello script di build: legge da "Assests" e scrive in "public/assets"
//! con i parametri di encoding compilati nei default.
//!
//! ## Esempio di utilizzo:
//! ```bash
//! asset-optimizer
//! asset-optimizer raw-assets --output dist/assets --quality 90 --verbose
//! ```

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::debug;

use site_asset_optimizer::{AssetOptimizer, Config};

#[derive(Parser)]
#[command(name = "asset-optimizer")]
#[command(about = "Optimize website image assets (logo, favicon, photos) for web delivery")]
struct Args {
    /// Root directory containing the raw asset subdirectories
    #[arg(default_value = "Assests")]
    source_directory: PathBuf,

    /// Output directory for optimized assets
    #[arg(short, long, default_value = "public/assets")]
    output: PathBuf,

    /// JPEG quality (1-100)
    #[arg(short, long, default_value = "85")]
    quality: u8,

    /// WebP quality (1-100)
    #[arg(long, default_value = "85")]
    webp_quality: u8,

    /// WebP compression effort (0-6)
    #[arg(long, default_value = "6")]
    webp_method: u8,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    // A missing source root is not fatal: every stage simply finds nothing
    // to do, matching the historical behavior of the build script.
    if !args.source_directory.exists() {
        debug!(
            "Source directory does not exist: {}",
            args.source_directory.display()
        );
    }

    let config = Config {
        source_dir: args.source_directory,
        output_dir: args.output,
        jpeg_quality: args.quality,
        webp_quality: args.webp_quality,
        webp_method: args.webp_method,
    };

    let mut optimizer = AssetOptimizer::new(config)?;
    optimizer.run().await?;

    Ok(())
}
