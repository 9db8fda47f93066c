//! # Site Asset Optimizer Library
//!
//! Questo è il modulo principale della libreria che espone le API pubbliche.
//!
//! ## Responsabilità:
//! - Definisce la struttura modulare dell'applicazione
//! - Espone i tipi e le funzioni principali tramite re-exports
//! - Fornisce un'interfaccia pulita per il main.rs e per i test
//!
//! ## Architettura dei moduli:
//! - `config`: Configurazione e tabella statica delle categorie di asset
//! - `error`: Tipi di errore custom
//! - `file_manager`: Discovery dei file sorgente e classificazione logo/fav
//! - `image_processor`: Trascodifica singola immagine + conversione WebP
//! - `favicon`: Packing del contenitore favicon.ico multi-risoluzione
//! - `optimizer`: Orchestratore degli stage per categoria
//! - `progress`: Superficie console (banner, sezioni, righe ✓/✗)
//!
//! ## Utilizzo:
//! ```rust,ignore
//! use site_asset_optimizer::{AssetOptimizer, Config};
//!
//! let mut optimizer = AssetOptimizer::new(Config::default())?;
//! optimizer.run().await?;
//! ```

pub mod config;
pub mod error;
pub mod favicon;
pub mod file_manager;
pub mod image_processor;
pub mod optimizer;
pub mod progress;

pub use config::Config;
pub use error::AssetError;
pub use optimizer::AssetOptimizer;
