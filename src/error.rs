//! # Error Types Module
//!
//! Questo modulo definisce i tipi di errore custom dell'applicazione.
//!
//! ## Responsabilità:
//! - Definisce l'enum `AssetError` per categorizzare gli errori possibili
//! - Integra con `thiserror` per automatic error conversion
//! - Supporta error chaining per mantenere il contesto degli errori
//!
//! ## Categorie di errori:
//! - `Io`: Errori di I/O (file non trovati, permessi, etc.)
//! - `Image`: Errori di decodifica/elaborazione immagini
//! - `Encode`: Errori a livello di codec durante la scrittura
//! - `UnsupportedFormat`: Estensione di output non supportata
//! - `Validation`: Errori di validazione input
//!
//! Gli errori sono sempre contenuti alla granularità del singolo file:
//! il driver li converte in una riga di diagnostica e prosegue.

/// Custom error types for asset optimization
#[derive(thiserror::Error, Debug)]
pub enum AssetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Encode error: {0}")]
    Encode(String),

    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),

    #[error("File validation error: {0}")]
    Validation(String),
}
