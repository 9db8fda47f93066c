//! # Image Processing Module
//!
//! Questo modulo gestisce la trascodifica delle immagini: decodifica,
//! alpha-flatten, ridimensionamento e ri-codifica, tutto in memoria con la
//! crate `image`.
//!
//! ## Pipeline di trascodifica
//!
//! 1. **Decodifica**: lettura asincrona dei byte con `tokio::fs`, poi
//!    `image::load_from_memory`. Un fallimento qui è sempre contenuto al
//!    singolo file.
//! 2. **Alpha-flatten**: se l'immagine ha un canale alpha e l'output è JPEG
//!    (che non supporta trasparenza), composizione su sfondo bianco opaco
//!    usando l'alpha come maschera di blending.
//! 3. **Resize**: se è specificato un bounding box, downscale con filtro
//!    Lanczos3 preservando l'aspect ratio. Mai upscaling: immagini già
//!    dentro i limiti restano invariate.
//! 4. **Encoding**: il formato è deciso dall'estensione del path di output:
//!
//! | Estensione | Codec | Parametri |
//! |------------|-------|-----------|
//! | jpg/jpeg   | `image` JpegEncoder | quality configurabile (default 85) |
//! | png        | `image` PngEncoder  | compressione Best, filtro Adaptive |
//! | webp       | libwebp (`webp`)    | lossy, quality 85, method 6 |
//! | altro      | `image` per estensione | parametri di default |
//!
//! La codifica WebP lossy passa dai binding libwebp perché l'encoder puro
//! Rust della crate `image` è solo lossless.
//!
//! ## Side-conversion WebP
//!
//! `convert_to_webp` ripercorre decodifica e resize ma scrive sempre un
//! WebP accanto all'output primario (stessa base, estensione `.webp`), con
//! contenimento errori indipendente dalla trascodifica primaria.

use crate::config::Config;
use crate::error::AssetError;
use crate::file_manager::FileManager;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder};
use image::imageops::FilterType;
use image::{ColorType, DynamicImage, ImageEncoder, ImageFormat};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Downscale an image so neither dimension exceeds the bounding box,
/// preserving aspect ratio. Images already within bounds are returned
/// unchanged; this never upscales.
pub fn fit_within(img: &DynamicImage, max_dimensions: (u32, u32)) -> DynamicImage {
    let (max_w, max_h) = max_dimensions;
    if img.width() <= max_w && img.height() <= max_h {
        return img.clone();
    }
    img.resize(max_w, max_h, FilterType::Lanczos3)
}

/// Composite a transparent image onto an opaque white canvas, using the
/// alpha channel as the blend mask. Used before JPEG encoding, which has
/// no alpha channel.
pub fn flatten_onto_white(img: &DynamicImage) -> DynamicImage {
    let rgba = img.to_rgba8();
    let mut canvas =
        image::RgbImage::from_pixel(rgba.width(), rgba.height(), image::Rgb([255, 255, 255]));

    for (x, y, pixel) in rgba.enumerate_pixels() {
        let alpha = pixel[3] as u32;
        if alpha == 0 {
            continue;
        }
        let out = canvas.get_pixel_mut(x, y);
        for channel in 0..3 {
            let src = pixel[channel] as u32;
            let dst = out[channel] as u32;
            out[channel] = ((src * alpha + dst * (255 - alpha) + 127) / 255) as u8;
        }
    }

    DynamicImage::ImageRgb8(canvas)
}

/// Transcodes single images: decode, optional alpha-flatten, optional
/// bounded resize, re-encode in the format implied by the output path.
pub struct ImageProcessor {
    /// Encode quality settings
    config: Config,
}

impl ImageProcessor {
    /// Creates a new ImageProcessor with the provided configuration.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Optimize a single image into `output`.
    ///
    /// The output format is implied by the output path's extension. Writes
    /// exactly one file. Errors are returned to the caller, which contains
    /// them at single-file granularity.
    pub async fn optimize(
        &self,
        input: &Path,
        output: &Path,
        max_dimensions: Option<(u32, u32)>,
    ) -> Result<(), AssetError> {
        let bytes = fs::read(input).await?;
        debug!(
            "Decoding {} ({})",
            input.display(),
            FileManager::format_size(bytes.len() as u64)
        );
        let mut img = image::load_from_memory(&bytes)?;

        if img.color().has_alpha() && is_jpeg_output(output) {
            img = flatten_onto_white(&img);
        }

        if let Some(max) = max_dimensions {
            img = fit_within(&img, max);
        }

        let encoded = self.encode_for_extension(&img, output)?;
        fs::write(output, encoded).await?;
        Ok(())
    }

    /// Convert a single image to WebP alongside the primary output.
    ///
    /// The destination is `primary_output` with its extension replaced by
    /// `webp`. Returns the path actually written.
    pub async fn convert_to_webp(
        &self,
        input: &Path,
        primary_output: &Path,
        max_dimensions: Option<(u32, u32)>,
    ) -> Result<PathBuf, AssetError> {
        let bytes = fs::read(input).await?;
        let mut img = image::load_from_memory(&bytes)?;

        if let Some(max) = max_dimensions {
            img = fit_within(&img, max);
        }

        let webp_path = primary_output.with_extension("webp");
        let encoded = self.encode_webp(&img)?;
        fs::write(&webp_path, encoded).await?;
        Ok(webp_path)
    }

    /// Dispatch encoding on the output path's extension.
    fn encode_for_extension(
        &self,
        img: &DynamicImage,
        output: &Path,
    ) -> Result<Vec<u8>, AssetError> {
        let ext = output
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "jpg" | "jpeg" => self.encode_jpeg(img),
            "png" => self.encode_png(img),
            "webp" => self.encode_webp(img),
            other => self.encode_passthrough(img, other),
        }
    }

    fn encode_jpeg(&self, img: &DynamicImage) -> Result<Vec<u8>, AssetError> {
        let rgb = img.to_rgb8();
        let mut buf = Vec::new();
        let mut encoder = JpegEncoder::new_with_quality(&mut buf, self.config.jpeg_quality);
        encoder.encode(rgb.as_raw(), rgb.width(), rgb.height(), ColorType::Rgb8)?;
        Ok(buf)
    }

    fn encode_png(&self, img: &DynamicImage) -> Result<Vec<u8>, AssetError> {
        let mut buf = Vec::new();
        let encoder =
            PngEncoder::new_with_quality(&mut buf, CompressionType::Best, PngFilterType::Adaptive);
        encoder.write_image(img.as_bytes(), img.width(), img.height(), img.color())?;
        Ok(buf)
    }

    fn encode_webp(&self, img: &DynamicImage) -> Result<Vec<u8>, AssetError> {
        // libwebp accepts RGB8/RGBA8 input only
        let rgba = DynamicImage::ImageRgba8(img.to_rgba8());
        let encoder = webp::Encoder::from_image(&rgba)
            .map_err(|e| AssetError::Encode(format!("WebP: {e}")))?;

        let mut webp_config = webp::WebPConfig::new()
            .map_err(|_| AssetError::Encode("WebP: invalid encoder configuration".to_string()))?;
        webp_config.quality = self.config.webp_quality as f32;
        webp_config.method = self.config.webp_method as i32;

        let memory = encoder
            .encode_advanced(&webp_config)
            .map_err(|e| AssetError::Encode(format!("WebP: {e:?}")))?;
        Ok(memory.to_vec())
    }

    /// Pass-through default for extensions without a dedicated encode
    /// profile: let `image` pick the codec from the extension.
    fn encode_passthrough(&self, img: &DynamicImage, ext: &str) -> Result<Vec<u8>, AssetError> {
        let format = ImageFormat::from_extension(ext)
            .ok_or_else(|| AssetError::UnsupportedFormat(ext.to_string()))?;
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, format)?;
        Ok(buf.into_inner())
    }
}

fn is_jpeg_output(output: &Path) -> bool {
    output
        .extension()
        .map(|e| {
            let ext = e.to_string_lossy().to_lowercase();
            ext == "jpg" || ext == "jpeg"
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use tempfile::TempDir;

    fn solid_rgba(width: u32, height: u32, pixel: [u8; 4]) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba(pixel)))
    }

    #[test]
    fn test_fit_within_never_upscales() {
        let img = solid_rgba(30, 20, [0, 0, 0, 255]);
        let fitted = fit_within(&img, (400, 400));
        assert_eq!((fitted.width(), fitted.height()), (30, 20));
    }

    #[test]
    fn test_fit_within_bounds_and_preserves_aspect() {
        let img = solid_rgba(100, 50, [0, 0, 0, 255]);
        let fitted = fit_within(&img, (40, 40));
        assert_eq!((fitted.width(), fitted.height()), (40, 20));

        let tall = solid_rgba(50, 100, [0, 0, 0, 255]);
        let fitted = fit_within(&tall, (40, 40));
        assert_eq!((fitted.width(), fitted.height()), (20, 40));
    }

    #[test]
    fn test_flatten_transparent_becomes_white() {
        let img = solid_rgba(4, 4, [200, 10, 10, 0]);
        let flat = flatten_onto_white(&img);
        assert!(!flat.color().has_alpha());
        let px = flat.to_rgb8().get_pixel(0, 0).0;
        assert_eq!(px, [255, 255, 255]);
    }

    #[test]
    fn test_flatten_opaque_keeps_color() {
        let img = solid_rgba(4, 4, [200, 10, 10, 255]);
        let flat = flatten_onto_white(&img);
        let px = flat.to_rgb8().get_pixel(0, 0).0;
        assert_eq!(px, [200, 10, 10]);
    }

    #[tokio::test]
    async fn test_optimize_resizes_and_drops_alpha_for_jpeg() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("photo.png");
        let output = temp_dir.path().join("photo_out.jpg");

        solid_rgba(100, 50, [30, 60, 90, 0])
            .save(&input)
            .unwrap();

        let processor = ImageProcessor::new(Config::default());
        processor
            .optimize(&input, &output, Some((40, 40)))
            .await
            .unwrap();

        let result = image::open(&output).unwrap();
        assert_eq!((result.width(), result.height()), (40, 20));
        assert!(!result.color().has_alpha());
        // Fully transparent source pixels must come out white
        let px = result.to_rgb8().get_pixel(20, 10).0;
        assert!(px.iter().all(|&c| c >= 250), "expected white, got {px:?}");
    }

    #[tokio::test]
    async fn test_optimize_small_image_is_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("small.png");
        let output = temp_dir.path().join("small_out.png");

        solid_rgba(20, 10, [1, 2, 3, 255]).save(&input).unwrap();

        let processor = ImageProcessor::new(Config::default());
        processor
            .optimize(&input, &output, Some((400, 400)))
            .await
            .unwrap();

        let result = image::open(&output).unwrap();
        assert_eq!((result.width(), result.height()), (20, 10));
    }

    #[tokio::test]
    async fn test_optimize_corrupt_input_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("bad.jpg");
        let output = temp_dir.path().join("out.jpg");
        tokio::fs::write(&input, b"definitely not a jpeg")
            .await
            .unwrap();

        let processor = ImageProcessor::new(Config::default());
        let result = processor.optimize(&input, &output, None).await;
        assert!(result.is_err());
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn test_convert_to_webp_writes_sibling() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("logo_master.png");
        let primary = temp_dir.path().join("logo.png");

        solid_rgba(100, 100, [10, 200, 10, 255])
            .save(&input)
            .unwrap();

        let processor = ImageProcessor::new(Config::default());
        let webp_path = processor
            .convert_to_webp(&input, &primary, Some((40, 40)))
            .await
            .unwrap();

        assert_eq!(webp_path, temp_dir.path().join("logo.webp"));
        let decoded = image::open(&webp_path).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (40, 40));
    }

    #[tokio::test]
    async fn test_unknown_output_extension_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("a.png");
        let output = temp_dir.path().join("a.xyz");
        solid_rgba(4, 4, [0, 0, 0, 255]).save(&input).unwrap();

        let processor = ImageProcessor::new(Config::default());
        let result = processor.optimize(&input, &output, None).await;
        assert!(matches!(result, Err(AssetError::UnsupportedFormat(_))));
    }
}
