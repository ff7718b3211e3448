//! Text recognition over images.
//!
//! The scan pipeline talks to OCR through the [`OcrEngine`] trait so that
//! tests can substitute scripted engines and so the stage degrades cleanly
//! when no engine is installed. The production implementation is
//! [`TesseractOcr`], which shells out to the `tesseract` binary.

pub mod image;

use std::future::Future;
use std::process::Stdio;

use ::image::{DynamicImage, ImageFormat};
use tokio::process::Command;

use crate::config::constants::OCR_PSM_MODES;
use crate::error_handling::OcrError;
use crate::ocr::image::upscale_for_ocr;

/// Recognizes text in a decoded image.
pub trait OcrEngine: Send + Sync {
    /// Probes whether the engine can run at all in this environment.
    fn is_available(&self) -> impl Future<Output = bool> + Send;

    /// Extracts text from the image. An empty string is a valid result.
    ///
    /// # Errors
    ///
    /// Returns an [`OcrError`] when the engine cannot be invoked or every
    /// recognition attempt fails.
    fn recognize(&self, img: &DynamicImage) -> impl Future<Output = Result<String, OcrError>> + Send;
}

/// OCR engine backed by the `tesseract` command-line binary.
///
/// Each image is upscaled if small, written to a temporary PNG, and run
/// through several page segmentation modes; the longest recognized text wins.
#[derive(Debug, Clone)]
pub struct TesseractOcr {
    binary: String,
}

impl TesseractOcr {
    /// Creates an engine invoking the given binary (usually just "tesseract").
    pub fn new(binary: impl Into<String>) -> Self {
        TesseractOcr {
            binary: binary.into(),
        }
    }

    async fn run_once(&self, image_path: &std::path::Path, psm: u8) -> Result<String, OcrError> {
        let output = Command::new(&self.binary)
            .arg(image_path)
            .arg("stdout")
            .args(["-l", "eng", "--oem", "3", "--psm"])
            .arg(psm.to_string())
            .stdin(Stdio::null())
            .output()
            .await?;

        if !output.status.success() {
            return Err(OcrError::Engine(format!(
                "tesseract exited with {} (psm {}): {}",
                output.status,
                psm,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl OcrEngine for TesseractOcr {
    async fn is_available(&self) -> bool {
        Command::new(&self.binary)
            .arg("--version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map(|status| status.success())
            .unwrap_or(false)
    }

    async fn recognize(&self, img: &DynamicImage) -> Result<String, OcrError> {
        let prepared = upscale_for_ocr(img);
        let tmp = tempfile::Builder::new()
            .prefix("page_recon_ocr_")
            .suffix(".png")
            .tempfile()?;
        prepared.save_with_format(tmp.path(), ImageFormat::Png)?;

        let mut best = String::new();
        let mut last_error = None;
        for &psm in OCR_PSM_MODES {
            match self.run_once(tmp.path(), psm).await {
                Ok(text) => {
                    if text.len() > best.len() {
                        best = text;
                    }
                }
                Err(e) => {
                    log::debug!("tesseract psm {} attempt failed: {}", psm, e);
                    last_error = Some(e);
                }
            }
        }

        // Only fail if no mode produced anything at all.
        if best.is_empty() {
            if let Some(e) = last_error {
                return Err(e);
            }
        }
        Ok(best)
    }
}
