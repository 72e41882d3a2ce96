//! OCR through the `tesseract` command-line tool.
//!
//! Each call writes the image to a scratch file, runs
//! `tesseract <file> stdout -l <language>` and returns what the tool printed.
//! The child is killed if it outlives the timeout.

use std::io::Write;
use std::time::Duration;

use async_trait::async_trait;
use tempfile::NamedTempFile;
use tokio::process::Command;
use tracing::debug;

use crate::domain::ports::{OcrEngine, OcrEngineError};

/// Language pack used when none is configured.
pub const DEFAULT_OCR_LANGUAGE: &str = "eng";
/// Upper bound on one recognition run.
pub const DEFAULT_OCR_TIMEOUT: Duration = Duration::from_secs(60);

const STDERR_PREVIEW_CHARS: usize = 160;

/// OCR engine shelling out to a Tesseract binary.
#[derive(Debug, Clone)]
pub struct TesseractOcrEngine {
    command: String,
    language: String,
    timeout: Duration,
}

impl Default for TesseractOcrEngine {
    fn default() -> Self {
        Self::new("tesseract", DEFAULT_OCR_LANGUAGE, DEFAULT_OCR_TIMEOUT)
    }
}

impl TesseractOcrEngine {
    /// Build an engine running `command` with the given language pack.
    pub fn new(command: impl Into<String>, language: impl Into<String>, timeout: Duration) -> Self {
        Self {
            command: command.into(),
            language: language.into(),
            timeout,
        }
    }

    fn scratch_file(image: &[u8]) -> Result<NamedTempFile, OcrEngineError> {
        let mut file = tempfile::Builder::new()
            .prefix("note-ocr-")
            .tempfile()
            .map_err(|err| OcrEngineError::unavailable(format!("scratch file: {err}")))?;
        file.write_all(image)
            .and_then(|()| file.flush())
            .map_err(|err| OcrEngineError::unavailable(format!("scratch file: {err}")))?;
        Ok(file)
    }
}

fn stderr_preview(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    let trimmed = text.trim();
    let mut preview: String = trimmed.chars().take(STDERR_PREVIEW_CHARS).collect();
    if trimmed.chars().count() > STDERR_PREVIEW_CHARS {
        preview.push_str("...");
    }
    preview
}

/// Tesseract's stdout, stored as-is including its trailing page break.
fn recognized_text(stdout: &[u8]) -> String {
    String::from_utf8_lossy(stdout).into_owned()
}

#[async_trait]
impl OcrEngine for TesseractOcrEngine {
    async fn recognize(&self, image: &[u8], content_type: &str) -> Result<String, OcrEngineError> {
        let scratch = Self::scratch_file(image)?;
        debug!(
            content_type,
            bytes = image.len(),
            language = %self.language,
            "running tesseract"
        );

        let run = Command::new(&self.command)
            .arg(scratch.path())
            .arg("stdout")
            .arg("-l")
            .arg(&self.language)
            .kill_on_drop(true)
            .output();
        let output = tokio::time::timeout(self.timeout, run)
            .await
            .map_err(|_| OcrEngineError::timeout(self.timeout.as_secs()))?
            .map_err(|err| OcrEngineError::unavailable(format!("{}: {err}", self.command)))?;

        if !output.status.success() {
            return Err(OcrEngineError::failed(format!(
                "{} ({})",
                stderr_preview(&output.stderr),
                output.status
            )));
        }
        Ok(recognized_text(&output.stdout))
    }
}
