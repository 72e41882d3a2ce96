//! Driven port for best-effort text recognition on images.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Failures reported by OCR adapters. Callers downgrade all of them to
    /// empty text.
    pub enum OcrEngineError {
        /// The engine binary could not be started.
        Unavailable { message: String } => "OCR engine unavailable: {message}",
        /// The engine ran but reported an error.
        Failed { message: String } => "OCR failed: {message}",
        /// The engine did not finish in time.
        Timeout { seconds: u64 } => "OCR timed out after {seconds}s",
    }
}

/// Port for extracting text from image bytes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OcrEngine: Send + Sync {
    /// Recognise text in an encoded image.
    async fn recognize(&self, image: &[u8], content_type: &str) -> Result<String, OcrEngineError>;
}

/// Engine used when OCR is disabled; recognises nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureOcrEngine;

#[async_trait]
impl OcrEngine for FixtureOcrEngine {
    async fn recognize(
        &self,
        _image: &[u8],
        _content_type: &str,
    ) -> Result<String, OcrEngineError> {
        Ok(String::new())
    }
}
